//! Configuration loading and management for the HR balance engine.
//!
//! This module provides functionality to load engine configuration from
//! YAML files: the leave-type catalog and the CPF rate table.
//!
//! # Example
//!
//! ```no_run
//! use hrm_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/hr").unwrap();
//! println!("Loaded {} leave types", config.config().leave_types().count());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CpfConfig, CpfRateBand, HrConfig, LeaveTypeConfig, LeaveTypesConfig};
