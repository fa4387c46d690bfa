//! Configuration types for the HR balance engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files: the leave-type catalog
//! and the CPF rate table.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};

/// A category of leave (e.g., annual, medical, no-pay).
///
/// Configuration data: changed only by administrators and referenced by
/// every balance row and leave request.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveTypeConfig {
    /// Unique lowercase code (e.g., "annual").
    pub code: String,
    /// Human-readable display name.
    pub name: String,
    /// Default annual entitlement in days.
    pub default_days: Decimal,
    /// Whether unused days carry over to the next year.
    pub carry_over: bool,
    /// Maximum days that may carry over; zero means uncapped.
    pub max_carry_over: Decimal,
}

/// Leave-types configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveTypesConfig {
    /// All configured leave types.
    pub leave_types: Vec<LeaveTypeConfig>,
}

/// One CPF rate band with an inclusive upper age bound.
#[derive(Debug, Clone, Deserialize)]
pub struct CpfRateBand {
    /// Inclusive upper age bound; `None` marks the open-ended top band.
    pub max_age: Option<u32>,
    /// Employee contribution rate in percent.
    pub employee_rate: Decimal,
    /// Employer contribution rate in percent.
    pub employer_rate: Decimal,
}

/// CPF rate table, wage ceilings and the default income tax rate.
#[derive(Debug, Clone, Deserialize)]
pub struct CpfConfig {
    /// Monthly ordinary-wage ceiling for CPF purposes.
    pub ordinary_wage_ceiling: Decimal,
    /// Annual additional-wage ceiling for CPF purposes.
    pub additional_wage_annual_ceiling: Decimal,
    /// Flat income tax rate applied to gross salary.
    pub default_income_tax_rate: Decimal,
    /// Rate bands ordered by ascending `max_age`, open band last.
    pub bands: Vec<CpfRateBand>,
}

impl CpfConfig {
    /// Returns the statutory rate table: bands 55/60/65/70 with rates
    /// 20/17, 18/16, 12.5/12.5, 7.5/9 and 5/7.5 above 70, an 8000
    /// monthly ordinary-wage ceiling, a 102000 annual additional-wage
    /// ceiling and a 15% flat tax. The shipped `config/hr/cpf.yaml`
    /// carries the same values.
    pub fn statutory() -> Self {
        Self {
            ordinary_wage_ceiling: Decimal::from(8000u32),
            additional_wage_annual_ceiling: Decimal::from(102_000u32),
            default_income_tax_rate: Decimal::new(15, 2),
            bands: vec![
                CpfRateBand {
                    max_age: Some(55),
                    employee_rate: Decimal::from(20u32),
                    employer_rate: Decimal::from(17u32),
                },
                CpfRateBand {
                    max_age: Some(60),
                    employee_rate: Decimal::from(18u32),
                    employer_rate: Decimal::from(16u32),
                },
                CpfRateBand {
                    max_age: Some(65),
                    employee_rate: Decimal::new(125, 1),
                    employer_rate: Decimal::new(125, 1),
                },
                CpfRateBand {
                    max_age: Some(70),
                    employee_rate: Decimal::new(75, 1),
                    employer_rate: Decimal::from(9u32),
                },
                CpfRateBand {
                    max_age: None,
                    employee_rate: Decimal::from(5u32),
                    employer_rate: Decimal::new(75, 1),
                },
            ],
        }
    }

    /// Looks up the (employee, employer) rate pair for an age.
    ///
    /// Bands are inclusive on their upper bound; the first matching band
    /// wins, and an open-ended band catches every remaining age.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationMissing` when no band covers the age.
    pub fn rates_for_age(&self, age: u32) -> EngineResult<(Decimal, Decimal)> {
        self.bands
            .iter()
            .find(|band| band.max_age.map_or(true, |max| age <= max))
            .map(|band| (band.employee_rate, band.employer_rate))
            .ok_or_else(|| EngineError::ConfigurationMissing {
                what: format!("CPF rate band for age {}", age),
            })
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct HrConfig {
    /// Leave types keyed by code.
    leave_types: HashMap<String, LeaveTypeConfig>,
    /// CPF rate table and ceilings.
    cpf: CpfConfig,
}

impl HrConfig {
    /// Creates a new HrConfig from its component parts.
    pub fn new(leave_types: Vec<LeaveTypeConfig>, cpf: CpfConfig) -> Self {
        let leave_types = leave_types
            .into_iter()
            .map(|lt| (lt.code.clone(), lt))
            .collect();
        Self { leave_types, cpf }
    }

    /// Gets a leave type by its code.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationMissing` for an unknown code.
    pub fn get_leave_type(&self, code: &str) -> EngineResult<&LeaveTypeConfig> {
        self.leave_types
            .get(code)
            .ok_or_else(|| EngineError::ConfigurationMissing {
                what: format!("leave type '{}'", code),
            })
    }

    /// Returns all configured leave types, in no particular order.
    pub fn leave_types(&self) -> impl Iterator<Item = &LeaveTypeConfig> {
        self.leave_types.values()
    }

    /// Returns the CPF configuration.
    pub fn cpf(&self) -> &CpfConfig {
        &self.cpf
    }
}
