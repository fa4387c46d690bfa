//! HTTP API module for the HR balance engine.
//!
//! This module provides the REST endpoints over the engine: employee and
//! salary registration, the leave-request and expense-claim lifecycles,
//! leave-balance reads, payroll runs and year-end rollover.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ActorRequest, BalanceQuery, CreateExpenseClaim, CreateLeaveRequest, PayrollRunRequest,
    RegisterEmployeeRequest, RolloverRequest, SalaryRequest, TransitionRequest,
};
pub use response::ApiError;
pub use state::AppState;
