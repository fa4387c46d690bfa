//! Error types for the HR balance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur in the ledger, the calculation
//! engines and the configuration layer.

use thiserror::Error;

/// The main error type for the HR balance engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use hrm_engine::error::EngineError;
///
/// let error = EngineError::NotFound {
///     entity: "leave request",
///     id: "7c0f".to_string(),
/// };
/// assert_eq!(error.to_string(), "leave request not found: 7c0f");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity that was looked up (e.g., "leave request").
        entity: &'static str,
        /// The identifier that was not found.
        id: String,
    },

    /// The entity is not in the required source state for the requested
    /// transition (e.g., approving a non-pending request).
    #[error("cannot {action} {entity} {id} in status {status}")]
    InvalidStateTransition {
        /// The kind of entity the transition targeted.
        entity: &'static str,
        /// The identifier of the entity.
        id: String,
        /// The entity's current status.
        status: String,
        /// The transition that was attempted.
        action: &'static str,
    },

    /// The actor's role or ownership does not satisfy the operation's
    /// authorization rule.
    #[error("forbidden: {action} requires {requirement}")]
    Forbidden {
        /// The operation that was attempted.
        action: &'static str,
        /// What the operation requires (e.g., "a reviewer role").
        requirement: &'static str,
    },

    /// Malformed input such as negative amounts or inverted date ranges.
    #[error("invalid {field}: {message}")]
    Validation {
        /// The field that failed validation.
        field: &'static str,
        /// A description of what made the input invalid.
        message: String,
    },

    /// Required configuration is absent for an employee or leave type.
    ///
    /// Batch operations use this variant to decide skip-vs-fail: payroll
    /// generation skips the employee rather than failing the whole run.
    #[error("missing configuration: {what}")]
    ConfigurationMissing {
        /// A description of the missing configuration.
        what: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_displays_entity_and_id() {
        let error = EngineError::NotFound {
            entity: "payslip",
            id: "ps_001".to_string(),
        };
        assert_eq!(error.to_string(), "payslip not found: ps_001");
    }

    #[test]
    fn test_invalid_state_transition_displays_context() {
        let error = EngineError::InvalidStateTransition {
            entity: "leave request",
            id: "lr_001".to_string(),
            status: "approved".to_string(),
            action: "approve",
        };
        assert_eq!(
            error.to_string(),
            "cannot approve leave request lr_001 in status approved"
        );
    }

    #[test]
    fn test_forbidden_displays_requirement() {
        let error = EngineError::Forbidden {
            action: "reset",
            requirement: "a reviewer role",
        };
        assert_eq!(error.to_string(), "forbidden: reset requires a reviewer role");
    }

    #[test]
    fn test_validation_displays_field_and_message() {
        let error = EngineError::Validation {
            field: "end_date",
            message: "cannot be before start_date".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "invalid end_date: cannot be before start_date"
        );
    }

    #[test]
    fn test_configuration_missing_displays_detail() {
        let error = EngineError::ConfigurationMissing {
            what: "salary info for employee emp_001".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "missing configuration: salary info for employee emp_001"
        );
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::NotFound {
                entity: "employee",
                id: "emp_404".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
