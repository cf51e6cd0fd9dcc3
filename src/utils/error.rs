use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrimerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Model error: {message}")]
    ModelError { message: String },

    #[error("Solver '{solver}' failed: {message}")]
    SolverError { solver: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Model,
    Solver,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PrimerError {
    pub fn model(message: impl Into<String>) -> Self {
        Self::ModelError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) => ErrorCategory::Io,
            Self::SerializationError(_) | Self::CsvError(_) => ErrorCategory::Output,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::ModelError { .. } => ErrorCategory::Model,
            Self::SolverError { .. } => ErrorCategory::Solver,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Model | ErrorCategory::Solver | ErrorCategory::Output => {
                ErrorSeverity::High
            }
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the file exists and that the path is readable/writable",
            Self::SerializationError(_) | Self::CsvError(_) => {
                "Try a different --format or report the model that triggered it"
            }
            Self::ConfigValidationError { .. } => "Fix the TOML syntax in the config file",
            Self::InvalidConfigValueError { .. } => "Adjust the value to the documented range",
            Self::MissingConfigError { .. } => "Add the missing key to the config file",
            Self::ModelError { .. } => {
                "Check variable names, constraint names and coefficients in the model"
            }
            Self::SolverError { .. } => "Raise --max-iterations, loosen solver.tolerance or relax the model",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("Could not access a file: {}", e),
            Self::ModelError { message } => format!("The LP model is invalid: {}", message),
            Self::SolverError { solver, message } => {
                format!("The {} backend could not finish: {}", solver, message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PrimerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_category() {
        let config = PrimerError::MissingConfigError {
            field: "solver.tolerance".to_string(),
        };
        assert_eq!(config.category(), ErrorCategory::Configuration);
        assert_eq!(config.severity(), ErrorSeverity::Medium);

        let io = PrimerError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.severity(), ErrorSeverity::Critical);

        assert_eq!(PrimerError::model("dup").severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_user_friendly_message() {
        let err = PrimerError::model("unknown variable 'x9'");
        assert!(err.user_friendly_message().contains("unknown variable 'x9'"));
        assert!(!err.recovery_suggestion().is_empty());
    }
}
