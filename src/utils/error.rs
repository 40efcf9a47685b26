use thiserror::Error;

#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Calculation interrupted by user")]
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Output,
    Interrupt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    High,
    Critical,
}

impl BudgetError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BudgetError::IoError(_) => ErrorCategory::Io,
            BudgetError::CsvError(_) | BudgetError::SerializationError(_) => ErrorCategory::Output,
            BudgetError::ConfigValidationError { .. }
            | BudgetError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            BudgetError::Interrupted => ErrorCategory::Interrupt,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 使用者中斷不算失敗
            ErrorCategory::Interrupt => ErrorSeverity::Low,
            ErrorCategory::Configuration | ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            BudgetError::IoError(_) => {
                "Check that stdin/stdout are available and the config file is readable".to_string()
            }
            BudgetError::CsvError(_) | BudgetError::SerializationError(_) => {
                "Try a different --format, e.g. --format text".to_string()
            }
            BudgetError::ConfigValidationError { field, .. } => {
                format!("Fix the '{}' entry in the TOML configuration file", field)
            }
            BudgetError::InvalidConfigValueError { field, .. } => {
                format!("Provide a valid value for '{}' in the config file or on the command line", field)
            }
            BudgetError::Interrupted => "Run the calculator again when ready".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BudgetError::IoError(e) => format!("Could not read or write data: {}", e),
            BudgetError::CsvError(e) => format!("Could not render the CSV report: {}", e),
            BudgetError::SerializationError(e) => format!("Could not render the JSON report: {}", e),
            BudgetError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            BudgetError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' = {} is not allowed: {}", field, value, reason)
            }
            BudgetError::Interrupted => "Calculation interrupted by user.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BudgetError>;
