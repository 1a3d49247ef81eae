use thiserror::Error;

#[derive(Error, Debug)]
pub enum DoseError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

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

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Reference data error in {table}: {message}")]
    DataIntegrityError { table: String, message: String },

    #[error("Unsupported language: {code}")]
    UnsupportedLanguage { code: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DoseError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DoseError::IoError(_) => ErrorCategory::Io,
            DoseError::CsvError(_)
            | DoseError::SerializationError(_)
            | DoseError::DataIntegrityError { .. } => ErrorCategory::Data,
            DoseError::ConfigError { .. }
            | DoseError::ConfigValidationError { .. }
            | DoseError::InvalidConfigValueError { .. }
            | DoseError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DoseError::ValidationError { .. } | DoseError::UnsupportedLanguage { .. } => {
                ErrorCategory::Input
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Data => ErrorSeverity::Critical,
            ErrorCategory::Io => match self {
                DoseError::IoError(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                    ErrorSeverity::Medium
                }
                _ => ErrorSeverity::Critical,
            },
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DoseError::IoError(e) => format!("Could not read reference data: {}", e),
            DoseError::CsvError(e) => format!("Reference data file is malformed: {}", e),
            DoseError::SerializationError(e) => format!("Could not format output: {}", e),
            DoseError::DataIntegrityError { table, message } => {
                format!("Reference table '{}' is inconsistent: {}", table, message)
            }
            DoseError::ValidationError { message } => message.clone(),
            DoseError::UnsupportedLanguage { code } => {
                format!("Language '{}' is not available", code)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the data directory exists and contains the four CSV tables",
            ErrorCategory::Data => "Fix the offending rows in the reference CSV files and retry",
            ErrorCategory::Configuration => "Review the configuration file and command line flags",
            ErrorCategory::Input => match self {
                DoseError::UnsupportedLanguage { .. } => "Use one of: en, hi",
                _ => "Provide a crop, a disease/pest and a non-negative area",
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, DoseError>;
