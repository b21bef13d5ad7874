use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrawError {
    #[error("Participant source not found: {path}")]
    SourceNotFound { path: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing required column '{column}' in {path}")]
    MissingColumnError { column: String, path: String },

    #[error("Not enough participants left: requested {requested}, remaining {remaining}")]
    InsufficientPoolError { requested: usize, remaining: usize },

    #[error("Failed to save round {round} results: {message}")]
    PersistenceError { round: u32, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error on '{field}': {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Template error: {message}")]
    TemplateError { message: String },
}

#[cfg(feature = "web")]
impl From<minijinja::Error> for DrawError {
    fn from(err: minijinja::Error) -> Self {
        DrawError::TemplateError {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Source,
    Draw,
    Persistence,
    Configuration,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DrawError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DrawError::SourceNotFound { .. }
            | DrawError::CsvError(_)
            | DrawError::IoError(_)
            | DrawError::MissingColumnError { .. } => ErrorCategory::Source,
            DrawError::InsufficientPoolError { .. } => ErrorCategory::Draw,
            DrawError::PersistenceError { .. } | DrawError::SerializationError(_) => {
                ErrorCategory::Persistence
            }
            DrawError::ConfigError { .. }
            | DrawError::InvalidConfigValueError { .. }
            | DrawError::TemplateError { .. } => ErrorCategory::Configuration,
            DrawError::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 結果檔寫入失敗時抽獎本身已完成
            DrawError::PersistenceError { .. } => ErrorSeverity::Low,
            DrawError::InsufficientPoolError { .. } | DrawError::ValidationError { .. } => {
                ErrorSeverity::Medium
            }
            DrawError::SourceNotFound { .. }
            | DrawError::CsvError(_)
            | DrawError::IoError(_)
            | DrawError::MissingColumnError { .. }
            | DrawError::SerializationError(_) => ErrorSeverity::High,
            DrawError::ConfigError { .. }
            | DrawError::InvalidConfigValueError { .. }
            | DrawError::TemplateError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DrawError::SourceNotFound { path } => {
                format!("Participant list '{}' does not exist", path)
            }
            DrawError::MissingColumnError { column, path } => format!(
                "Participant list '{}' has no '{}' column",
                path, column
            ),
            DrawError::InsufficientPoolError {
                requested,
                remaining,
            } => format!(
                "Only {} participants remain, cannot draw {}",
                remaining, requested
            ),
            DrawError::ValidationError { .. } => {
                "Department and name are both required".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Source => {
                "Check that the participants CSV exists and has 'department' and 'name' columns"
            }
            ErrorCategory::Draw => "Lower the number of winners for this round or reset the draw",
            ErrorCategory::Persistence => "Check that the output directory is writable",
            ErrorCategory::Configuration => "Fix the configuration file or command line flags",
            ErrorCategory::Validation => "Fill in every required field and submit again",
        }
    }
}

pub type Result<T> = std::result::Result<T, DrawError>;
