use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Session storage error: {message}")]
    StorageError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Storage,
    Network,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 依嚴重程度決定退出碼，錯誤一律非零
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::ConfigError { .. }
            | AppError::MissingConfigError { .. }
            | AppError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AppError::HttpClientError(_) => ErrorCategory::Network,
            AppError::IoError(_)
            | AppError::SerializationError(_)
            | AppError::StorageError { .. } => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息，不包含底層細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::ConfigError { message } => format!("Invalid configuration: {}", message),
            AppError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            AppError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            AppError::HttpClientError(_) => "Could not set up the HTTP client".to_string(),
            AppError::IoError(_) | AppError::StorageError { .. } => {
                "Could not access the session storage".to_string()
            }
            AppError::SerializationError(_) => "Session data could not be read".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the command line flags and the TOML configuration file"
            }
            ErrorCategory::Network => "Check the API endpoint and your TLS setup",
            ErrorCategory::Storage => {
                "Check that the session directory exists and is writable"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// 地址查詢失敗的底層原因，只用於診斷
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("service answered with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    ServiceStatus {
        status: serde_json::Number,
        message: Option<String>,
    },

    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}
