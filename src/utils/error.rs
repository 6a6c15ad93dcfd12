use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("{message}")]
    ServiceError { status: u16, message: String },

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Element not found: #{id}")]
    MissingElement { id: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Response,
    View,
    Configuration,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FormError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FormError::ApiError(_) => ErrorCategory::Network,
            FormError::SerializationError(_)
            | FormError::InvalidResponse { .. }
            | FormError::ServiceError { .. }
            | FormError::HttpStatus { .. } => ErrorCategory::Response,
            FormError::MissingElement { .. } => ErrorCategory::View,
            FormError::ConfigError { .. }
            | FormError::InvalidConfigValueError { .. }
            | FormError::MissingConfigError { .. } => ErrorCategory::Configuration,
            FormError::IoError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 服務暫時無法連線，可稍後重試
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Response | ErrorCategory::View => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FormError::ApiError(e) if e.is_connect() => {
                "Could not reach the prediction service".to_string()
            }
            FormError::ServiceError { message, .. } => {
                format!("The prediction service rejected the form: {}", message)
            }
            FormError::MissingElement { id } => {
                format!("The page is missing the '{}' element", id)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FormError::ApiError(_) => {
                "Make sure the prediction service is running and the endpoint is correct"
            }
            FormError::ServiceError { .. } => "Check the form fields and submit again",
            FormError::InvalidResponse { .. }
            | FormError::SerializationError(_)
            | FormError::HttpStatus { .. } => {
                "Verify that the endpoint points at the prediction service"
            }
            FormError::MissingElement { .. } => {
                "Make sure the page declares every result element of the prediction modal"
            }
            FormError::ConfigError { .. }
            | FormError::InvalidConfigValueError { .. }
            | FormError::MissingConfigError { .. } => "Review the command line and form file",
            FormError::IoError(_) => "Check that the form file exists and is readable",
        }
    }
}

pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_displays_raw_message() {
        let err = FormError::ServiceError {
            status: 500,
            message: "Missing 'Target Date'.".to_string(),
        };
        assert_eq!(err.to_string(), "Missing 'Target Date'.");
        assert_eq!(err.category(), ErrorCategory::Response);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_configuration_errors_are_critical() {
        let err = FormError::MissingConfigError {
            field: "field".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_missing_element_message() {
        let err = FormError::MissingElement {
            id: "eoq".to_string(),
        };
        assert_eq!(err.to_string(), "Element not found: #eoq");
        assert!(err.user_friendly_message().contains("'eoq'"));
        assert_eq!(err.category(), ErrorCategory::View);
    }
}
