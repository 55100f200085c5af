use thiserror::Error;

/// Text shown when a failed response carries no usable `error` field.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned {status}: {}", message.as_deref().unwrap_or(GENERIC_ERROR_MESSAGE))]
    Api { status: u16, message: Option<String> },

    #[error("Serialization error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error in {field}: {message}")]
    Config { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Server,
    Data,
    Validation,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BridgeError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Message surfaced to the user in a danger notification.
    pub fn notification_text(&self) -> String {
        match self {
            Self::Api {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Validation { message } => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport(_) => ErrorCategory::Network,
            Self::Api { .. } => ErrorCategory::Server,
            Self::Decode(_) => ErrorCategory::Data,
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::Io(_)
            | Self::Url(_)
            | Self::Config { .. }
            | Self::InvalidConfigValue { .. }
            | Self::MissingConfig { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Server | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Transport(_) => "Could not reach the expense server".to_string(),
            Self::Api { status, .. } => {
                format!("The server rejected the request ({}): {}", status, self.notification_text())
            }
            Self::Decode(_) => "The server sent a response that could not be read".to_string(),
            Self::Validation { message } => message.clone(),
            _ => format!("Configuration problem: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the server is running and --base-url is correct",
            ErrorCategory::Server => "Check your permissions for this record and try again",
            ErrorCategory::Data => "Make sure the client and server versions match",
            ErrorCategory::Validation => "Correct the input and try again",
            ErrorCategory::Configuration => "Review the configuration file and command-line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_text_uses_server_message() {
        let err = BridgeError::Api {
            status: 403,
            message: Some("Unauthorized".to_string()),
        };
        assert_eq!(err.notification_text(), "Unauthorized");
        assert_eq!(err.category(), ErrorCategory::Server);
    }

    #[test]
    fn test_notification_text_falls_back_without_body() {
        let err = BridgeError::Api {
            status: 500,
            message: None,
        };
        assert_eq!(err.notification_text(), GENERIC_ERROR_MESSAGE);
        assert_eq!(err.to_string(), "API returned 500: An error occurred");
    }

    #[test]
    fn test_severity_ordering() {
        let validation = BridgeError::validation("blank");
        let config = BridgeError::MissingConfig {
            field: "api.base_url".to_string(),
        };
        assert_eq!(validation.severity(), ErrorSeverity::Low);
        assert_eq!(config.severity(), ErrorSeverity::Critical);
        assert!(validation.severity() < config.severity());
    }
}
