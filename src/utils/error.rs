use thiserror::Error;

/// 所有失敗路徑都收斂到這個型別，呼叫端負責把訊息顯示在表單旁邊。
#[derive(Error, Debug)]
pub enum WaitlistError {
    #[error("Validation error on `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("Duplicate signup: {email} is already on the waitlist")]
    DuplicateError { email: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Duplicate,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

impl WaitlistError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageError {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::DuplicateError { .. } => ErrorCategory::Duplicate,
            Self::StorageError { .. } | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::Storage
            }
            Self::ConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Duplicate => ErrorSeverity::Low,
            ErrorCategory::Validation => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息；儲存層的細節不外洩。
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message, .. } => message.clone(),
            Self::DuplicateError { .. } => "This email is already on the waitlist!".to_string(),
            Self::ConfigError { message } => format!("Invalid configuration: {}", message),
            Self::StorageError { .. } | Self::IoError(_) | Self::SerializationError(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Check the email address and submit again",
            ErrorCategory::Duplicate => "No action needed, you are already signed up",
            ErrorCategory::Storage => "Try again; if it keeps failing check the storage directory",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
        }
    }

    /// 呼叫端只需要知道要不要讓使用者重試。
    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Storage
    }
}

pub type Result<T> = std::result::Result<T, WaitlistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_and_serde_fold_into_storage() {
        let io = WaitlistError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert_eq!(io.category(), ErrorCategory::Storage);
        assert_eq!(io.user_friendly_message(), GENERIC_FAILURE_MESSAGE);

        let serde = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = WaitlistError::from(serde);
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_duplicate_message_differs_from_validation() {
        let dup = WaitlistError::DuplicateError {
            email: "a@example.com".to_string(),
        };
        let invalid = WaitlistError::validation("email", "Please enter a valid email address");

        assert_ne!(dup.user_friendly_message(), invalid.user_friendly_message());
        assert_eq!(dup.severity(), ErrorSeverity::Low);
        assert_eq!(invalid.category(), ErrorCategory::Validation);
        assert!(!dup.is_retryable());
    }
}
