use std::{collections::BTreeMap, fmt};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppError {
    Config(String),
    Network(String),
    Timeout(String),
    Http { status: u16, message: String },
    Parse(String),
    Serialization(String),
    /// Structured validation failure returned by the identity service,
    /// keyed by field path.
    Validation {
        message: String,
        errors: BTreeMap<String, String>,
    },
}

impl AppError {
    /// Message suitable for a form banner, without the variant prefix.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Config(message)
            | AppError::Network(message)
            | AppError::Timeout(message)
            | AppError::Parse(message)
            | AppError::Serialization(message)
            | AppError::Http { message, .. }
            | AppError::Validation { message, .. } => message,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(message) => write!(formatter, "Config error: {message}"),
            AppError::Network(message) => write!(formatter, "Network error: {message}"),
            AppError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            AppError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            AppError::Parse(message) => write!(formatter, "Response error: {message}"),
            AppError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
            AppError::Validation { message, errors } => {
                write!(formatter, "Validation failed ({} fields): {message}", errors.len())
            }
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_variant() {
        let err = AppError::Http {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed (500): boom");
        assert_eq!(err.user_message(), "boom");
    }

    #[test]
    fn validation_display_counts_fields() {
        let mut errors = BTreeMap::new();
        errors.insert("email".to_string(), "taken".to_string());
        let err = AppError::Validation {
            message: "Invalid input".to_string(),
            errors,
        };
        assert_eq!(err.to_string(), "Validation failed (1 fields): Invalid input");
    }
}
