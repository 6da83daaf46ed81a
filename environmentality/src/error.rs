//! Error types for environment variable binding

use crate::sink::format_report;

/// Errors returned by the typed loading API.
///
/// Coercion problems are collected per property by the [`ErrorSink`](crate::ErrorSink)
/// and surface here as a single [`EnvError::Validation`]. The other variants
/// cover turning a resolved value into a Rust field and loading declaration
/// manifests.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    /// One or more properties failed validation.
    ///
    /// Displays as the same multi-line report printed on the fatal path.
    #[error("{}", format_report(.errors.iter().map(String::as_str)))]
    Validation {
        /// Every recorded message, in the order they occurred
        errors: Vec<String>,
    },

    /// A property had no value although the target field requires one.
    ///
    /// Occurs for a non-`Option` field bound to an optional declaration
    /// without a default.
    #[error("Environment variable '{name}' is required but not set")]
    Missing {
        /// Name of the environment variable
        name: String,
    },

    /// A resolved value does not fit the target Rust type.
    ///
    /// For example `3.5` bound to a `u16` field.
    #[error("Failed to convert environment variable '{name}' to {type_name}: {message}")]
    Parse {
        /// Name of the environment variable
        name: String,
        /// Fully qualified type name of the target field
        type_name: String,
        /// Description of the mismatch
        message: String,
    },

    /// A declaration manifest could not be parsed.
    #[error("Invalid declaration manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl EnvError {
    /// Create a parse error (used by macro-generated code)
    #[doc(hidden)]
    pub fn parse_error<T>(name: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Parse {
            name: name.into(),
            type_name: std::any::type_name::<T>().to_string(),
            message: message.to_string(),
        }
    }

    /// Create a missing environment variable error (used by macro-generated code)
    #[doc(hidden)]
    pub fn missing(name: impl Into<String>) -> Self {
        Self::Missing { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_is_report() {
        let err = EnvError::Validation {
            errors: vec!["Missing required environment variable KEY".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "During environmentality validation the following errors occurred:\n  \
             Missing required environment variable KEY"
        );
    }

    #[test]
    fn test_parse_error_contains_type_info() {
        let err = EnvError::parse_error::<u16>("PORT", "3.5 is out of range for u16");
        match err {
            EnvError::Parse { type_name, .. } => assert!(type_name.contains("u16")),
            _ => panic!("Expected Parse error"),
        }
    }
}
