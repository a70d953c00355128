//! Registry error types.
//!
//! [`RegistryError`] is the central error type for the crate. Each variant
//! carries a numeric code so that a transport layer can map it to its own
//! status scheme without matching on message text.

use crate::domain::ApplicationId;

/// Registry error enum.
///
/// # Error Code Ranges
///
/// | Range     | Category   | Caller action                      |
/// |-----------|------------|------------------------------------|
/// | 1000–1999 | Validation | correct the input and resubmit     |
/// | 2000–2999 | Not Found  | normal outcome, caller decides     |
/// | 3000–3999 | Internal   | defect or observer failure, logged |
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The candidate failed a required-field or URL syntax check.
    #[error("invalid application: {0}")]
    Validation(String),

    /// No application is registered under the given id.
    #[error("application not found: {0}")]
    NotFound(ApplicationId),

    /// The id generator was handed a candidate it cannot identify.
    ///
    /// Unreachable after validation; seeing it means the registry and
    /// generator disagree about required fields.
    #[error("cannot derive application id: {0}")]
    InvalidInput(String),

    /// An observer could not be notified.
    #[error("event publication failed: {0}")]
    Publish(String),

    /// A seed file could not be read or decoded.
    #[error("seed file error: {0}")]
    Seed(String),
}

impl RegistryError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::NotFound(_) => 2001,
            Self::InvalidInput(_) => 3001,
            Self::Publish(_) => 3002,
            Self::Seed(_) => 3003,
        }
    }

    /// Returns `true` if the error was caused by the caller's input.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_ranges() {
        assert_eq!(RegistryError::Validation(String::new()).error_code(), 1001);
        assert_eq!(
            RegistryError::NotFound(ApplicationId::from("x")).error_code(),
            2001
        );
        assert_eq!(RegistryError::InvalidInput(String::new()).error_code(), 3001);
        assert_eq!(RegistryError::Publish(String::new()).error_code(), 3002);
        assert_eq!(RegistryError::Seed(String::new()).error_code(), 3003);
    }

    #[test]
    fn display_includes_reason() {
        let err = RegistryError::Validation("name must be set".to_string());
        assert_eq!(err.to_string(), "invalid application: name must be set");
        assert!(err.is_client_error());
        assert!(!RegistryError::Publish("closed".to_string()).is_client_error());
    }
}
