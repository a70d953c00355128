//! Deterministic application identity.

use sha2::{Digest, Sha256};

use super::{ApplicationCandidate, ApplicationId};
use crate::error::RegistryError;

/// Number of leading digest bytes kept in the rendered id.
const ID_BYTES: usize = 8;

/// Derives an [`ApplicationId`] from a candidate's identifying fields.
///
/// Implementations must be pure: the same candidate always yields the
/// same id, which is what makes re-registration an overwrite.
pub trait ApplicationIdGenerator: Send + Sync + std::fmt::Debug {
    /// Computes the id for `candidate`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidInput`] if an identifying field is
    /// missing.
    fn generate(&self, candidate: &ApplicationCandidate) -> Result<ApplicationId, RegistryError>;
}

/// SHA-256 over the health URL, truncated to [`ID_BYTES`] and hex encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashingUrlIdGenerator;

impl HashingUrlIdGenerator {
    /// Creates the generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ApplicationIdGenerator for HashingUrlIdGenerator {
    fn generate(&self, candidate: &ApplicationCandidate) -> Result<ApplicationId, RegistryError> {
        if candidate.health_url.is_empty() {
            return Err(RegistryError::InvalidInput(
                "healthUrl is required to derive an id".to_string(),
            ));
        }
        let digest = Sha256::digest(candidate.health_url.as_bytes());
        let prefix = digest.get(..ID_BYTES).unwrap_or(digest.as_slice());
        Ok(ApplicationId::new(hex::encode(prefix)))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn id_for(health_url: &str, name: &str) -> ApplicationId {
        let candidate = ApplicationCandidate::new(health_url, "", "", name);
        let Ok(id) = HashingUrlIdGenerator::new().generate(&candidate) else {
            panic!("id generation failed");
        };
        id
    }

    #[test]
    fn same_health_url_same_id() {
        let a = id_for("http://localhost:8080/health", "abc");
        let b = id_for("http://localhost:8080/health", "renamed");
        assert_eq!(a, b);
    }

    #[test]
    fn different_health_url_different_id() {
        let a = id_for("http://localhost:8080/health", "abc");
        let b = id_for("http://localhost:8081/health", "abc");
        assert_ne!(a, b);
    }

    #[test]
    fn id_is_lowercase_hex_of_fixed_width() {
        let id = id_for("http://localhost:8080/health", "abc");
        assert_eq!(id.as_str().len(), ID_BYTES * 2);
        assert!(
            id.as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn empty_health_url_is_invalid_input() {
        let candidate = ApplicationCandidate::new("", "", "", "abc");
        let result = HashingUrlIdGenerator::new().generate(&candidate);
        assert!(matches!(result, Err(RegistryError::InvalidInput(_))));
    }
}
