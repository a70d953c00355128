//! Type-safe application identifier.
//!
//! [`ApplicationId`] is a newtype wrapper around the hex-rendered digest
//! produced by an [`super::ApplicationIdGenerator`], so that ids cannot be
//! confused with names or URLs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a registered application.
///
/// Derived from the application's health URL at registration time and
/// immutable thereafter. Used as the key in [`super::ApplicationStore`]
/// and carried by every [`super::RegistryEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Wraps an already-rendered identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ApplicationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ApplicationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<ApplicationId> for String {
    fn from(id: ApplicationId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_inner() {
        let id = ApplicationId::new("a1b2c3d4");
        assert_eq!(id.to_string(), "a1b2c3d4");
        assert_eq!(id.as_str(), "a1b2c3d4");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = ApplicationId::from("deadbeef");
        let Ok(json) = serde_json::to_string(&id) else {
            panic!("serialization failed");
        };
        assert_eq!(json, "\"deadbeef\"");
    }

    #[test]
    fn hash_works_in_hashmap() {
        use std::collections::HashMap;
        let id = ApplicationId::from("cafe");
        let mut map = HashMap::new();
        map.insert(id.clone(), "test");
        assert_eq!(map.get(&id), Some(&"test"));
    }
}
