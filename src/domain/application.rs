//! Application records and the caller-supplied registration candidate.
//!
//! An [`ApplicationCandidate`] is what a client submits: URLs and a name,
//! no id. The registry validates it and turns it into an [`Application`],
//! which is the only form ever written to the store.

use serde::{Deserialize, Serialize};
use url::Url;

use super::ApplicationId;
use crate::error::RegistryError;

/// Registration request for a remote service.
///
/// Missing fields decode as empty strings, so an incomplete candidate is
/// reported by [`ApplicationCandidate::validate`] rather than by serde.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationCandidate {
    /// Absolute URL of the service's health endpoint. Required.
    pub health_url: String,
    /// Absolute URL of the management base path. Empty when absent.
    pub management_url: String,
    /// Absolute URL of the service base path. Empty when absent.
    pub service_url: String,
    /// Display name. Required; several applications may share it.
    pub name: String,
}

impl ApplicationCandidate {
    /// Creates a candidate from its four identifying fields.
    #[must_use]
    pub fn new(
        health_url: impl Into<String>,
        management_url: impl Into<String>,
        service_url: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            health_url: health_url.into(),
            management_url: management_url.into(),
            service_url: service_url.into(),
            name: name.into(),
        }
    }

    /// Decodes a candidate from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Validation`] if the value is `null` or does
    /// not have the shape of a candidate.
    pub fn from_json(value: serde_json::Value) -> Result<Self, RegistryError> {
        if value.is_null() {
            return Err(RegistryError::Validation(
                "application must not be null".to_string(),
            ));
        }
        serde_json::from_value(value)
            .map_err(|e| RegistryError::Validation(format!("malformed application: {e}")))
    }

    /// Checks the candidate's fields in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Validation`] naming the first field that
    /// is missing or not a valid absolute URL.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.name.is_empty() {
            return Err(RegistryError::Validation("name must be set".to_string()));
        }
        if self.health_url.is_empty() {
            return Err(RegistryError::Validation(
                "healthUrl must be set".to_string(),
            ));
        }
        check_url("healthUrl", &self.health_url)?;
        if !self.management_url.is_empty() {
            check_url("managementUrl", &self.management_url)?;
        }
        if !self.service_url.is_empty() {
            check_url("serviceUrl", &self.service_url)?;
        }
        Ok(())
    }
}

/// `url` only parses absolute URLs without a base, so a successful parse
/// is the absolute-URI check. The parser trims surrounding whitespace and
/// control characters, which would let a padded copy of a known health URL
/// hash to a second id, so those are rejected first.
fn check_url(field: &str, value: &str) -> Result<(), RegistryError> {
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(RegistryError::Validation(format!(
            "{field} '{value}' must not contain whitespace"
        )));
    }
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| RegistryError::Validation(format!("{field} '{value}' is not valid: {e}")))
}

/// A registered application as held by the store.
///
/// Only the registry can build one; the id is therefore always the one
/// the [`super::ApplicationIdGenerator`] assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    id: ApplicationId,
    health_url: String,
    management_url: String,
    service_url: String,
    name: String,
}

impl Application {
    /// Builds the stored record from a validated candidate.
    pub(crate) fn from_candidate(id: ApplicationId, candidate: ApplicationCandidate) -> Self {
        Self {
            id,
            health_url: candidate.health_url,
            management_url: candidate.management_url,
            service_url: candidate.service_url,
            name: candidate.name,
        }
    }

    /// Registry-assigned identifier.
    #[must_use]
    pub fn id(&self) -> &ApplicationId {
        &self.id
    }

    /// Health endpoint URL.
    #[must_use]
    pub fn health_url(&self) -> &str {
        &self.health_url
    }

    /// Management base URL, empty when not provided.
    #[must_use]
    pub fn management_url(&self) -> &str {
        &self.management_url
    }

    /// Service base URL, empty when not provided.
    #[must_use]
    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn assert_invalid(candidate: &ApplicationCandidate, needle: &str) {
        match candidate.validate() {
            Err(RegistryError::Validation(reason)) => {
                assert!(reason.contains(needle), "unexpected reason: {reason}");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_minimal_candidate() {
        let candidate = ApplicationCandidate::new("http://localhost:8080/health", "", "", "abc");
        assert!(candidate.validate().is_ok());
    }

    #[test]
    fn rejects_missing_name_before_urls() {
        let candidate = ApplicationCandidate::new("not-an-url", "", "", "");
        assert_invalid(&candidate, "name");
    }

    #[test]
    fn rejects_empty_and_relative_health_url() {
        assert_invalid(&ApplicationCandidate::new("", "", "", "name"), "healthUrl");
        assert_invalid(
            &ApplicationCandidate::new("not-an-url", "", "", "name"),
            "healthUrl",
        );
    }

    #[test]
    fn rejects_invalid_optional_urls() {
        assert_invalid(
            &ApplicationCandidate::new("http://localhost/health", "not-a-url", "", "name"),
            "managementUrl",
        );
        assert_invalid(
            &ApplicationCandidate::new("http://localhost/health", "", "not-a-url", "name"),
            "serviceUrl",
        );
    }

    #[test]
    fn from_json_uses_camel_case_and_defaults() {
        let value = serde_json::json!({
            "healthUrl": "http://localhost:8080/health",
            "name": "abc",
        });
        let Ok(candidate) = ApplicationCandidate::from_json(value) else {
            panic!("candidate should decode");
        };
        assert_eq!(candidate.health_url, "http://localhost:8080/health");
        assert!(candidate.management_url.is_empty());
        assert!(candidate.service_url.is_empty());
    }

    #[test]
    fn rejects_urls_with_whitespace() {
        assert_invalid(
            &ApplicationCandidate::new(" http://localhost:8080/health ", "", "", "name"),
            "whitespace",
        );
        assert_invalid(
            &ApplicationCandidate::new("http://localhost:8080/health\n", "", "", "name"),
            "healthUrl",
        );
        assert_invalid(
            &ApplicationCandidate::new("http://localhost/health", "http://local host/", "", "name"),
            "managementUrl",
        );
        assert_invalid(
            &ApplicationCandidate::new("http://localhost/health", "", "\thttp://localhost/", "name"),
            "serviceUrl",
        );
    }

    #[test]
    fn from_json_missing_name_reaches_validation() {
        let value = serde_json::json!({ "healthUrl": "http://localhost:8081/health" });
        let Ok(candidate) = ApplicationCandidate::from_json(value) else {
            panic!("missing fields should decode as empty");
        };
        assert!(candidate.name.is_empty());
        assert_invalid(&candidate, "name must be set");
    }

    #[test]
    fn from_json_rejects_null() {
        let result = ApplicationCandidate::from_json(serde_json::Value::Null);
        assert!(matches!(result, Err(RegistryError::Validation(_))));
    }

    #[test]
    fn application_serializes_camel_case() {
        let app = Application::from_candidate(
            ApplicationId::from("0123456789abcdef"),
            ApplicationCandidate::new("http://h/health", "http://h/", "", "svc"),
        );
        let Ok(json) = serde_json::to_string(&app) else {
            panic!("serialization failed");
        };
        assert!(json.contains("\"healthUrl\":\"http://h/health\""));
        assert!(json.contains("\"managementUrl\":\"http://h/\""));
        assert!(json.contains("\"id\":\"0123456789abcdef\""));
    }
}
