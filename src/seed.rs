//! Startup seed: applications registered before any client calls in.
//!
//! A seed file is a JSON array of candidates in the same camelCase shape
//! clients submit:
//!
//! ```json
//! [
//!   { "healthUrl": "http://localhost:8080/health", "name": "orders" },
//!   { "healthUrl": "http://localhost:8081/health", "managementUrl": "http://localhost:8081/", "name": "billing" }
//! ]
//! ```
//!
//! Entries are decoded and registered one by one; a bad entry is logged
//! and skipped without affecting its neighbours.

use std::path::Path;

use crate::domain::{ApplicationCandidate, ApplicationStore};
use crate::error::RegistryError;
use crate::service::ApplicationRegistry;

/// One decoded seed entry: a candidate, or the reason it could not be read.
pub type SeedEntry = Result<ApplicationCandidate, RegistryError>;

/// Outcome of registering a seed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    /// Entries now present in the registry.
    pub registered: usize,
    /// Entries that failed decoding or validation.
    pub rejected: usize,
}

/// Reads the seed file at `path` and decodes each entry.
///
/// # Errors
///
/// Returns [`RegistryError::Seed`] if the file cannot be read or is not a
/// JSON array. Per-entry failures are returned inside the vector.
pub fn load_entries(path: &Path) -> Result<Vec<SeedEntry>, RegistryError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| RegistryError::Seed(format!("{}: {e}", path.display())))?;
    parse_entries(&raw)
}

/// Decodes a JSON array of candidates, entry by entry.
///
/// # Errors
///
/// Returns [`RegistryError::Seed`] if `raw` is not a JSON array.
pub fn parse_entries(raw: &str) -> Result<Vec<SeedEntry>, RegistryError> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(raw)
        .map_err(|e| RegistryError::Seed(format!("expected a JSON array: {e}")))?;
    Ok(entries
        .into_iter()
        .map(ApplicationCandidate::from_json)
        .collect())
}

/// Registers every decodable entry, logging each failure by its position.
pub async fn register_entries<S: ApplicationStore>(
    registry: &ApplicationRegistry<S>,
    entries: Vec<SeedEntry>,
) -> SeedSummary {
    let mut summary = SeedSummary::default();
    let mut positions = Vec::with_capacity(entries.len());
    let mut candidates = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        match entry {
            Ok(candidate) => {
                positions.push(index);
                candidates.push(candidate);
            }
            Err(err) => {
                log_rejected(index, &err);
                summary.rejected += 1;
            }
        }
    }

    let results = registry.register_all(candidates).await;
    for (index, result) in positions.into_iter().zip(results) {
        match result {
            Ok(_) => summary.registered += 1,
            Err(err) => {
                log_rejected(index, &err);
                summary.rejected += 1;
            }
        }
    }
    summary
}

fn log_rejected(index: usize, err: &RegistryError) {
    if err.is_client_error() {
        tracing::warn!(entry = index, error = %err, "seed entry skipped");
    } else {
        tracing::error!(entry = index, error = %err, "seed entry failed");
    }
}
