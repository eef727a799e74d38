//! Configuration validation
//!
//! Validation rules:
//! - resolved custom feed names unique (they partition storage)
//!
//! Locations are deliberately NOT validated here: classification happens at
//! source construction, where an unresolvable entry is dropped with a
//! diagnostic instead of failing the whole configuration.

use std::collections::HashSet;

use contracts::{BlacklistError, SyncConfig};

/// Validate a SyncConfig
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &SyncConfig) -> Result<(), BlacklistError> {
    validate_unique_names(config)?;
    Ok(())
}

/// Resolved feed names must be unique
fn validate_unique_names(config: &SyncConfig) -> Result<(), BlacklistError> {
    let mut seen = HashSet::new();
    for entry in &config.feeds.custom {
        let name = entry.resolved_name();
        if !seen.insert(name) {
            return Err(BlacklistError::config_validation(
                format!("feeds.custom[name={name}]"),
                "duplicate feed name",
            ));
        }
    }
    Ok(())
}
