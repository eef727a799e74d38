//! Feed origin classification
//!
//! Decides once, at source construction, whether a configured location is
//! fetched over HTTP or streamed from the local filesystem.

use std::path::PathBuf;

use url::Url;

use crate::BlacklistError;

/// Resolved feed location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Fetched over HTTP/HTTPS
    Remote(Url),
    /// Streamed from a local file
    LocalFile(PathBuf),
}

impl Origin {
    /// Classify a configured location string.
    ///
    /// - scheme `http`/`https` → [`Origin::Remote`]
    /// - no scheme, non-empty location → [`Origin::LocalFile`] (a bare
    ///   domain such as `"domain.com"` carries no scheme and resolves
    ///   local; the policy choice is recorded in DESIGN.md)
    /// - any other scheme → [`BlacklistError::InvalidScheme`]
    /// - empty or otherwise unparseable location → [`BlacklistError::InvalidOrigin`]
    pub fn resolve(location: &str) -> Result<Self, BlacklistError> {
        if location.is_empty() {
            return Err(BlacklistError::invalid_origin(location));
        }

        match Url::parse(location) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(Self::Remote(url)),
                other => Err(BlacklistError::InvalidScheme {
                    scheme: other.to_string(),
                    location: location.to_string(),
                }),
            },
            // No scheme at all: a plain filesystem path.
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(Self::LocalFile(PathBuf::from(location)))
            }
            Err(_) => Err(BlacklistError::invalid_origin(location)),
        }
    }

    /// Whether this origin is fetched over the network.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}
