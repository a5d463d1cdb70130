//! Data layer errors.

use std::path::PathBuf;

/// Error type for catalog lookups and fixture loading.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Failed to decode fixture {fixture}: {source}")]
    Decode {
        fixture: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid record in fixture {fixture}: {source}")]
    Invalid {
        fixture: String,
        #[source]
        source: storefront_core::CommerceError,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DataError {
    pub(crate) fn not_found(entity: &'static str, key: impl ToString) -> Self {
        DataError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Whether this is a missing-entity error rather than a loading failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound { .. })
    }
}
