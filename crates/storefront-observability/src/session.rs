//! Per-invocation session identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one CLI invocation in the logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Random identifier of the form `sess_` followed by 16 hex digits.
    pub fn generate() -> Self {
        Self(format!("sess_{:016x}", rand::random::<u64>()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_format() {
        let id = SessionId::generate();
        assert!(id.as_str().starts_with("sess_"));
        assert_eq!(id.as_str().len(), 21);
        assert!(id.as_str()[5..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_uniqueness() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&SessionId::new("sess_1")).unwrap();
        assert_eq!(json, r#""sess_1""#);
    }
}
