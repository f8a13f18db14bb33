use serde::{Deserialize, Serialize};

use crate::constants::MAX_CONFIRMATION_ATTEMPTS;

/// Tunables of a reconciliation round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Failed polls after which a pending transaction is marked invalid.
    pub max_attempts: u32,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            max_attempts: MAX_CONFIRMATION_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: ReconcilerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.max_attempts, 30);

        let config: ReconcilerConfig = serde_json::from_str(r#"{"max_attempts": 5}"#).unwrap();
        assert_eq!(config.max_attempts, 5);
    }
}
