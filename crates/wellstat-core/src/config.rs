//! # Engine Configuration
//!
//! Tunables for the statistics engine. Every value has a default, so an
//! empty YAML/JSON document deserializes to [`EngineConfig::default`].
//!
//! The engine never reads the environment; binaries build an
//! `EngineConfig` and pass it in.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Sample-size policy for the nearest-neighbour scan.
///
/// The scan is O(m²) in the working-set size, so very large batches are
/// subsampled to a smaller cap than moderately large ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NndCapPolicy {
    /// Raw input size above which `reduced_cap` applies.
    pub high_input_threshold: usize,
    /// Cap used for inputs larger than `high_input_threshold`.
    pub reduced_cap: usize,
    /// Cap used for everything else.
    pub default_cap: usize,
}

impl Default for NndCapPolicy {
    fn default() -> Self {
        Self {
            high_input_threshold: 4000,
            reduced_cap: 1200,
            default_cap: 1500,
        }
    }
}

impl NndCapPolicy {
    /// Working-set cap for a raw input of `n` points.
    pub fn cap_for(&self, n: usize) -> usize {
        if n > self.high_input_threshold {
            self.reduced_cap
        } else {
            self.default_cap
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Nearest-neighbour subsampling policy.
    pub nnd: NndCapPolicy,
    /// Number of companies listed in `top_companies`.
    pub top_companies_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            nnd: NndCapPolicy::default(),
            top_companies_limit: 10,
        }
    }
}

impl EngineConfig {
    /// Check internal consistency.
    ///
    /// Both caps must admit at least one neighbour pair, and the reduced cap
    /// may not exceed the default cap.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let NndCapPolicy {
            reduced_cap,
            default_cap,
            ..
        } = self.nnd;
        if reduced_cap < 2 || default_cap < 2 {
            return Err(ValidationError::InvalidConfig(format!(
                "nearest-neighbour caps must be at least 2 (reduced={reduced_cap}, default={default_cap})"
            )));
        }
        if reduced_cap > default_cap {
            return Err(ValidationError::InvalidConfig(format!(
                "reduced cap {reduced_cap} exceeds default cap {default_cap}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_tiers() {
        let policy = NndCapPolicy::default();
        assert_eq!(policy.cap_for(10), 1500);
        assert_eq!(policy.cap_for(4000), 1500);
        assert_eq!(policy.cap_for(4001), 1200);
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"nnd": {"default_cap": 900}}"#).unwrap();
        assert_eq!(config.nnd.default_cap, 900);
        assert_eq!(config.nnd.reduced_cap, 1200);
        assert_eq!(config.top_companies_limit, 10);
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_tiny_cap() {
        let mut config = EngineConfig::default();
        config.nnd.reduced_cap = 1;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn validate_rejects_inverted_caps() {
        let mut config = EngineConfig::default();
        config.nnd.reduced_cap = 2000;
        let err = config.validate().unwrap_err();
        assert!(format!("{err}").contains("exceeds"));
    }
}
