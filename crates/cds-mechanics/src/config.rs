//! Rules configuration.
//!
//! Table-level switches that the host exposes as settings. They are passed
//! explicitly into the operations that honour them.

use serde::{Deserialize, Serialize};

use crate::error::{RuleError, RuleResult};

/// Switches controlling optional rule automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Recompute wound conditions whenever health changes.
    pub auto_wounds: bool,
    /// Include the mortality penalty in dice formulas.
    pub auto_mortality_penalty: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            auto_wounds: true,
            auto_mortality_penalty: true,
        }
    }
}

impl RulesConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> RuleResult<Self> {
        serde_json::from_str(json).map_err(|e| RuleError::InvalidConfig(e.to_string()))
    }

    /// Enable or disable wound condition automation.
    pub fn with_auto_wounds(mut self, enabled: bool) -> Self {
        self.auto_wounds = enabled;
        self
    }

    /// Enable or disable the mortality penalty on rolls.
    pub fn with_auto_mortality_penalty(mut self, enabled: bool) -> Self {
        self.auto_mortality_penalty = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enables_everything() {
        let cfg = RulesConfig::default();
        assert!(cfg.auto_wounds);
        assert!(cfg.auto_mortality_penalty);
    }

    #[test]
    fn builder_methods() {
        let cfg = RulesConfig::default()
            .with_auto_wounds(false)
            .with_auto_mortality_penalty(false);
        assert!(!cfg.auto_wounds);
        assert!(!cfg.auto_mortality_penalty);
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let cfg = RulesConfig::from_json(r#"{"auto_wounds": false}"#).unwrap();
        assert!(!cfg.auto_wounds);
        assert!(cfg.auto_mortality_penalty);
    }

    #[test]
    fn from_json_rejects_garbage() {
        let err = RulesConfig::from_json("{auto_wounds").unwrap_err();
        assert!(matches!(err, RuleError::InvalidConfig(_)));
    }
}
