//! Configuration for a play session.

use cds_mechanics::RulesConfig;
use serde::{Deserialize, Serialize};

/// Configuration for a play session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// RNG seed for reproducible rolls.
    pub seed: u64,
    /// Rule toggles passed to the engine.
    pub rules: RulesConfig,
    /// How many recent entries the `journal` command shows (at least 1).
    pub journal_preview: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            rules: RulesConfig::default(),
            journal_preview: 10,
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the rule toggles.
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Set the journal preview length (clamped to at least 1).
    pub fn with_journal_preview(mut self, entries: usize) -> Self {
        self.journal_preview = entries.max(1);
        self
    }
}
