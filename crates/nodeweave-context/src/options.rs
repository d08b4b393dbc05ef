use crate::OptionsError;
use serde::{Deserialize, Serialize};

/// Tunable thresholds of the context resolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContextOptions {
    pub recently_connected_limit: usize,
    pub suggestion_limit: usize,
    pub min_suggestion_score: f64,
}

impl ContextOptions {
    pub const DEFAULT_RECENTLY_CONNECTED_LIMIT: usize = 8;
    pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;
    pub const DEFAULT_MIN_SUGGESTION_SCORE: f64 = 0.15;

    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(0.0..=1.0).contains(&self.min_suggestion_score) {
            return Err(OptionsError::ScoreOutOfRange(self.min_suggestion_score));
        }
        Ok(())
    }

    /// Deserialize from JSON, filling gaps with defaults, then validate.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            recently_connected_limit: Self::DEFAULT_RECENTLY_CONNECTED_LIMIT,
            suggestion_limit: Self::DEFAULT_SUGGESTION_LIMIT,
            min_suggestion_score: Self::DEFAULT_MIN_SUGGESTION_SCORE,
        }
    }
}
