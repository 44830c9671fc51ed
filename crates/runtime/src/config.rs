//! Runtime configuration from environment variables

use std::sync::Arc;

use blockfall_core::GameConfig;

/// Runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    /// JSON-lines event log destination; None disables the log
    pub log_path: Option<String>,
}

impl RuntimeConfig {
    /// Create from environment variables
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = GameConfig::default();

        let seed = lookup("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let initial_lives = lookup("BLOCKFALL_LIVES")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&lives: &u32| lives > 0)
            .unwrap_or(defaults.initial_lives);

        let empty_color = lookup("BLOCKFALL_EMPTY_COLOR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(Arc::from)
            .unwrap_or(defaults.empty_color);

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            game: GameConfig {
                seed,
                initial_lives,
                empty_color,
                ..defaults
            },
            log_path,
        }
    }
}
