//! Runtime configuration, read from the environment with built-in defaults.

use std::time::Duration;

use crate::catalogue::CatalogueSource;
use crate::error::ConfigError;
use crate::matcher::DEFAULT_SUGGESTION_LIMIT;
use crate::scheduler::DEFAULT_MENU_DELAY;

pub const CATALOGUE_VAR: &str = "TECHLORE_CATALOGUE";
pub const MENU_DELAY_VAR: &str = "TECHLORE_MENU_DELAY_MS";
pub const SUGGESTION_LIMIT_VAR: &str = "TECHLORE_SUGGESTION_LIMIT";

const DEFAULT_CATALOGUE: &str = "data.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub catalogue: CatalogueSource,
    pub menu_delay: Duration,
    pub suggestion_limit: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            catalogue: CatalogueSource::parse(DEFAULT_CATALOGUE),
            menu_delay: DEFAULT_MENU_DELAY,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

impl ChatConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable lookup; unset or blank variables keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(location) = get(CATALOGUE_VAR) {
            config.catalogue = CatalogueSource::parse(location.trim());
        }
        if let Some(raw) = get(MENU_DELAY_VAR) {
            config.menu_delay = Duration::from_millis(parse_number(MENU_DELAY_VAR, &raw)?);
        }
        if let Some(raw) = get(SUGGESTION_LIMIT_VAR) {
            let limit = parse_number(SUGGESTION_LIMIT_VAR, &raw)?;
            if limit == 0 {
                return Err(ConfigError::Zero { var: SUGGESTION_LIMIT_VAR });
            }
            config.suggestion_limit = limit as usize;
        }
        Ok(config)
    }
}

fn parse_number(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: raw.to_string(),
    })
}
