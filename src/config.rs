//! Behavior configuration read from the root element's `data-*` attributes.

use crate::consts::{FLASH_DISMISS_MS, ROW_STAGGER_MS, THEME_TRANSITION_MS, TOAST_LIFETIME_MS};
use crate::error::ConfigError;

pub const ATTR_THEME_TRANSITION_MS: &str = "data-theme-transition-ms";
pub const ATTR_FLASH_DISMISS_MS: &str = "data-flash-dismiss-ms";
pub const ATTR_ROW_STAGGER_MS: &str = "data-row-stagger-ms";
pub const ATTR_TOAST_LIFETIME_MS: &str = "data-toast-lifetime-ms";

/// Timings the page may tune. The theme storage key is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BehaviorConfig {
    pub theme_transition_ms: u32,
    pub flash_dismiss_ms: u32,
    pub row_stagger_ms: u32,
    pub toast_lifetime_ms: u32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            theme_transition_ms: THEME_TRANSITION_MS,
            flash_dismiss_ms: FLASH_DISMISS_MS,
            row_stagger_ms: ROW_STAGGER_MS,
            toast_lifetime_ms: TOAST_LIFETIME_MS,
        }
    }
}

impl BehaviorConfig {
    /// Build config from attribute lookups, keeping defaults for anything absent.
    ///
    /// Recognized attributes:
    /// - `data-theme-transition-ms`: default 300
    /// - `data-flash-dismiss-ms`: default 5000
    /// - `data-row-stagger-ms`: default 100
    /// - `data-toast-lifetime-ms`: default 5000
    pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            theme_transition_ms: parse_ms(&lookup, ATTR_THEME_TRANSITION_MS, defaults.theme_transition_ms)?,
            flash_dismiss_ms: parse_ms(&lookup, ATTR_FLASH_DISMISS_MS, defaults.flash_dismiss_ms)?,
            row_stagger_ms: parse_ms(&lookup, ATTR_ROW_STAGGER_MS, defaults.row_stagger_ms)?,
            toast_lifetime_ms: parse_ms(&lookup, ATTR_TOAST_LIFETIME_MS, defaults.toast_lifetime_ms)?,
        })
    }
}

fn parse_ms(lookup: &impl Fn(&str) -> Option<String>, attribute: &'static str, default: u32) -> Result<u32, ConfigError> {
    match lookup(attribute) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(ms) => Ok(ms),
            Err(_) => Err(ConfigError::InvalidNumber { attribute, value: raw }),
        },
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
