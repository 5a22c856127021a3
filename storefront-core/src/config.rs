//! Page timing and layout tuning.
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

const DEFAULT_STOREFRONT_DATA: &str = include_str!("../data/storefront.json");

/// Upper bound on delayed re-runs after init.
pub const MAX_RESTORE_RETRIES: usize = 4;
/// Delays beyond this are dropped from the retry schedule.
pub const MAX_RESTORE_DELAY_MS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default = "default_restore_retry_ms")]
    pub restore_retry_ms: Vec<u32>,
    #[serde(default = "default_counter_duration_ms")]
    pub counter_duration_ms: u32,
    #[serde(default = "default_counter_threshold")]
    pub counter_threshold: f64,
    #[serde(default = "default_header_offset_fallback_px")]
    pub header_offset_fallback_px: f64,
    #[serde(default = "default_header_scrolled_px")]
    pub header_scrolled_px: f64,
    #[serde(default = "default_dropdown_resize_debounce_ms")]
    pub dropdown_resize_debounce_ms: u32,
    #[serde(default = "default_search_focus_delay_ms")]
    pub search_focus_delay_ms: u32,
    #[serde(default = "default_gallery_fade_ms")]
    pub gallery_fade_ms: u32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            restore_retry_ms: default_restore_retry_ms(),
            counter_duration_ms: default_counter_duration_ms(),
            counter_threshold: default_counter_threshold(),
            header_offset_fallback_px: default_header_offset_fallback_px(),
            header_scrolled_px: default_header_scrolled_px(),
            dropdown_resize_debounce_ms: default_dropdown_resize_debounce_ms(),
            search_focus_delay_ms: default_search_focus_delay_ms(),
            gallery_fade_ms: default_gallery_fade_ms(),
        }
    }
}

impl StorefrontConfig {
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_STOREFRONT_DATA).unwrap_or_default()
    }

    /// Delays for the post-init collapse re-runs, sorted and bounded.
    #[must_use]
    pub fn restore_delays(&self) -> Vec<u32> {
        let mut delays: Vec<u32> = self
            .restore_retry_ms
            .iter()
            .copied()
            .filter(|&ms| ms <= MAX_RESTORE_DELAY_MS)
            .collect();
        delays.sort_unstable();
        delays.dedup();
        delays.truncate(MAX_RESTORE_RETRIES);
        delays
    }

    /// Threshold clamped to the `[0, 1]` range IntersectionObserver accepts.
    #[must_use]
    pub fn counter_threshold_clamped(&self) -> f64 {
        if self.counter_threshold.is_finite() {
            self.counter_threshold.clamp(0.0, 1.0)
        } else {
            default_counter_threshold()
        }
    }
}

fn default_restore_retry_ms() -> Vec<u32> {
    vec![50, 200]
}

fn default_counter_duration_ms() -> u32 {
    2_000
}

fn default_counter_threshold() -> f64 {
    0.3
}

fn default_header_offset_fallback_px() -> f64 {
    70.0
}

fn default_header_scrolled_px() -> f64 {
    50.0
}

fn default_dropdown_resize_debounce_ms() -> u32 {
    250
}

fn default_search_focus_delay_ms() -> u32 {
    100
}

fn default_gallery_fade_ms() -> u32 {
    150
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_config_matches_defaults() {
        assert_eq!(StorefrontConfig::load_from_static(), StorefrontConfig::default());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = StorefrontConfig::from_json(r#"{ "counter_duration_ms": 500 }"#).unwrap();
        assert_eq!(cfg.counter_duration_ms, 500);
        assert_eq!(cfg.restore_retry_ms, vec![50, 200]);
        assert!((cfg.header_offset_fallback_px - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn restore_delays_are_bounded() {
        let cfg = StorefrontConfig {
            restore_retry_ms: vec![200, 50, 50, 9_000, 10, 20, 30],
            ..StorefrontConfig::default()
        };
        assert_eq!(cfg.restore_delays(), vec![10, 20, 30, 50]);
    }

    #[test]
    fn counter_threshold_is_clamped() {
        let cfg = StorefrontConfig {
            counter_threshold: 4.0,
            ..StorefrontConfig::default()
        };
        assert!((cfg.counter_threshold_clamped() - 1.0).abs() < f64::EPSILON);
        let cfg = StorefrontConfig {
            counter_threshold: f64::NAN,
            ..StorefrontConfig::default()
        };
        assert!((cfg.counter_threshold_clamped() - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(StorefrontConfig::from_json("[").is_err());
    }
}
