//! Page-wide configuration and its defaults.

use serde::{Deserialize, Serialize};

use crate::error::SakinahError;
use crate::i18n::Locale;
use crate::theme::Theme;

/// Behaviour switches for one page session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Locale the page is pinned to; `None` lets visitors switch.
    pub lock_locale: Option<Locale>,
    /// Theme the page is pinned to; `None` lets visitors switch.
    pub lock_theme: Option<Theme>,
    pub timeline: TimelineConfig,
    pub reveal: RevealConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            lock_locale: Some(Locale::Ar),
            lock_theme: Some(Theme::Light),
            timeline: TimelineConfig::default(),
            reveal: RevealConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Height of the activation band around the viewport midpoint, as a
    /// fraction of the viewport height.
    pub focus_band: f64,
    /// Assign rows and sides to illustrations paired with steps.
    pub pair_visuals: bool,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            focus_band: 0.2,
            pair_visuals: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f64,
    pub root_margin: String,
    pub counter_threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.12,
            root_margin: "0px 0px -10% 0px".to_string(),
            counter_threshold: 0.4,
        }
    }
}

impl PageConfig {
    /// Configuration with both toggles usable.
    pub fn unlocked() -> Self {
        Self {
            lock_locale: None,
            lock_theme: None,
            ..Self::default()
        }
    }

    pub fn is_locked(&self) -> bool {
        self.lock_locale.is_some() || self.lock_theme.is_some()
    }

    pub fn validate(&self) -> Result<(), SakinahError> {
        let band = self.timeline.focus_band;
        if !(band > 0.0 && band <= 1.0) {
            return Err(SakinahError::Config(format!(
                "timeline focus band must be in (0, 1], got {band}"
            )));
        }
        for (name, value) in [
            ("reveal threshold", self.reveal.threshold),
            ("counter threshold", self.reveal.counter_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SakinahError::Config(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_locks_arabic_light() {
        let config = PageConfig::default();
        assert_eq!(config.lock_locale, Some(Locale::Ar));
        assert_eq!(config.lock_theme, Some(Theme::Light));
        assert!(config.is_locked());
        assert!(!PageConfig::unlocked().is_locked());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: PageConfig =
            serde_json::from_str(r#"{"lock_theme": null, "timeline": {"pair_visuals": true}}"#)
                .expect("config");
        assert_eq!(config.lock_locale, Some(Locale::Ar));
        assert_eq!(config.lock_theme, None);
        assert!(config.timeline.pair_visuals);
        assert_eq!(config.timeline.focus_band, 0.2);
    }

    #[test]
    fn validate_rejects_bad_band_and_thresholds() {
        let mut config = PageConfig::default();
        config.timeline.focus_band = 0.0;
        assert!(config.validate().is_err());

        let mut config = PageConfig::default();
        config.reveal.counter_threshold = 1.5;
        assert!(config.validate().is_err());
    }
}
