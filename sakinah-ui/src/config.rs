//! Partial configuration handed over from JavaScript.

use sakinah_core::{Locale, PageConfig, SakinahError, Theme};
use serde::Deserialize;

/// Shape accepted by `start_with_config`. Every field is optional; missing
/// fields keep the defaults of [`PageConfig`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsPageConfig {
    /// `false` lifts both the locale and the theme lock.
    #[serde(default)]
    pub locked: Option<bool>,
    #[serde(default)]
    pub lock_locale: Option<String>,
    #[serde(default)]
    pub lock_theme: Option<String>,
    #[serde(default)]
    pub timeline_focus_band: Option<f64>,
    #[serde(default)]
    pub pair_visuals: Option<bool>,
}

impl TryFrom<JsPageConfig> for PageConfig {
    type Error = SakinahError;

    fn try_from(cfg: JsPageConfig) -> Result<Self, Self::Error> {
        let mut base = PageConfig::default();
        if cfg.locked == Some(false) {
            base.lock_locale = None;
            base.lock_theme = None;
        }
        if let Some(locale) = cfg.lock_locale {
            base.lock_locale = Some(locale.parse::<Locale>()?);
        }
        if let Some(theme) = cfg.lock_theme {
            base.lock_theme = Some(theme.parse::<Theme>()?);
        }
        if let Some(band) = cfg.timeline_focus_band {
            base.timeline.focus_band = band;
        }
        if let Some(pair) = cfg.pair_visuals {
            base.timeline.pair_visuals = pair;
        }
        base.validate()?;
        Ok(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<PageConfig, SakinahError> {
        let cfg: JsPageConfig = serde_json::from_str(json).expect("js config");
        PageConfig::try_from(cfg)
    }

    #[test]
    fn empty_object_keeps_defaults() {
        assert_eq!(parse("{}").expect("config"), PageConfig::default());
    }

    #[test]
    fn unlocking_then_relocking_theme() {
        let config = parse(r#"{"locked": false, "lockTheme": "dark"}"#).expect("config");
        assert_eq!(config.lock_locale, None);
        assert_eq!(config.lock_theme, Some(Theme::Dark));
    }

    #[test]
    fn timeline_options_pass_through() {
        let config = parse(r#"{"timelineFocusBand": 0.5, "pairVisuals": true}"#).expect("config");
        assert_eq!(config.timeline.focus_band, 0.5);
        assert!(config.timeline.pair_visuals);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            parse(r#"{"lockLocale": "fr"}"#),
            Err(SakinahError::UnknownLocale(_))
        ));
        assert!(matches!(
            parse(r#"{"timelineFocusBand": 3.0}"#),
            Err(SakinahError::Config(_))
        ));
    }
}
