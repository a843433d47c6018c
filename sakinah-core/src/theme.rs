//! Light/dark theme selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SakinahError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = SakinahError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(SakinahError::UnknownTheme(other.to_string())),
        }
    }
}

/// Theme context for one page session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeState {
    lock: Option<Theme>,
}

impl ThemeState {
    pub fn new(lock: Option<Theme>) -> Self {
        Self { lock }
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }

    /// Theme currently shown: the `data-theme` attribute, else the system
    /// colour-scheme preference.
    pub fn current(attribute: Option<&str>, prefers_dark: bool) -> Theme {
        attribute
            .and_then(|value| value.parse().ok())
            .unwrap_or(if prefers_dark { Theme::Dark } else { Theme::Light })
    }

    /// Theme to apply at start. A lock wins over the saved preference; an
    /// unreadable saved value is ignored.
    pub fn initial(&self, saved: Option<&str>) -> Option<Theme> {
        self.lock.or_else(|| saved.and_then(|value| value.parse().ok()))
    }

    /// Theme after a toggle press, or `None` while locked.
    pub fn next(&self, attribute: Option<&str>, prefers_dark: bool) -> Option<Theme> {
        if self.is_locked() {
            log::debug!("theme: toggle ignored while locked");
            return None;
        }
        Some(Self::current(attribute, prefers_dark).toggled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_attribute_or_preference() {
        let state = ThemeState::new(None);
        assert_eq!(state.next(Some("dark"), false), Some(Theme::Light));
        assert_eq!(state.next(None, true), Some(Theme::Light));
        assert_eq!(state.next(None, false), Some(Theme::Dark));
        assert_eq!(state.next(Some("sepia"), false), Some(Theme::Dark));
    }

    #[test]
    fn locked_state_refuses_toggle_and_forces_initial() {
        let state = ThemeState::new(Some(Theme::Light));
        assert_eq!(state.next(Some("light"), false), None);
        assert_eq!(state.initial(Some("dark")), Some(Theme::Light));
    }

    #[test]
    fn initial_uses_saved_value() {
        let state = ThemeState::default();
        assert_eq!(state.initial(Some("dark")), Some(Theme::Dark));
        assert_eq!(state.initial(Some("bogus")), None);
        assert_eq!(state.initial(None), None);
    }
}
