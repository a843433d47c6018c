//! Locale selection and the `data-skey` dictionary.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SakinahError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ar,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Ar, Locale::En];

    pub fn code(self) -> &'static str {
        match self {
            Locale::Ar => "ar",
            Locale::En => "en",
        }
    }

    /// Value for the document's `dir` attribute.
    pub fn dir(self) -> &'static str {
        match self {
            Locale::Ar => "rtl",
            Locale::En => "ltr",
        }
    }

    /// Label shown inside the language toggle.
    pub fn label(self) -> &'static str {
        match self {
            Locale::Ar => "العربية",
            Locale::En => "English",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Locale::Ar => Locale::En,
            Locale::En => Locale::Ar,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = SakinahError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ar" => Ok(Locale::Ar),
            "en" => Ok(Locale::En),
            other => Err(SakinahError::UnknownLocale(other.to_string())),
        }
    }
}

/// Translations per locale, keyed by the value of `data-skey`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: BTreeMap<Locale, BTreeMap<String, String>>,
}

/// Keys a locale is missing relative to the union of all locales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleCoverage {
    pub locale: Locale,
    pub translated: usize,
    pub missing: Vec<String>,
}

impl Dictionary {
    /// Parses `{ "ar": { "key": "value" }, "en": { ... } }`.
    pub fn from_json(json: &str) -> Result<Self, SakinahError> {
        let raw: BTreeMap<String, BTreeMap<String, String>> =
            serde_json::from_str(json).map_err(|err| SakinahError::Dictionary(err.to_string()))?;

        let mut entries = BTreeMap::new();
        for (code, values) in raw {
            entries.insert(code.parse::<Locale>()?, values);
        }
        Ok(Self { entries })
    }

    pub fn insert(&mut self, locale: Locale, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .entry(locale)
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Empty strings count as untranslated.
    pub fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.entries
            .get(&locale)?
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn coverage(&self) -> Vec<LocaleCoverage> {
        let all_keys: BTreeSet<&str> = self
            .entries
            .values()
            .flat_map(|values| values.keys().map(String::as_str))
            .collect();

        Locale::ALL
            .into_iter()
            .map(|locale| {
                let missing: Vec<String> = all_keys
                    .iter()
                    .filter(|key| self.lookup(locale, key).is_none())
                    .map(|key| key.to_string())
                    .collect();
                LocaleCoverage {
                    locale,
                    translated: all_keys.len() - missing.len(),
                    missing,
                }
            })
            .collect()
    }
}

/// Localization context for one page session.
#[derive(Debug, Clone, Default)]
pub struct I18n {
    locale: Locale,
    dictionary: Dictionary,
    lock: Option<Locale>,
}

impl I18n {
    pub fn new(dictionary: Dictionary, lock: Option<Locale>) -> Self {
        Self {
            locale: lock.unwrap_or_default(),
            dictionary,
            lock,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }

    /// Switches locale and returns the one actually in effect. A locked
    /// context keeps its locked locale whatever is requested.
    pub fn set_locale(&mut self, requested: Locale) -> Locale {
        let effective = self.lock.unwrap_or(requested);
        if effective != requested {
            log::debug!("i18n: locale locked to {effective}, ignoring {requested}");
        }
        self.locale = effective;
        effective
    }

    pub fn toggle(&mut self) -> Locale {
        self.set_locale(self.locale.toggled())
    }

    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.dictionary.lookup(self.locale, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_skips_empty_values() {
        let mut dictionary = Dictionary::default();
        dictionary.insert(Locale::En, "hero.title", "Calm starts here");
        dictionary.insert(Locale::En, "hero.cta", "");

        assert_eq!(dictionary.lookup(Locale::En, "hero.title"), Some("Calm starts here"));
        assert_eq!(dictionary.lookup(Locale::En, "hero.cta"), None);
        assert_eq!(dictionary.lookup(Locale::Ar, "hero.title"), None);
    }

    #[test]
    fn unknown_locale_in_json_is_rejected() {
        let err = Dictionary::from_json(r#"{"fr": {"a": "b"}}"#).unwrap_err();
        assert!(matches!(err, SakinahError::UnknownLocale(code) if code == "fr"));
        assert!(Dictionary::from_json("[1, 2]").is_err());
    }

    #[test]
    fn unlocked_context_toggles() {
        let mut i18n = I18n::new(Dictionary::default(), None);
        assert_eq!(i18n.locale(), Locale::Ar);
        assert_eq!(i18n.toggle(), Locale::En);
        assert_eq!(i18n.toggle(), Locale::Ar);
    }

    #[test]
    fn locked_context_ignores_requests() {
        let mut i18n = I18n::new(Dictionary::default(), Some(Locale::Ar));
        assert!(i18n.is_locked());
        assert_eq!(i18n.set_locale(Locale::En), Locale::Ar);
        assert_eq!(i18n.toggle(), Locale::Ar);
        assert_eq!(i18n.locale(), Locale::Ar);
    }

    #[test]
    fn locale_metadata() {
        assert_eq!(Locale::Ar.dir(), "rtl");
        assert_eq!(Locale::En.dir(), "ltr");
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!(Locale::En.label(), "English");
    }
}
