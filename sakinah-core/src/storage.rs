//! Persistence seam for the remembered locale and theme.

use std::cell::RefCell;
use std::collections::HashMap;

pub const LANG_KEY: &str = "lang";
pub const THEME_KEY: &str = "skn-theme";

/// Browser-local key/value persistence. Writes are best effort: a full or
/// disabled store must not break the page.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// In-memory store used off the browser.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_overwrites() {
        let store = MemoryStore::default();
        assert_eq!(store.get(THEME_KEY), None);
        store.set(THEME_KEY, "dark");
        store.set(THEME_KEY, "light");
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
    }
}
