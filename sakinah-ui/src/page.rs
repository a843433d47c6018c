//! Per-session page context and the locale/theme lock.

use std::cell::RefCell;
use std::rc::Rc;

use sakinah_core::{
    Dictionary, I18n, KeyValueStore, PageConfig, ThemeState, LANG_KEY, THEME_KEY,
};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

use crate::dom::{self, LocalStore};

const DICTIONARY_SELECTOR: &str = "script#skn-i18n[type=\"application/json\"]";
const LANG_TOGGLES: &str = ".js-lang, [data-lang-toggle]";
const THEME_TOGGLES: &str = ".js-theme-toggle, [data-theme-toggle]";

/// Everything the component initializers share for one page session.
#[derive(Clone)]
pub struct PageContext {
    pub window: Window,
    pub document: Document,
    pub config: Rc<PageConfig>,
    pub i18n: Rc<RefCell<I18n>>,
    pub theme: ThemeState,
    pub store: Rc<dyn KeyValueStore>,
}

impl PageContext {
    pub fn new(config: PageConfig) -> Result<Self, JsValue> {
        let window = dom::window()?;
        let document = dom::document(&window)?;
        let store: Rc<dyn KeyValueStore> = Rc::new(LocalStore::new(&window));
        let dictionary = read_dictionary(&document);

        Ok(Self {
            i18n: Rc::new(RefCell::new(I18n::new(dictionary, config.lock_locale))),
            theme: ThemeState::new(config.lock_theme),
            config: Rc::new(config),
            window,
            document,
            store,
        })
    }

    pub fn root(&self) -> Option<Element> {
        self.document.document_element()
    }
}

/// Dictionary embedded in the page, or an empty one.
fn read_dictionary(document: &Document) -> Dictionary {
    let Ok(Some(script)) = document.query_selector(DICTIONARY_SELECTOR) else {
        return Dictionary::default();
    };
    let json = script.text_content().unwrap_or_default();
    match Dictionary::from_json(&json) {
        Ok(dictionary) => dictionary,
        Err(err) => {
            log::warn!("ignoring embedded dictionary: {err}");
            Dictionary::default()
        }
    }
}

/// Pins locale and theme according to the configuration and greys out the
/// toggles that would change them.
pub fn apply_lock(page: &PageContext) -> Result<(), JsValue> {
    let config = &page.config;
    if !config.is_locked() {
        return Ok(());
    }
    let Some(root) = page.root() else {
        return Ok(());
    };
    root.set_attribute("data-locked", "true")?;

    if let Some(locale) = config.lock_locale {
        page.store.set(LANG_KEY, locale.code());
        root.set_attribute("lang", locale.code())?;
        root.set_attribute("dir", locale.dir())?;
        for toggle in dom::query_all_in(&page.document, LANG_TOGGLES)? {
            disable(&toggle)?;
        }
    }

    if let Some(theme) = config.lock_theme {
        page.store.set(THEME_KEY, theme.as_str());
        root.set_attribute("data-theme", theme.as_str())?;
        for toggle in dom::query_all_in(&page.document, THEME_TOGGLES)? {
            disable(&toggle)?;
        }
    }

    log::info!(
        "page locked: locale={:?} theme={:?}",
        config.lock_locale,
        config.lock_theme
    );
    Ok(())
}

fn disable(element: &Element) -> Result<(), JsValue> {
    element.set_attribute("aria-disabled", "true")?;
    element.set_attribute("tabindex", "-1")?;
    dom::set_style(element, "pointer-events", "none")?;
    dom::set_style(element, "opacity", "0.45")?;
    Ok(())
}

/// Marks every section for `content-visibility` styling.
pub fn mark_sections(page: &PageContext) -> Result<(), JsValue> {
    for section in dom::query_all_in(&page.document, "section")? {
        section.class_list().add_1("section-cv")?;
    }
    Ok(())
}
