//! Applies the active locale to `[data-skey]` nodes and wires the toggle.

use sakinah_core::{Locale, LANG_KEY};
use wasm_bindgen::prelude::*;

use crate::dom;
use crate::page::PageContext;

/// Switches to `requested` (or the locked locale) and rewrites the page text.
pub fn set_locale(page: &PageContext, requested: Locale) -> Result<Locale, JsValue> {
    let locale = page.i18n.borrow_mut().set_locale(requested);
    page.store.set(LANG_KEY, locale.code());

    if let Some(root) = page.root() {
        root.set_attribute("lang", locale.code())?;
        root.set_attribute("dir", locale.dir())?;
    }
    apply(page)?;
    Ok(locale)
}

fn apply(page: &PageContext) -> Result<(), JsValue> {
    let i18n = page.i18n.borrow();
    for node in dom::query_all_in(&page.document, "[data-skey]")? {
        let Some(key) = node.get_attribute("data-skey") else {
            continue;
        };
        let Some(value) = i18n.lookup(&key) else {
            continue;
        };
        if node.has_attribute("data-allow-html") {
            node.set_inner_html(value);
        } else {
            node.set_text_content(Some(value));
        }
    }

    if let Some(label) = page.document.query_selector("[data-lang-toggle] span")? {
        label.set_text_content(Some(i18n.locale().label()));
    }
    Ok(())
}

pub fn init(page: &PageContext) -> Result<(), JsValue> {
    let saved = page
        .store
        .get(LANG_KEY)
        .and_then(|code| code.parse::<Locale>().ok())
        .unwrap_or_default();
    set_locale(page, saved)?;

    let Some(toggle) = page.document.query_selector("[data-lang-toggle]")? else {
        return Ok(());
    };
    let page = page.clone();
    dom::listen(&toggle, "click", move |_| {
        if page.i18n.borrow().is_locked() {
            return;
        }
        let next = page.i18n.borrow().locale().toggled();
        if let Err(err) = set_locale(&page, next) {
            log::warn!("locale switch failed: {err:?}");
        }
    })
}
