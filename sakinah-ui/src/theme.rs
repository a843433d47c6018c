//! Light/dark theme toggle, persisted and subject to the page lock.

use sakinah_core::{Theme, THEME_KEY};
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom;
use crate::page::PageContext;

const TOGGLES: &str = "[data-theme-toggle], .js-theme-toggle";

pub fn init(page: &PageContext) -> Result<(), JsValue> {
    let toggles = dom::query_all_in(&page.document, TOGGLES)?;
    if toggles.is_empty() {
        return Ok(());
    }
    let Some(root) = page.root() else {
        return Ok(());
    };

    let saved = page.store.get(THEME_KEY);
    if let Some(theme) = page.theme.initial(saved.as_deref()) {
        root.set_attribute("data-theme", theme.as_str())?;
    }

    for toggle in &toggles {
        let page = page.clone();
        let root = root.clone();
        let toggles = toggles.clone();
        dom::listen(toggle, "click", move |_| {
            let current = root.get_attribute("data-theme");
            let prefers_dark = dom::media_matches(&page.window, "(prefers-color-scheme: dark)");
            let Some(next) = page.theme.next(current.as_deref(), prefers_dark) else {
                return;
            };
            if let Err(err) = apply(&page, &root, &toggles, next) {
                log::warn!("theme switch failed: {err:?}");
            }
        })?;
    }
    Ok(())
}

fn apply(page: &PageContext, root: &Element, toggles: &[Element], theme: Theme) -> Result<(), JsValue> {
    root.set_attribute("data-theme", theme.as_str())?;
    page.store.set(THEME_KEY, theme.as_str());
    let pressed = if theme.is_dark() { "true" } else { "false" };
    for toggle in toggles {
        toggle.set_attribute("aria-pressed", pressed)?;
    }
    log::debug!("theme now {theme}");
    Ok(())
}
