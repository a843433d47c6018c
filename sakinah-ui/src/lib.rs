//! Browser bindings for the Sakinah landing page, compiled to WebAssembly.
//!
//! Markup is rendered by the server; this crate only attaches behaviour to it.

pub mod config;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod drawer;
#[cfg(target_arch = "wasm32")]
mod i18n;
#[cfg(target_arch = "wasm32")]
mod logging;
#[cfg(target_arch = "wasm32")]
mod modal;
#[cfg(target_arch = "wasm32")]
mod page;
#[cfg(target_arch = "wasm32")]
mod reveal;
#[cfg(target_arch = "wasm32")]
mod tabs;
#[cfg(target_arch = "wasm32")]
mod theme;
#[cfg(target_arch = "wasm32")]
mod timeline;
#[cfg(target_arch = "wasm32")]
mod track;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::Cell;

    use js_sys::Reflect;
    use sakinah_core::PageConfig;
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::prelude::*;

    use crate::config::JsPageConfig;
    use crate::page::{self, PageContext};
    use crate::{drawer, i18n, logging, modal, reveal, tabs, theme, timeline, track};

    thread_local! {
        static STARTED: Cell<bool> = const { Cell::new(false) };
    }

    /// Attaches every page component with the default configuration.
    #[wasm_bindgen]
    pub fn start() -> Result<(), JsValue> {
        boot(PageConfig::default())
    }

    /// Same as [`start`] with a partial configuration object, e.g.
    /// `{ locked: false, pairVisuals: true }`.
    #[wasm_bindgen]
    pub fn start_with_config(config: JsValue) -> Result<(), JsValue> {
        let cfg: JsPageConfig = if config.is_undefined() || config.is_null() {
            JsPageConfig::default()
        } else {
            from_value(config)
                .map_err(|err| JsValue::from_str(&format!("Could not read config: {err}")))?
        };
        let config = PageConfig::try_from(cfg).map_err(|err| JsValue::from_str(&err.to_string()))?;
        boot(config)
    }

    fn boot(config: PageConfig) -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        logging::init(log::LevelFilter::Info);

        if STARTED.with(|started| started.replace(true)) {
            log::warn!("page already started, ignoring second start");
            return Ok(());
        }

        let page = PageContext::new(config)?;
        if document_loading(&page) {
            let deferred = page.clone();
            crate::dom::listen(&page.document, "DOMContentLoaded", move |_| attach(&deferred))?;
        } else {
            attach(&page);
        }
        Ok(())
    }

    fn document_loading(page: &PageContext) -> bool {
        Reflect::get(&page.document, &JsValue::from_str("readyState"))
            .ok()
            .and_then(|state| state.as_string())
            .is_some_and(|state| state == "loading")
    }

    /// Each component degrades on its own: a failure is logged and the
    /// remaining components still attach.
    fn attach(page: &PageContext) {
        let components: [(&str, fn(&PageContext) -> Result<(), JsValue>); 11] = [
            ("lock", page::apply_lock),
            ("track", |page| track::install_default(&page.window)),
            ("i18n", i18n::init),
            ("theme", theme::init),
            ("cta tracking", track::init),
            ("tabs", tabs::init),
            ("timeline", timeline::init),
            ("reveal", reveal::init),
            ("modal", modal::init),
            ("drawer", drawer::init),
            ("sections", page::mark_sections),
        ];
        for (name, init) in components {
            if let Err(err) = init(page) {
                log::warn!("{name} failed to attach: {err:?}");
            }
        }
        log::info!("page attached");
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_page::{start, start_with_config};

#[cfg(not(target_arch = "wasm32"))]
pub fn start() -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "sakinah-ui only supports the wasm32 target",
    ))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn start_with_config(_: wasm_bindgen::JsValue) -> Result<(), wasm_bindgen::JsValue> {
    start()
}
