//! Fire-and-forget analytics through the page's global `track` function.

use js_sys::{Function, Reflect};
use sakinah_core::TrackEvent;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Window};

use crate::dom;
use crate::page::PageContext;

const TRACK_FN: &str = "track";

/// Installs a console-logging `window.track` unless the page already has one.
pub fn install_default(window: &Window) -> Result<(), JsValue> {
    let key = JsValue::from_str(TRACK_FN);
    if Reflect::get(window, &key)?.is_instance_of::<Function>() {
        return Ok(());
    }
    let fallback = Closure::<dyn Fn(JsValue, JsValue)>::new(|name: JsValue, detail: JsValue| {
        console::info_3(&JsValue::from_str("[track]"), &name, &detail);
    });
    Reflect::set(window, &key, fallback.as_ref().unchecked_ref())?;
    fallback.forget();
    Ok(())
}

/// Calls `window.track(name, detail)`. Any failure is swallowed.
pub fn track(window: &Window, event: &TrackEvent) {
    if let Err(err) = try_track(window, event) {
        log::debug!("track({}) failed: {err:?}", event.name());
    }
}

fn try_track(window: &Window, event: &TrackEvent) -> Result<(), JsValue> {
    let Ok(function) = Reflect::get(window, &JsValue::from_str(TRACK_FN))?.dyn_into::<Function>()
    else {
        return Ok(());
    };
    let detail = event
        .detail()
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())?;
    function.call2(&JsValue::NULL, &JsValue::from_str(event.name()), &detail)?;
    Ok(())
}

/// Hero and feature-card call-to-action clicks.
pub fn init(page: &PageContext) -> Result<(), JsValue> {
    for button in dom::query_all_in(&page.document, "[data-feature-cta]")? {
        let window = page.window.clone();
        let feature = button.get_attribute("data-feature-cta").unwrap_or_default();
        dom::listen(&button, "click", move |_| {
            track(&window, &TrackEvent::FeatureCardCta { feature: feature.clone() });
        })?;
    }

    let Some(hero) = page.document.query_selector("#hero")? else {
        return Ok(());
    };
    for button in dom::query_all_in(&page.document, ".feature-cta")? {
        let window = page.window.clone();
        let feature = button.get_attribute("data-feature-cta").unwrap_or_default();
        dom::listen(&button, "click", move |_| {
            track(&window, &TrackEvent::FeatureCardClick { feature: feature.clone() });
        })?;
    }
    for (selector, event) in [
        (".btn.btn-primary", TrackEvent::HeroPrimaryCta),
        (".btn.btn-soft", TrackEvent::HeroSecondaryCta),
    ] {
        if let Some(button) = hero.query_selector(selector)? {
            let window = page.window.clone();
            dom::listen(&button, "click", move |_| track(&window, &event))?;
        }
    }
    Ok(())
}
