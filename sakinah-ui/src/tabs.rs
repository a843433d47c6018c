//! Features tablist: roving `aria-selected` and matching panels.

use std::rc::Rc;

use sakinah_core::tabs::{arrow_target, initial_tab};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, FocusOptions, HtmlElement, KeyboardEvent};

use crate::dom;
use crate::page::PageContext;

struct Tabs {
    document: Document,
    tabs: Vec<Element>,
    panels: Vec<Element>,
}

impl Tabs {
    fn activate(&self, selected: usize) -> Result<(), JsValue> {
        let Some(tab) = self.tabs.get(selected) else {
            return Ok(());
        };
        for (index, candidate) in self.tabs.iter().enumerate() {
            let is_selected = index == selected;
            candidate.set_attribute("aria-selected", if is_selected { "true" } else { "false" })?;
            candidate.set_attribute("tabindex", if is_selected { "0" } else { "-1" })?;
        }
        for panel in &self.panels {
            panel.class_list().remove_1("is-active")?;
        }

        let feature = tab.get_attribute("data-feature").unwrap_or_default();
        let Some(panel) = self
            .panels
            .iter()
            .find(|panel| panel.get_attribute("data-feature-panel").as_deref() == Some(feature.as_str()))
        else {
            return Ok(());
        };

        for other in &self.panels {
            set_hidden(other, true);
        }
        set_hidden(panel, false);
        panel.class_list().add_1("is-active")?;
        if let Some(html) = panel.dyn_ref::<HtmlElement>() {
            let options = FocusOptions::new();
            options.set_prevent_scroll(true);
            html.focus_with_options(&options)?;
        }
        Ok(())
    }

    fn is_rtl(&self) -> bool {
        self.document
            .document_element()
            .and_then(|root| root.get_attribute("dir"))
            .is_some_and(|dir| dir == "rtl")
    }
}

fn set_hidden(element: &Element, hidden: bool) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        html.set_hidden(hidden);
    }
}

pub fn init(page: &PageContext) -> Result<(), JsValue> {
    let Some(tablist) = page.document.query_selector(".features-tablist")? else {
        return Ok(());
    };
    let tabs = Rc::new(Tabs {
        document: page.document.clone(),
        tabs: dom::query_all(&tablist, "[role=\"tab\"]")?,
        panels: dom::query_all_in(&page.document, "[data-feature-panel]")?,
    });

    for (index, tab) in tabs.tabs.iter().enumerate() {
        let on_click = Rc::clone(&tabs);
        dom::listen(tab, "click", move |_| {
            if let Err(err) = on_click.activate(index) {
                log::warn!("tab activation failed: {err:?}");
            }
        })?;

        let on_key = Rc::clone(&tabs);
        dom::listen(tab, "keydown", move |event| {
            let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let Some(next) =
                arrow_target(index, on_key.tabs.len(), &key_event.key(), on_key.is_rtl())
            else {
                return;
            };
            event.prevent_default();
            dom::focus(&on_key.tabs[next]);
            if let Err(err) = on_key.activate(next) {
                log::warn!("tab activation failed: {err:?}");
            }
        })?;
    }

    let selected: Vec<bool> = tabs
        .tabs
        .iter()
        .map(|tab| tab.get_attribute("aria-selected").as_deref() == Some("true"))
        .collect();
    if let Some(initial) = initial_tab(&selected) {
        tabs.activate(initial)?;
    }
    Ok(())
}
