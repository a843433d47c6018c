//! Mobile navigation drawer.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent};

use crate::dom;
use crate::page::PageContext;

struct Drawer {
    document: Document,
    drawer: Element,
    opener: Option<Element>,
    overlay: Option<Element>,
}

impl Drawer {
    fn set_open(&self, open: bool) -> Result<(), JsValue> {
        dom::toggle_class(&self.drawer, "is-open", open)?;
        self.drawer
            .set_attribute("aria-hidden", if open { "false" } else { "true" })?;
        if let Some(body) = self.document.body() {
            dom::toggle_class(&body, "drawer-open", open)?;
            body.style()
                .set_property("overflow", if open { "hidden" } else { "" })?;
        }
        if let Some(overlay) = self.overlay.as_ref().and_then(|el| el.dyn_ref::<HtmlElement>()) {
            overlay.set_hidden(!open);
        }
        if let Some(opener) = &self.opener {
            opener.set_attribute("aria-expanded", if open { "true" } else { "false" })?;
        }
        Ok(())
    }
}

fn report(result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::warn!("drawer update failed: {err:?}");
    }
}

pub fn init(page: &PageContext) -> Result<(), JsValue> {
    let Some(element) = page.document.get_element_by_id("nav-drawer") else {
        return Ok(());
    };
    let drawer = Rc::new(Drawer {
        document: page.document.clone(),
        drawer: element,
        opener: page.document.query_selector(".js-nav-open")?,
        overlay: page.document.query_selector(".nav-overlay")?,
    });

    if let Some(opener) = drawer.opener.clone() {
        let on_open = Rc::clone(&drawer);
        dom::listen(&opener, "click", move |_| report(on_open.set_open(true)))?;
    }
    for closer in dom::query_all_in(&page.document, ".js-nav-close")? {
        let on_close = Rc::clone(&drawer);
        dom::listen(&closer, "click", move |_| report(on_close.set_open(false)))?;
    }

    let on_escape = Rc::clone(&drawer);
    dom::listen(&page.document, "keydown", move |event| {
        let is_escape = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|key_event| key_event.key() == "Escape");
        if is_escape {
            report(on_escape.set_open(false));
        }
    })?;

    let on_link = Rc::clone(&drawer);
    dom::listen(&drawer.drawer, "click", move |event| {
        let on_link_target = dom::event_element(&event)
            .and_then(|target| target.matches("a, a *").ok())
            .unwrap_or(false);
        if on_link_target {
            report(on_link.set_open(false));
        }
    })?;

    copy_primary_links(&page.document)
}

/// Fills the drawer with the header's navigation links, minus buttons.
fn copy_primary_links(document: &Document) -> Result<(), JsValue> {
    let Some(drawer_links) = document.query_selector(".nav-drawer__links")? else {
        return Ok(());
    };
    let Some(header_nav) = document.query_selector(".site-header nav.primary-nav")? else {
        return Ok(());
    };
    let links: Vec<Element> = dom::query_all(&header_nav, "a")?
        .into_iter()
        .filter(|link| !link.class_list().contains("btn"))
        .collect();
    if links.is_empty() {
        return Ok(());
    }

    drawer_links.set_inner_html("");
    for link in links {
        let copy = link.clone_node_with_deep(true)?;
        if let Some(copy) = copy.dyn_ref::<Element>() {
            copy.remove_attribute("class")?;
        }
        drawer_links.append_child(&copy)?;
    }
    log::debug!("drawer links copied from header");
    Ok(())
}
