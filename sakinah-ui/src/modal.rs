//! Pre-check modal with Escape, backdrop close and a Tab focus trap.

use std::cell::RefCell;
use std::rc::Rc;

use sakinah_core::focus::trap_target;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, KeyboardEvent};

use crate::dom;
use crate::page::PageContext;

const FOCUSABLE: &str = "a,button,input,select,textarea,[tabindex]:not([tabindex=\"-1\"])";

struct Modal {
    document: Document,
    modal: Element,
    dialog: Option<Element>,
    last_active: RefCell<Option<Element>>,
}

impl Modal {
    fn is_open(&self) -> bool {
        self.modal.get_attribute("data-state").as_deref() == Some("open")
    }

    fn focusables(&self) -> Vec<Element> {
        self.dialog
            .as_ref()
            .and_then(|dialog| dom::query_all(dialog, FOCUSABLE).ok())
            .unwrap_or_default()
    }

    fn open(&self) -> Result<(), JsValue> {
        *self.last_active.borrow_mut() = self.document.active_element();
        self.modal.set_attribute("data-state", "open")?;
        if let Some(body) = self.document.body() {
            body.class_list().add_1("is-modal-open")?;
        }
        if let Some(first) = self.focusables().first() {
            dom::focus(first);
        }
        Ok(())
    }

    fn close(&self) -> Result<(), JsValue> {
        self.modal.remove_attribute("data-state")?;
        if let Some(body) = self.document.body() {
            body.class_list().remove_1("is-modal-open")?;
        }
        if let Some(previous) = self.last_active.borrow().as_ref() {
            dom::focus(previous);
        }
        Ok(())
    }

    fn trap(&self, event: &KeyboardEvent) {
        if event.key() != "Tab" {
            return;
        }
        let focusables = self.focusables();
        let active = self.document.active_element();
        let current = active
            .as_ref()
            .and_then(|active| focusables.iter().position(|candidate| candidate == active));
        if let Some(target) = trap_target(current, focusables.len(), event.shift_key()) {
            event.prevent_default();
            dom::focus(&focusables[target]);
        }
    }
}

fn report(result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::warn!("modal update failed: {err:?}");
    }
}

pub fn init(page: &PageContext) -> Result<(), JsValue> {
    let Some(element) = page.document.query_selector("[data-precheck-modal]")? else {
        return Ok(());
    };
    let openers = dom::query_all_in(&page.document, "[data-precheck-open]")?;
    if openers.is_empty() {
        return Ok(());
    }

    let modal = Rc::new(Modal {
        document: page.document.clone(),
        dialog: element.query_selector(".precheck-dialog")?,
        modal: element,
        last_active: RefCell::new(None),
    });

    for opener in &openers {
        let modal = Rc::clone(&modal);
        dom::listen(opener, "click", move |_| report(modal.open()))?;
    }

    if let Some(closer) = modal.modal.query_selector(".modal-close")? {
        let on_close = Rc::clone(&modal);
        dom::listen(&closer, "click", move |_| report(on_close.close()))?;
    }

    let on_backdrop = Rc::clone(&modal);
    dom::listen(&modal.modal, "click", move |event| {
        let on_backdrop_itself = dom::event_element(&event).is_some_and(|target| target == on_backdrop.modal);
        if on_backdrop_itself {
            report(on_backdrop.close());
        }
    })?;

    let on_escape = Rc::clone(&modal);
    dom::listen(&page.window, "keydown", move |event| {
        let is_escape = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|key_event| key_event.key() == "Escape");
        if is_escape && on_escape.is_open() {
            report(on_escape.close());
        }
    })?;

    if let Some(dialog) = modal.dialog.clone() {
        let on_tab = Rc::clone(&modal);
        dom::listen(&dialog, "keydown", move |event| {
            if let Some(key_event) = event.dyn_ref::<KeyboardEvent>() {
                on_tab.trap(key_event);
            }
        })?;
    }
    Ok(())
}
