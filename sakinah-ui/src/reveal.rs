//! Reveal-on-scroll classes and the hero counters.

use std::cell::Cell;
use std::rc::Rc;

use js_sys::Array;
use sakinah_core::{Counter, TrackEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window};

use crate::dom;
use crate::page::PageContext;
use crate::track::track;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

pub fn init(page: &PageContext) -> Result<(), JsValue> {
    if let Some(body) = page.document.body() {
        body.class_list().add_1("has-js")?;
    }
    reveal_sections(page)?;

    if dom::media_matches(&page.window, "(prefers-reduced-motion: reduce)") {
        log::debug!("reduced motion: counters stay static");
        return Ok(());
    }
    animate_counters(page)
}

fn observer(callback: &ObserverCallback, threshold: f64, root_margin: Option<&str>) -> Result<IntersectionObserver, JsValue> {
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }
    IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
}

fn entering(entries: &Array) -> impl Iterator<Item = Element> + '_ {
    entries
        .iter()
        .map(|entry| entry.unchecked_into::<IntersectionObserverEntry>())
        .filter(|entry| entry.is_intersecting())
        .map(|entry| entry.target())
}

fn reveal_sections(page: &PageContext) -> Result<(), JsValue> {
    let targets = dom::query_all_in(&page.document, "[data-reveal], [data-hero-visual]")?;
    if !dom::supports(&page.window, "IntersectionObserver") {
        for target in &targets {
            target.class_list().add_1("is-visible")?;
        }
        return Ok(());
    }

    let callback: ObserverCallback = Closure::new(|entries: Array, observer: IntersectionObserver| {
        for target in entering(&entries) {
            if let Err(err) = target.class_list().add_1("is-visible") {
                log::debug!("reveal failed: {err:?}");
            }
            observer.unobserve(&target);
        }
    });
    let reveal = &page.config.reveal;
    let io = observer(&callback, reveal.threshold, Some(reveal.root_margin.as_str()))?;
    callback.forget();
    for target in &targets {
        io.observe(target);
    }
    Ok(())
}

fn animate_counters(page: &PageContext) -> Result<(), JsValue> {
    let counters = dom::query_all_in(&page.document, "[data-count]")?;
    let hero = page.document.query_selector(".hero-counters")?;

    if !dom::supports(&page.window, "IntersectionObserver") {
        for counter in counters {
            run_counter(page.window.clone(), counter);
        }
        return Ok(());
    }

    let window = page.window.clone();
    let hero_tracked = Rc::new(Cell::new(false));
    let callback: ObserverCallback = Closure::new(move |entries: Array, observer: IntersectionObserver| {
        for target in entering(&entries) {
            if target.matches("[data-count]").unwrap_or(false) {
                run_counter(window.clone(), target.clone());
                observer.unobserve(&target);
            }
            if !hero_tracked.get() && target.class_list().contains("hero-counters") {
                hero_tracked.set(true);
                track(&window, &TrackEvent::HeroCountersView);
                observer.unobserve(&target);
            }
        }
    });
    let io = observer(&callback, page.config.reveal.counter_threshold, None)?;
    callback.forget();

    for counter in &counters {
        io.observe(counter);
    }
    if let Some(hero) = hero {
        io.observe(&hero);
    }
    Ok(())
}

fn run_counter(window: Window, node: Element) {
    let counter = Counter::from_attributes(
        node.get_attribute("data-to").as_deref(),
        node.get_attribute("data-suffix").as_deref(),
        node.get_attribute("data-final-suffix").as_deref(),
    );
    let start = window.performance().map(|perf| perf.now()).unwrap_or(0.0);
    schedule_frame(window, node, Rc::new(counter), start);
}

fn schedule_frame(window: Window, node: Element, counter: Rc<Counter>, start: f64) {
    let next_window = window.clone();
    let scheduled = dom::next_frame(&window, move |now: f64| {
        let frame = counter.frame(now - start);
        node.set_text_content(Some(&frame.text));
        if !frame.done {
            schedule_frame(next_window, node, counter, start);
        }
    });
    if let Err(err) = scheduled {
        log::debug!("counter frame not scheduled: {err:?}");
    }
}
