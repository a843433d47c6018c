//! Journey timeline controller: binds scroll, pointer, keyboard and URL
//! fragment events to [`TimelineState`] and renders the rail indicator.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use sakinah_core::{
    focus_band_root_margin, nearest_to_center, pair_visuals, progress_offset, ActivationSource,
    Rect, Side, SiblingKind, StepKey, TimelineState, Transition,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    KeyboardEvent, ResizeObserver, Window,
};

use crate::dom;
use crate::page::PageContext;

const ROOT: &str = "[data-timeline]";
const STEP: &str = ".timeline-step";
const STEP_CLASS: &str = "timeline-step";
const MARKER: &str = ".timeline-marker";
const RAIL: &str = ".timeline-rail, .timeline-track";
const FILL: &str = ".timeline-fill, .timeline-progress-bar";
const DOT: &str = ".timeline-dot";
const VISUAL: &str = "[data-timeline-visual]";
const PREV: &str = "[data-direction=\"prev\"]";
const NEXT: &str = "[data-direction=\"next\"]";
const NAV: &str = ".timeline-nav-button";

struct Controller {
    window: Window,
    state: TimelineState,
    root: Element,
    steps: Vec<Element>,
    markers: Vec<Option<Element>>,
    rail: Option<Element>,
    fill: Option<Element>,
    dot: Option<Element>,
    prev: Option<Element>,
    next: Option<Element>,
    nav: Vec<Element>,
    pair_visuals: bool,
}

type Shared = Rc<RefCell<Controller>>;

impl Controller {
    fn activate(&mut self, index: usize, source: ActivationSource) {
        let transition = self.state.set_active(index, source);
        self.apply(&transition);
    }

    fn apply(&self, transition: &Transition) {
        if transition.flags_changed() {
            report(self.render_flags());
        }
        if transition.needs_progress() {
            self.refresh_layout();
        }
        if let Some(fragment) = transition.fragment() {
            report(self.replace_fragment(fragment));
        }
    }

    fn render_flags(&self) -> Result<(), JsValue> {
        for (step, flags) in self.steps.iter().zip(self.state.all_flags()) {
            dom::toggle_class(step, "is-active", flags.active)?;
            dom::toggle_class(step, "is-complete", flags.complete)?;
            if flags.active {
                step.set_attribute("aria-current", "step")?;
            } else {
                step.remove_attribute("aria-current")?;
            }
        }
        for (index, button) in self.nav.iter().enumerate() {
            dom::toggle_class(button, "is-active", self.state.active() == Some(index))?;
        }
        if let Some(prev) = &self.prev {
            set_disabled(prev, self.state.at_first())?;
        }
        if let Some(next) = &self.next {
            set_disabled(next, self.state.at_last())?;
        }
        Ok(())
    }

    fn refresh_layout(&self) {
        report(self.render_progress());
        if self.pair_visuals {
            report(self.render_pairs());
        }
    }

    fn render_progress(&self) -> Result<(), JsValue> {
        let Some(active) = self.state.active() else {
            return Ok(());
        };
        if self.fill.is_none() && self.dot.is_none() {
            return Ok(());
        }
        let anchor = match &self.markers[active] {
            Some(marker) => dom::rect_of(marker),
            None => dom::rect_of(&self.steps[active]),
        };
        let track = dom::rect_of(self.rail.as_ref().unwrap_or(&self.root));
        let offset = progress_offset(anchor, track);

        if let Some(fill) = &self.fill {
            dom::set_style(fill, "height", &format!("{offset:.2}px"))?;
        }
        if let Some(dot) = &self.dot {
            dom::set_style(dot, "transform", &format!("translateY({offset:.2}px)"))?;
        }
        Ok(())
    }

    /// Puts every step and its illustration on a shared grid row, on
    /// opposite sides.
    fn render_pairs(&self) -> Result<(), JsValue> {
        let Some(list) = self.steps[0].parent_element() else {
            return Ok(());
        };
        let children = list.children();
        let siblings: Vec<Element> = (0..children.length())
            .filter_map(|index| children.item(index))
            .collect();
        let kinds: Vec<SiblingKind> = siblings.iter().map(sibling_kind).collect();
        // Only steps sharing the first step's parent take part.
        let declared: Vec<Option<Side>> = siblings
            .iter()
            .zip(&kinds)
            .filter(|(_, kind)| **kind == SiblingKind::Step)
            .map(|(step, _)| step.get_attribute("data-side").as_deref().and_then(Side::parse))
            .collect();

        for placement in pair_visuals(&kinds, &declared) {
            let row = placement.row.to_string();
            let step = &siblings[placement.step_sibling];
            dom::set_style(step, "grid-row", &row)?;
            step.set_attribute("data-side", placement.step_side.as_str())?;

            if let Some(visual) = placement.visual_sibling.map(|index| &siblings[index]) {
                dom::set_style(visual, "grid-row", &row)?;
                visual.set_attribute("data-side", placement.visual_side.as_str())?;
            }
        }
        Ok(())
    }

    fn replace_fragment(&self, fragment: &str) -> Result<(), JsValue> {
        let history = self.window.history()?;
        history.replace_state_with_url(&JsValue::NULL, "", Some(&format!("#{fragment}")))
    }

    fn index_of(&self, element: &Element) -> Option<usize> {
        self.steps.iter().position(|step| step == element)
    }

    fn step_rects(&self) -> Vec<Rect> {
        self.steps.iter().map(dom::rect_of).collect()
    }
}

fn sibling_kind(element: &Element) -> SiblingKind {
    if element.class_list().contains(STEP_CLASS) {
        return SiblingKind::Step;
    }
    let has_visual = element.matches(VISUAL).unwrap_or(false)
        || element.query_selector(VISUAL).ok().flatten().is_some();
    if has_visual {
        SiblingKind::Visual
    } else {
        SiblingKind::Other
    }
}

fn set_disabled(button: &Element, disabled: bool) -> Result<(), JsValue> {
    if disabled {
        button.set_attribute("disabled", "")
    } else {
        button.remove_attribute("disabled")
    }
}

fn step_id(step: &Element, index: usize) -> String {
    step.get_attribute("data-step-id")
        .filter(|id| !id.is_empty())
        .or_else(|| Some(step.id()).filter(|id| !id.is_empty()))
        .unwrap_or_else(|| format!("step-{}", index + 1))
}

fn report(result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::warn!("timeline update failed: {err:?}");
    }
}

/// Runs `f` against the controller unless it is already borrowed by an
/// outer handler.
fn with_controller(shared: &Shared, f: impl FnOnce(&mut Controller)) {
    match shared.try_borrow_mut() {
        Ok(mut controller) => f(&mut controller),
        Err(_) => log::debug!("timeline busy, event dropped"),
    }
}

pub fn init(page: &PageContext) -> Result<(), JsValue> {
    let Some(root) = page.document.query_selector(ROOT)? else {
        return Ok(());
    };
    let steps = dom::query_all(&root, STEP)?;
    let Some(state) = TimelineState::new(steps.iter().enumerate().map(|(i, step)| step_id(step, i)))
    else {
        log::debug!("timeline has no steps");
        return Ok(());
    };

    let markers = steps
        .iter()
        .map(|step| step.query_selector(MARKER).ok().flatten())
        .collect();
    let controller = Controller {
        window: page.window.clone(),
        state,
        markers,
        rail: root.query_selector(RAIL)?,
        fill: root.query_selector(FILL)?,
        dot: root.query_selector(DOT)?,
        prev: root.query_selector(PREV)?,
        next: root.query_selector(NEXT)?,
        nav: dom::query_all(&root, NAV)?,
        pair_visuals: page.config.timeline.pair_visuals || root.has_attribute("data-timeline-pairs"),
        steps,
        root,
    };

    let hash = page.window.location().hash().ok();
    let marked = controller
        .steps
        .iter()
        .position(|step| step.class_list().contains("is-active"));

    let shared: Shared = Rc::new(RefCell::new(controller));
    with_controller(&shared, |c| {
        let transition = c.state.activate_initial(hash.as_deref(), marked);
        c.apply(&transition);
        log::info!(
            "timeline: {} steps, starting at {:?}",
            c.state.len(),
            c.state.active()
        );
    });

    bind_steps(&shared)?;
    bind_controls(&shared)?;
    if dom::supports(&page.window, "IntersectionObserver") {
        observe_focus_band(&shared, page.config.timeline.focus_band)?;
    } else {
        follow_scroll(&shared, &page.window)?;
    }
    follow_fragment(&shared, &page.window)?;
    follow_layout(&shared, &page.window)?;
    Ok(())
}

fn bind_steps(shared: &Shared) -> Result<(), JsValue> {
    let steps = shared.borrow().steps.clone();
    for (index, step) in steps.iter().enumerate() {
        if !step.has_attribute("tabindex") {
            step.set_attribute("tabindex", "0")?;
        }
        if !step.has_attribute("role") {
            step.set_attribute("role", "button")?;
        }

        let on_click = Rc::clone(shared);
        dom::listen(step, "click", move |_| {
            with_controller(&on_click, |c| c.activate(index, ActivationSource::Pointer));
        })?;

        let on_key = Rc::clone(shared);
        dom::listen(step, "keydown", move |event| {
            let Some(key) = event
                .dyn_ref::<KeyboardEvent>()
                .and_then(|key_event| StepKey::from_key(&key_event.key()))
            else {
                return;
            };
            event.prevent_default();
            with_controller(&on_key, |c| {
                let target = c.state.key_target(index, key);
                c.activate(target, ActivationSource::Keyboard);
                if key != StepKey::Activate {
                    dom::focus(&c.steps[target]);
                }
            });
        })?;
    }
    Ok(())
}

/// Prev/next buttons and the numbered nav list, when the markup has them.
fn bind_controls(shared: &Shared) -> Result<(), JsValue> {
    let (prev, next, nav) = {
        let c = shared.borrow();
        (c.prev.clone(), c.next.clone(), c.nav.clone())
    };
    for (button, key) in [(prev, StepKey::Previous), (next, StepKey::Next)] {
        let Some(button) = button else {
            continue;
        };
        let on_click = Rc::clone(shared);
        dom::listen(&button, "click", move |_| {
            with_controller(&on_click, |c| {
                let Some(active) = c.state.active() else {
                    return;
                };
                let target = c.state.key_target(active, key);
                c.activate(target, ActivationSource::Pointer);
            });
        })?;
    }
    for (index, button) in nav.iter().enumerate() {
        let on_click = Rc::clone(shared);
        dom::listen(button, "click", move |_| {
            with_controller(&on_click, |c| c.activate(index, ActivationSource::Pointer));
        })?;
    }
    Ok(())
}

/// Center-band observation. The load-time batch after a deep link is
/// dropped by [`TimelineState::admit_observer_batch`].
fn observe_focus_band(shared: &Shared, band: f64) -> Result<(), JsValue> {
    let on_intersect = Rc::clone(shared);
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, _observer: IntersectionObserver| {
            with_controller(&on_intersect, |c| {
                if !c.state.admit_observer_batch() {
                    return;
                }
                let entered = entries
                    .iter()
                    .map(|entry| entry.unchecked_into::<IntersectionObserverEntry>())
                    .filter(|entry| entry.is_intersecting())
                    .filter_map(|entry| c.index_of(&entry.target()))
                    .last();
                if let Some(index) = entered {
                    c.activate(index, ActivationSource::Scroll);
                }
            });
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_root_margin(&focus_band_root_margin(band));
    options.set_threshold(&JsValue::from_f64(0.0));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    for step in &shared.borrow().steps {
        observer.observe(step);
    }
    Ok(())
}

/// Fallback without `IntersectionObserver`: nearest step to the viewport
/// midpoint on every scroll event.
fn follow_scroll(shared: &Shared, window: &Window) -> Result<(), JsValue> {
    let on_scroll = Rc::clone(shared);
    let viewport = window.clone();
    dom::listen(window, "scroll", move |_| {
        with_controller(&on_scroll, |c| {
            let height = dom::viewport_height(&viewport);
            if let Some(index) = nearest_to_center(&c.step_rects(), height) {
                c.activate(index, ActivationSource::Scroll);
            }
        });
    })
}

fn follow_fragment(shared: &Shared, window: &Window) -> Result<(), JsValue> {
    let on_hash = Rc::clone(shared);
    let location = window.location();
    dom::listen(window, "hashchange", move |_| {
        let Ok(hash) = location.hash() else {
            return;
        };
        with_controller(&on_hash, |c| {
            if let Some(index) = c.state.fragment_target(&hash) {
                c.activate(index, ActivationSource::Fragment);
            }
        });
    })
}

/// Geometry refresh on resize, container reflow and once after first paint.
fn follow_layout(shared: &Shared, window: &Window) -> Result<(), JsValue> {
    let on_resize = Rc::clone(shared);
    dom::listen(window, "resize", move |_| {
        with_controller(&on_resize, |c| c.refresh_layout());
    })?;

    if dom::supports(window, "ResizeObserver") {
        let on_reflow = Rc::clone(shared);
        let callback = Closure::<dyn FnMut(Array, ResizeObserver)>::new(
            move |_entries: Array, _observer: ResizeObserver| {
                with_controller(&on_reflow, |c| c.refresh_layout());
            },
        );
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
        callback.forget();
        observer.observe(&shared.borrow().root);
    }

    let settled = Rc::clone(shared);
    dom::next_frame(window, move |_| {
        with_controller(&settled, |c| c.refresh_layout());
    })
}
