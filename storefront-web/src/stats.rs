//! Percentage counters that animate once the stats band scrolls into view.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::{Array, Reflect};
use storefront_core::{CounterAnimation, parse_target};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::context::PageContext;
use crate::dom;
use crate::error::PageError;

fn now_ms() -> f64 {
    dom::window()
        .and_then(|win| win.performance())
        .map_or_else(js_sys::Date::now, |perf| perf.now())
}

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(slot: &FrameSlot) {
    let Some(win) = dom::window() else {
        return;
    };
    if let Some(callback) = slot.borrow().as_ref()
        && let Err(err) = win.request_animation_frame(callback.as_ref().unchecked_ref())
    {
        log::warn!("animation frame failed: {}", dom::js_error_message(&err));
    }
}

/// Drive one counter from zero to its target on animation frames.
fn animate(element: Element, animation: CounterAnimation) {
    let start = now_ms();
    let slot: FrameSlot = Rc::new(RefCell::new(None));
    let next = Rc::clone(&slot);
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        let frame = animation.frame(timestamp - start);
        element.set_text_content(Some(&frame.label()));
        if frame.done {
            // drop the closure; the animation holds no further frames
            next.borrow_mut().take();
        } else {
            request_frame(&next);
        }
    }) as Box<dyn FnMut(f64)>));
    request_frame(&slot);
}

fn counters(doc: &web_sys::Document, duration_ms: u32) -> Vec<(Element, CounterAnimation)> {
    dom::query_all(doc, ".stats__number[data-target]")
        .into_iter()
        .filter_map(|el| {
            let target = el.get_attribute("data-target").as_deref().and_then(parse_target)?;
            Some((el, CounterAnimation::new(target, duration_ms)))
        })
        .collect()
}

fn animate_all(items: &[(Element, CounterAnimation)]) {
    for (el, animation) in items {
        animate(el.clone(), *animation);
    }
}

fn observer_supported() -> bool {
    dom::window()
        .is_some_and(|win| Reflect::has(&win, &JsValue::from_str("IntersectionObserver")).unwrap_or(false))
}

/// # Errors
/// Returns `PageError::Missing` when the stats section or its counters are
/// absent, or a browser error if the observer cannot be created.
pub fn init(ctx: &Rc<PageContext>) -> Result<(), PageError> {
    let doc = dom::document().ok_or(PageError::Missing("document"))?;
    let section = dom::require_id(&doc, "stats")?;
    if dom::query_all(&doc, ".stats__number[data-target]").is_empty() {
        return Err(PageError::Missing(".stats__number[data-target]"));
    }
    let items = Rc::new(counters(&doc, ctx.config.counter_duration_ms));

    if !observer_supported() {
        animate_all(&items);
        return Ok(());
    }

    let has_animated = Rc::new(Cell::new(false));
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        let intersecting = entries.iter().any(|entry| {
            entry
                .dyn_into::<IntersectionObserverEntry>()
                .is_ok_and(|entry| entry.is_intersecting())
        });
        if intersecting && !has_animated.replace(true) {
            animate_all(&items);
            observer.disconnect();
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_root_margin("0px");
    options.set_threshold(&JsValue::from_f64(ctx.config.counter_threshold_clamped()));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    observer.observe(&section);
    callback.forget();
    Ok(())
}
