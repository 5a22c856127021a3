use js_sys::{Function, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, NodeList, Window};

use crate::error::PageError;

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Retrieve the document object for DOM interactions.
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

#[must_use]
pub fn body() -> Option<HtmlElement> {
    document().and_then(|doc| doc.body())
}

/// Look up an element by id, reporting its absence as [`PageError::Missing`].
///
/// # Errors
/// Returns `PageError::Missing` when no element carries `id`.
pub fn require_id(doc: &Document, id: &'static str) -> Result<Element, PageError> {
    doc.get_element_by_id(id).ok_or(PageError::Missing(id))
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|idx| list.item(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// All elements in the document matching `selector`; empty on invalid selectors.
#[must_use]
pub fn query_all(doc: &Document, selector: &str) -> Vec<Element> {
    doc.query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

/// Descendants of `root` matching `selector`.
#[must_use]
pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

#[must_use]
pub fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// Add or remove `class` depending on `on`.
pub fn set_class(el: &Element, class: &str, on: bool) {
    let list = el.class_list();
    let result = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
    if let Err(err) = result {
        log::debug!("class toggle '{class}' failed: {}", js_error_message(&err));
    }
}

#[must_use]
pub fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

/// Set an inline style property on an element, if it is an `HtmlElement`.
pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>()
        && let Err(err) = html.style().set_property(property, value)
    {
        log::debug!("style '{property}' failed: {}", js_error_message(&err));
    }
}

#[must_use]
pub fn style_value(el: &Element, property: &str) -> String {
    el.dyn_ref::<HtmlElement>()
        .and_then(|html| html.style().get_property_value(property).ok())
        .unwrap_or_default()
}

/// Attach `handler` for `event` on `target` for the lifetime of the page.
pub fn listen<T, F>(target: &T, event: &str, handler: F)
where
    T: AsRef<EventTarget>,
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(err) = target
        .as_ref()
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        console_error(&format!(
            "failed to attach '{event}' listener: {}",
            js_error_message(&err)
        ));
    }
    closure.forget();
}

/// Whether the event's target lies inside `container`.
#[must_use]
pub fn event_within(event: &Event, container: &Element) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<web_sys::Node>().ok())
        .is_some_and(|node| container.contains(Some(&node)))
}

/// Nearest ancestor (or self) of the event target matching `selector`.
#[must_use]
pub fn event_closest(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
}

fn timeout_arg(delay_ms: u32) -> i32 {
    i32::try_from(delay_ms).unwrap_or(i32::MAX)
}

/// Run `callback` once after `delay_ms`. Returns the timer handle.
pub fn set_timeout<F>(delay_ms: u32, callback: F) -> Option<i32>
where
    F: FnOnce() + 'static,
{
    let win = window()?;
    let closure = Closure::once(callback);
    let handle = win
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            timeout_arg(delay_ms),
        )
        .ok();
    closure.forget();
    handle
}

pub fn clear_timeout(handle: i32) {
    if let Some(win) = window() {
        win.clear_timeout_with_handle(handle);
    }
}

/// Yield execution for the requested number of milliseconds.
///
/// # Errors
/// Returns an error if the timer cannot be scheduled or the underlying JavaScript promise rejects.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn sleep_ms(duration_ms: u32) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let mut resolve_slot: Option<Function> = None;
    let promise = Promise::new(&mut |resolve, _reject| {
        resolve_slot = Some(resolve);
    });

    let resolve =
        resolve_slot.ok_or_else(|| JsValue::from_str("resolve function should be set"))?;
    let closure = Closure::once(move || {
        let _ = resolve.call0(&JsValue::UNDEFINED);
    });

    let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        timeout_arg(duration_ms),
    )?;
    closure.forget();

    JsFuture::from(promise).await?;
    Ok(())
}

/// Current `location.search`, or an empty string outside a browser.
#[must_use]
pub fn location_search() -> String {
    window()
        .and_then(|win| win.location().search().ok())
        .unwrap_or_default()
}

/// Whether a `?a=1&b=2` style query string carries `flag=1`.
#[must_use]
pub fn query_flag(search: &str, flag: &str) -> bool {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .any(|(key, value)| key == flag && value == "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_flag_matches_exact_pairs() {
        assert!(query_flag("?test=1", "test"));
        assert!(query_flag("?a=2&debug=1", "debug"));
        assert!(!query_flag("?test=0", "test"));
        assert!(!query_flag("?contest=1", "test"));
        assert!(!query_flag("", "test"));
    }

    #[test]
    fn timeout_arg_saturates() {
        assert_eq!(timeout_arg(250), 250);
        assert_eq!(timeout_arg(u32::MAX), i32::MAX);
    }
}
