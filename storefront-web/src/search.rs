//! Header search overlay.
use std::cell::RefCell;
use std::rc::Rc;

use storefront_core::{KeyAction, SearchPopup, key_action};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, KeyboardEvent};

use crate::context::PageContext;
use crate::dom;
use crate::error::PageError;

const ACTIVE: &str = "active";

#[derive(Clone)]
struct Search {
    button: Element,
    popup: Element,
    input: Option<HtmlInputElement>,
    state: Rc<RefCell<SearchPopup>>,
    focus_delay_ms: u32,
}

impl Search {
    fn is_open(&self) -> bool {
        self.state.borrow().is_open()
    }

    fn open(&self) {
        dom::set_class(&self.popup, ACTIVE, true);
        dom::set_class(&self.button, ACTIVE, true);
        if let Some(body) = dom::body() {
            dom::set_style(&body, "overflow", "hidden");
        }
        if let Some(input) = self.input.clone() {
            dom::set_timeout(self.focus_delay_ms, move || {
                if let Err(err) = input.focus() {
                    log::debug!("search focus failed: {}", dom::js_error_message(&err));
                }
            });
        }
    }

    fn close(&self) {
        if !self.state.borrow_mut().close() {
            return;
        }
        dom::set_class(&self.popup, ACTIVE, false);
        dom::set_class(&self.button, ACTIVE, false);
        if let Some(body) = dom::body() {
            dom::set_style(&body, "overflow", "");
        }
        if let Some(input) = &self.input {
            input.set_value("");
            let _ = input.blur();
        }
    }

    fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.state.borrow_mut().toggle();
            self.open();
        }
    }
}

/// # Errors
/// Returns `PageError::Missing` when the search button or popup is absent.
pub fn init(ctx: &Rc<PageContext>) -> Result<(), PageError> {
    let doc = dom::document().ok_or(PageError::Missing("document"))?;
    let button = doc
        .query_selector(".header__search")?
        .ok_or(PageError::Missing(".header__search"))?;
    let popup = dom::require_id(&doc, "search-popup")?;
    let input = doc
        .query_selector(".header__search-input")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());

    let search = Search {
        button,
        popup,
        input,
        state: Rc::new(RefCell::new(SearchPopup::default())),
        focus_delay_ms: ctx.config.search_focus_delay_ms,
    };

    let on_button = search.clone();
    dom::listen(&search.button, "click", move |event| {
        event.stop_propagation();
        on_button.toggle();
    });

    let on_backdrop = search.clone();
    dom::listen(&search.popup, "click", move |event| {
        let on_backdrop_itself = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .is_some_and(|target| target == on_backdrop.popup);
        if on_backdrop_itself {
            on_backdrop.close();
        }
    });

    let on_outside = search.clone();
    dom::listen(&doc, "click", move |event| {
        if on_outside.is_open()
            && !dom::event_within(&event, &on_outside.popup)
            && !dom::event_within(&event, &on_outside.button)
        {
            on_outside.close();
        }
    });

    let on_key = search.clone();
    dom::listen(&doc, "keydown", move |event| {
        let dismiss = event
            .dyn_ref::<KeyboardEvent>()
            .and_then(|e| key_action(&e.key()))
            == Some(KeyAction::Dismiss);
        if dismiss && on_key.is_open() {
            on_key.close();
        }
    });

    if let Some(content) = dom::query_in(&search.popup, ".header__search-popup-content") {
        dom::listen(&content, "click", |event| event.stop_propagation());
    }
    Ok(())
}
