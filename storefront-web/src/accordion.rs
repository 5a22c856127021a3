//! Collection accordion: one item open at a time.
use std::cell::RefCell;
use std::rc::Rc;

use storefront_core::Accordion;
use web_sys::Element;

use crate::dom;
use crate::error::PageError;

const ITEM: &str = ".collection__accordion-item";
const HEADER: &str = ".collection__accordion-header";

fn render(items: &[(Element, Option<Element>)], state: &Accordion) {
    for (idx, (item, header)) in items.iter().enumerate() {
        dom::set_class(item, "active", state.is_open(idx));
        if let Some(header) = header
            && let Err(err) = header.set_attribute("aria-expanded", state.aria_expanded(idx))
        {
            log::debug!("aria-expanded update failed: {}", dom::js_error_message(&err));
        }
    }
}

/// # Errors
/// Returns `PageError::Missing` when the page has no accordion items.
pub fn init() -> Result<(), PageError> {
    let doc = dom::document().ok_or(PageError::Missing("document"))?;
    let items: Vec<(Element, Option<Element>)> = dom::query_all(&doc, ITEM)
        .into_iter()
        .map(|item| {
            let header = dom::query_in(&item, HEADER);
            (item, header)
        })
        .collect();
    if items.is_empty() {
        return Err(PageError::Missing(ITEM));
    }

    let initial = items
        .iter()
        .position(|(item, _)| dom::has_class(item, "active"));
    let mut accordion = Accordion::new();
    if let Some(idx) = initial {
        accordion.toggle(idx);
    }

    let items = Rc::new(items);
    let state = Rc::new(RefCell::new(accordion));
    for (idx, (_, header)) in items.iter().enumerate() {
        let Some(header) = header else {
            continue;
        };
        let items = Rc::clone(&items);
        let state = Rc::clone(&state);
        dom::listen(header, "click", move |_| {
            let mut accordion = state.borrow_mut();
            accordion.toggle(idx);
            render(&items, &accordion);
        });
    }
    Ok(())
}
