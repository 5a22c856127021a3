//! Keeps the add-to-cart link pointed at the URL for the current selection.
use std::rc::Rc;

use storefront_core::{Destination, OptionGroup, Reconciler, SelectionSource};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlInputElement};

use crate::context::PageContext;
use crate::dom;
use crate::error::PageError;

pub const CART_LINK_ID: &str = "add-to-cart";

/// Reads checked radios straight from the live document.
pub struct DomSelection<'a> {
    doc: &'a Document,
}

impl<'a> DomSelection<'a> {
    #[must_use]
    pub const fn new(doc: &'a Document) -> Self {
        Self { doc }
    }
}

impl SelectionSource for DomSelection<'_> {
    fn checked_value(&self, group: OptionGroup) -> Option<String> {
        self.doc
            .query_selector(&checked_selector(group))
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
    }
}

fn checked_selector(group: OptionGroup) -> String {
    format!("input[name=\"{}\"]:checked", group.input_name())
}

/// Inputs whose `change` should re-derive the cart URL: every radio on the
/// page plus every input of the tracked groups, including the second double
/// slot that never feeds the key.
fn trigger_selector() -> String {
    let mut parts = vec![String::from("input[type=\"radio\"]")];
    parts.extend(
        OptionGroup::ALL
            .iter()
            .map(|group| format!("input[name=\"{}\"]", group.input_name())),
    );
    parts.join(", ")
}

/// Recompute the destination and write it to the link's `href`.
///
/// # Errors
/// Returns `PageError::Missing` when the page has no add-to-cart link, or a
/// browser error if the attribute cannot be written.
pub fn update_cart_url(reconciler: &Reconciler) -> Result<Destination, PageError> {
    let doc = dom::document().ok_or(PageError::Missing("document"))?;
    let link = dom::require_id(&doc, CART_LINK_ID)?;
    let destination = reconciler.destination(&DomSelection::new(&doc));
    link.set_attribute("href", &destination.url)?;
    if destination.fell_back {
        log::warn!(
            "no cart url for '{}', using fallback {}",
            destination.key,
            destination.url
        );
    }
    log::info!("cart url updated: {} -> {}", destination.key, destination.url);
    Ok(destination)
}

/// Refresh the link now and after every change of a tracked input.
///
/// # Errors
/// Returns an error if the document is unavailable.
pub fn init(ctx: &Rc<PageContext>) -> Result<(), PageError> {
    let doc = dom::document().ok_or(PageError::Missing("document"))?;
    for input in dom::query_all(&doc, &trigger_selector()) {
        let ctx = Rc::clone(ctx);
        dom::listen(&input, "change", move |_| refresh(&ctx));
    }
    refresh(ctx);
    Ok(())
}

/// Update the link, logging rather than propagating failures.
pub fn refresh(ctx: &PageContext) {
    if let Err(err) = update_cart_url(&ctx.reconciler) {
        err.report("cart");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_selector_uses_markup_names() {
        assert_eq!(
            checked_selector(OptionGroup::FragranceDoubleChoice1),
            "input[name=\"fragrance-double1\"]:checked"
        );
    }

    #[test]
    fn trigger_selector_covers_all_groups() {
        let selector = trigger_selector();
        assert!(selector.starts_with("input[type=\"radio\"]"));
        for group in OptionGroup::ALL {
            assert!(selector.contains(group.input_name()));
        }
    }
}
