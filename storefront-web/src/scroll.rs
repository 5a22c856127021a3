//! Smooth in-page anchor scrolling and the header's scrolled state.
use std::rc::Rc;

use storefront_core::scroll::{anchor_scroll_top, anchor_selector, header_offset, header_scrolled};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::context::PageContext;
use crate::dom;
use crate::error::PageError;

/// # Errors
/// Returns an error if the document is unavailable.
pub fn init_smooth_scroll(ctx: &Rc<PageContext>) -> Result<(), PageError> {
    let doc = dom::document().ok_or(PageError::Missing("document"))?;
    let fallback = ctx.config.header_offset_fallback_px;

    for link in dom::query_all(&doc, "a[href^=\"#\"]") {
        let anchor = link.clone();
        dom::listen(&link, "click", move |event| {
            let Some(href) = anchor.get_attribute("href") else {
                return;
            };
            let Some(selector) = anchor_selector(&href) else {
                return;
            };
            let (Some(win), Some(doc)) = (dom::window(), dom::document()) else {
                return;
            };
            let Ok(Some(target)) = doc.query_selector(selector) else {
                return;
            };
            event.prevent_default();

            let measured = doc
                .query_selector(".header")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                .map(|header| f64::from(header.offset_height()));
            let top = anchor_scroll_top(
                target.get_bounding_client_rect().top(),
                win.page_y_offset().unwrap_or_default(),
                header_offset(measured, fallback),
            );

            let options = ScrollToOptions::new();
            options.set_top(top);
            options.set_behavior(ScrollBehavior::Smooth);
            win.scroll_to_with_scroll_to_options(&options);
        });
    }
    Ok(())
}

/// # Errors
/// Returns `PageError::Missing` when the page has no `#header`.
pub fn init_header_effect(ctx: &Rc<PageContext>) -> Result<(), PageError> {
    let doc = dom::document().ok_or(PageError::Missing("document"))?;
    let win = dom::window().ok_or(PageError::Missing("window"))?;
    let header = dom::require_id(&doc, "header")?;
    let threshold = ctx.config.header_scrolled_px;

    let scroller = win.clone();
    dom::listen(&win, "scroll", move |_| {
        let offset = scroller.page_y_offset().unwrap_or_default();
        dom::set_class(&header, "scrolled", header_scrolled(offset, threshold));
    });
    Ok(())
}
