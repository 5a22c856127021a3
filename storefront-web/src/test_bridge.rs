//! `window.__storefrontTest`, exposed with `?test=1` for browser automation.
use std::rc::Rc;

use js_sys::{Object, Reflect};
use serde::Serialize;
use storefront_core::{SelectionSnapshot, recompute_destination};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use crate::cart::{CART_LINK_ID, DomSelection};
use crate::context::PageContext;
use crate::error::PageError;
use crate::dom;

const BRIDGE_KEY: &str = "__storefrontTest";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeState {
    pub cart_href: Option<String>,
    pub cart_key: String,
    pub selection: SelectionSnapshot,
    pub expanded: Vec<bool>,
}

fn current_state(ctx: &PageContext) -> Option<BridgeState> {
    let doc = dom::document()?;
    let selection = SelectionSnapshot::capture(&DomSelection::new(&doc));
    let cart_key = recompute_destination(&selection, ctx.reconciler.table()).key;
    let cart_href = doc
        .get_element_by_id(CART_LINK_ID)
        .and_then(|link| link.get_attribute("href"));
    let expanded = dom::query_all(&doc, ".product__subscription-option")
        .iter()
        .map(|option| dom::has_class(option, storefront_core::EXPANDED_OPTION_CLASS))
        .collect();
    Some(BridgeState {
        cart_href,
        cart_key: cart_key.to_string(),
        selection,
        expanded,
    })
}

#[must_use]
pub fn test_mode_enabled() -> bool {
    dom::query_flag(&dom::location_search(), "test")
}

/// Install the bridge object when the page runs in test mode.
///
/// # Errors
/// Returns an error if the bridge object cannot be attached to `window`.
pub fn install(ctx: &Rc<PageContext>) -> Result<(), PageError> {
    if !test_mode_enabled() {
        return Ok(());
    }
    let win = dom::window().ok_or(PageError::Missing("window"))?;
    let bridge = Object::new();

    let state_ctx = Rc::clone(ctx);
    let state = Closure::wrap(Box::new(move || {
        current_state(&state_ctx)
            .and_then(|state| {
                state
                    .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
                    .ok()
            })
            .unwrap_or(JsValue::NULL)
    }) as Box<dyn FnMut() -> JsValue>);

    let reconcile_ctx = Rc::clone(ctx);
    let reconcile = Closure::wrap(Box::new(move || {
        crate::reconcile(&reconcile_ctx);
    }) as Box<dyn FnMut()>);

    Reflect::set(&bridge, &JsValue::from_str("state"), state.as_ref())?;
    Reflect::set(
        &bridge,
        &JsValue::from_str("reconcile"),
        reconcile.as_ref(),
    )?;
    Reflect::set(&win, &JsValue::from_str(BRIDGE_KEY), &bridge)?;
    state.forget();
    reconcile.forget();
    log::info!("test bridge installed as window.{BRIDGE_KEY}");
    Ok(())
}
