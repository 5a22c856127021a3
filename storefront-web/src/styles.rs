use wasm_bindgen::JsCast;
use web_sys::HtmlStyleElement;

use crate::dom;
use crate::error::PageError;

const KEYFRAMES_ID: &str = "storefront-keyframes";

/// Keyframes referenced by the page stylesheet but shipped with the script.
#[must_use]
pub const fn fade_in_keyframes() -> &'static str {
    "@keyframes fadeIn{from{opacity:0;transform:translateY(10px)}to{opacity:1;transform:translateY(0)}}"
}

/// Append the keyframes `<style>` to `<head>` once.
///
/// # Errors
/// Returns an error if the document has no head or the element cannot be created.
pub fn inject_keyframes() -> Result<(), PageError> {
    let doc = dom::document().ok_or(PageError::Missing("document"))?;
    if doc.get_element_by_id(KEYFRAMES_ID).is_some() {
        return Ok(());
    }
    let head = doc.head().ok_or(PageError::Missing("head"))?;
    let style = doc
        .create_element("style")?
        .dyn_into::<HtmlStyleElement>()
        .map_err(|_| PageError::Js("created element is not <style>".into()))?;
    style.set_id(KEYFRAMES_ID);
    style.set_text_content(Some(fade_in_keyframes()));
    head.append_child(&style)?;
    Ok(())
}
