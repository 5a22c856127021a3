use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::dom::js_error_message;

/// Failures while wiring or updating page components.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    /// An element the component needs is not on this page. Not a fault:
    /// the component simply does not apply.
    #[error("element '{0}' not present")]
    Missing(&'static str),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        Self::Js(js_error_message(&value))
    }
}

impl PageError {
    /// Log at a level matching the failure: absences are expected on pages
    /// without the component, browser errors are not.
    pub fn report(&self, component: &str) {
        match self {
            Self::Missing(_) => log::debug!("{component}: skipped, {self}"),
            Self::Js(_) => log::error!("{component}: {self}"),
        }
    }
}
