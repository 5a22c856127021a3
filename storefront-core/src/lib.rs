//! GTG Storefront Core
//!
//! Platform-agnostic logic behind the product page: option reconciliation
//! for the add-to-cart link, plan block visibility, and the small state
//! machines driving the gallery, counters, accordion and header menus.
//! This crate has no DOM or browser dependencies.

pub mod accordion;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod counter;
pub mod error;
pub mod gallery;
pub mod input;
pub mod menu;
pub mod reconciler;
pub mod scroll;
pub mod selection;

// Re-export commonly used types
pub use accordion::Accordion;
pub use cart::{CartUrlTable, FALLBACK_KEY, Resolved, default_table};
pub use catalog::{Fragrance, LookupKey, OptionGroup, Plan};
pub use config::StorefrontConfig;
pub use counter::{CounterAnimation, CounterFrame, ease_out_quart, parse_target};
pub use error::CatalogError;
pub use gallery::Gallery;
pub use input::{KeyAction, key_action};
pub use menu::{DropdownSet, NavMenu, SearchPopup};
pub use reconciler::{
    BlockStyle, CollapseState, Destination, EXPANDED_OPTION_CLASS, Reconciler, expanded_index,
    recompute_collapse_state, recompute_destination,
};
pub use scroll::Rect;
pub use selection::{SelectionSnapshot, SelectionSource};
