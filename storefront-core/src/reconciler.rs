//! Derives the cart destination and plan block visibility from the current selection.
//!
//! Both derivations are pure: they read a full snapshot on every call and
//! keep no state between calls, so they can run from any event callback in
//! any order.
use serde::{Deserialize, Serialize};

use crate::cart::{CartUrlTable, default_table};
use crate::catalog::{Fragrance, LookupKey, OptionGroup, Plan};
use crate::selection::{SelectionSnapshot, SelectionSource};

/// Class the stylesheet keys the open plan block on.
pub const EXPANDED_OPTION_CLASS: &str = "collapsed";

/// Resolved target of the add-to-cart link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub key: LookupKey,
    pub url: String,
    pub fell_back: bool,
}

/// Visibility of a single plan option block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CollapseState {
    pub expanded: bool,
}

/// Inline style values written to a plan option's content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockStyle {
    pub visibility: &'static str,
    pub opacity: &'static str,
    pub height: &'static str,
    pub pointer_events: &'static str,
}

impl CollapseState {
    #[must_use]
    pub const fn style(self) -> BlockStyle {
        if self.expanded {
            BlockStyle {
                visibility: "visible",
                opacity: "1",
                height: "auto",
                pointer_events: "auto",
            }
        } else {
            BlockStyle {
                visibility: "hidden",
                opacity: "0",
                height: "0",
                pointer_events: "none",
            }
        }
    }
}

/// Fragrance value read for `plan`, defaulting when the plan has no source
/// group or the source group has nothing checked.
#[must_use]
pub fn selected_fragrance<'a>(snapshot: &'a SelectionSnapshot, plan: &str) -> &'a str {
    plan.parse::<Plan>()
        .ok()
        .and_then(Plan::fragrance_source)
        .and_then(|group| snapshot.get(group))
        .unwrap_or(Fragrance::Original.as_str())
}

/// Compose the lookup key and resolve it against `table`.
///
/// Total: an unknown plan or fragrance yields a key with no entry, which
/// resolves to the table's fallback URL.
#[must_use]
pub fn recompute_destination(snapshot: &SelectionSnapshot, table: &CartUrlTable) -> Destination {
    let plan = snapshot.value_or_default(OptionGroup::PurchasePlan);
    let fragrance = selected_fragrance(snapshot, plan);
    let key = LookupKey::new(plan, fragrance);
    let resolved = table.resolve(&key);
    Destination {
        key,
        url: resolved.url,
        fell_back: resolved.fell_back,
    }
}

/// Map each plan option's checked flag to its collapse state.
#[must_use]
pub fn recompute_collapse_state(checked: &[bool]) -> Vec<CollapseState> {
    checked
        .iter()
        .map(|&expanded| CollapseState { expanded })
        .collect()
}

/// Index of the single expanded option, if exactly one is expanded.
#[must_use]
pub fn expanded_index(states: &[CollapseState]) -> Option<usize> {
    let mut expanded = states.iter().enumerate().filter(|(_, s)| s.expanded);
    match (expanded.next(), expanded.next()) {
        (Some((idx, _)), None) => Some(idx),
        _ => None,
    }
}

/// Reconciler bound to a particular URL table.
#[derive(Debug, Clone)]
pub struct Reconciler {
    table: CartUrlTable,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(default_table().clone())
    }
}

impl Reconciler {
    #[must_use]
    pub const fn new(table: CartUrlTable) -> Self {
        Self { table }
    }

    #[must_use]
    pub const fn table(&self) -> &CartUrlTable {
        &self.table
    }

    #[must_use]
    pub fn destination<S: SelectionSource + ?Sized>(&self, source: &S) -> Destination {
        recompute_destination(&SelectionSnapshot::capture(source), &self.table)
    }
}
