//! Read-only snapshots of the page's radio selections.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::OptionGroup;

/// Anything that can report the checked value of a radio group.
///
/// The browser implementation queries the live form controls; tests use
/// [`SelectionSnapshot`] directly.
pub trait SelectionSource {
    /// Checked value of `group`, or `None` when nothing is checked.
    fn checked_value(&self, group: OptionGroup) -> Option<String>;
}

/// Checked value per group at a single instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    #[serde(default)]
    checked: BTreeMap<OptionGroup, String>,
}

impl SelectionSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every tracked group from `source`.
    #[must_use]
    pub fn capture<S: SelectionSource + ?Sized>(source: &S) -> Self {
        let checked = OptionGroup::ALL
            .into_iter()
            .filter_map(|group| source.checked_value(group).map(|value| (group, value)))
            .collect();
        Self { checked }
    }

    #[must_use]
    pub fn with(mut self, group: OptionGroup, value: impl Into<String>) -> Self {
        self.checked.insert(group, value.into());
        self
    }

    pub fn check(&mut self, group: OptionGroup, value: impl Into<String>) {
        self.checked.insert(group, value.into());
    }

    #[must_use]
    pub fn get(&self, group: OptionGroup) -> Option<&str> {
        self.checked.get(&group).map(String::as_str)
    }

    /// Checked value, or the group's documented default.
    #[must_use]
    pub fn value_or_default(&self, group: OptionGroup) -> &str {
        self.get(group).unwrap_or_else(|| group.default_value())
    }
}

impl SelectionSource for SelectionSnapshot {
    fn checked_value(&self, group: OptionGroup) -> Option<String> {
        self.get(group).map(str::to_string)
    }
}
