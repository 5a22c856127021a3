//! Cart destination table keyed by `{plan}-{fragrance}`.
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::LookupKey;
use crate::error::CatalogError;

const DEFAULT_CART_URLS: &str = include_str!("../data/cart_urls.json");
const CART_BASE_URL: &str = "https://example.com/cart";

/// Key used when the composed key has no table entry.
pub const FALLBACK_KEY: &str = "single-original";

static DEFAULT_TABLE: Lazy<CartUrlTable> = Lazy::new(CartUrlTable::load_from_static);

/// Shared table parsed from the embedded `cart_urls.json`.
#[must_use]
pub fn default_table() -> &'static CartUrlTable {
    &DEFAULT_TABLE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartUrlTable {
    #[serde(default = "default_fallback_key")]
    pub fallback: String,
    #[serde(default)]
    pub urls: BTreeMap<String, String>,
}

/// Outcome of a table lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub url: String,
    pub fell_back: bool,
}

impl Default for CartUrlTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CartUrlTable {
    /// Parse and validate a table from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the table is not total
    /// over the declared plan × fragrance keys.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Table embedded in the crate, or [`Self::builtin`] if that data is unusable.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_CART_URLS).unwrap_or_else(|_| Self::builtin())
    }

    /// Nine-entry table generated from the declared key space.
    #[must_use]
    pub fn builtin() -> Self {
        let urls = LookupKey::declared()
            .map(|key| {
                let url = format!("{CART_BASE_URL}/{key}");
                (key.to_string(), url)
            })
            .collect();
        Self {
            fallback: default_fallback_key(),
            urls,
        }
    }

    /// Check the table covers every declared key with a non-empty URL.
    ///
    /// Extra keys are allowed so new plans or fragrances can be added as data.
    ///
    /// # Errors
    ///
    /// Returns the first missing or empty entry, or a missing fallback key.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for key in LookupKey::declared() {
            match self.urls.get(key.as_str()) {
                None => return Err(CatalogError::MissingEntry(key.to_string())),
                Some(url) if url.trim().is_empty() => {
                    return Err(CatalogError::EmptyUrl(key.to_string()));
                }
                Some(_) => {}
            }
        }
        if !self.urls.contains_key(&self.fallback) {
            return Err(CatalogError::MissingFallback(self.fallback.clone()));
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &LookupKey) -> Option<&str> {
        self.urls
            .get(key.as_str())
            .map(String::as_str)
            .filter(|url| !url.trim().is_empty())
    }

    /// URL used whenever a lookup misses. Never empty.
    #[must_use]
    pub fn fallback_url(&self) -> String {
        self.urls
            .get(&self.fallback)
            .filter(|url| !url.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| format!("{CART_BASE_URL}/{FALLBACK_KEY}"))
    }

    #[must_use]
    pub fn resolve(&self, key: &LookupKey) -> Resolved {
        self.get(key).map_or_else(
            || Resolved {
                url: self.fallback_url(),
                fell_back: true,
            },
            |url| Resolved {
                url: url.to_string(),
                fell_back: false,
            },
        )
    }
}

fn default_fallback_key() -> String {
    FALLBACK_KEY.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Fragrance, Plan};

    #[test]
    fn static_table_matches_builtin() {
        let table = CartUrlTable::load_from_static();
        assert_eq!(table, CartUrlTable::builtin());
        assert_eq!(table.len(), 9);
        assert_eq!(table.fallback, FALLBACK_KEY);
    }

    #[test]
    fn resolve_hits_declared_entries() {
        let table = default_table();
        let resolved = table.resolve(&LookupKey::of(Plan::Double, Fragrance::Lily));
        assert_eq!(resolved.url, "https://example.com/cart/double-lily");
        assert!(!resolved.fell_back);
    }

    #[test]
    fn resolve_falls_back_for_unknown_key() {
        let table = default_table();
        let resolved = table.resolve(&LookupKey::new("quad", "musk"));
        assert_eq!(resolved.url, "https://example.com/cart/single-original");
        assert!(resolved.fell_back);
    }

    #[test]
    fn validate_rejects_incomplete_tables() {
        let mut table = CartUrlTable::builtin();
        table.urls.remove("triple-lily");
        assert!(matches!(
            table.validate(),
            Err(CatalogError::MissingEntry(k)) if k == "triple-lily"
        ));

        let mut table = CartUrlTable::builtin();
        table.urls.insert("double-rose".into(), "  ".into());
        assert!(matches!(table.validate(), Err(CatalogError::EmptyUrl(_))));

        let mut table = CartUrlTable::builtin();
        table.fallback = "nope".into();
        assert!(matches!(
            table.validate(),
            Err(CatalogError::MissingFallback(_))
        ));
    }

    #[test]
    fn from_json_accepts_extra_keys_and_reports_parse_errors() {
        let mut table = CartUrlTable::builtin();
        table
            .urls
            .insert("quad-original".into(), "https://example.com/cart/quad".into());
        let json = serde_json::to_string(&table).unwrap();
        let parsed = CartUrlTable::from_json(&json).unwrap();
        assert_eq!(parsed.len(), 10);

        assert!(matches!(
            CartUrlTable::from_json("{ not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn empty_entries_are_treated_as_missing() {
        let mut table = CartUrlTable::builtin();
        table.urls.insert("single-rose".into(), String::new());
        let resolved = table.resolve(&LookupKey::of(Plan::Single, Fragrance::Rose));
        assert!(resolved.fell_back);
        assert_eq!(resolved.url, "https://example.com/cart/single-original");
    }

    #[test]
    fn fallback_url_survives_a_table_without_fallback_entry() {
        let table = CartUrlTable {
            fallback: FALLBACK_KEY.into(),
            urls: BTreeMap::new(),
        };
        assert!(table.is_empty());
        let resolved = table.resolve(&LookupKey::of(Plan::Triple, Fragrance::Rose));
        assert_eq!(resolved.url, "https://example.com/cart/single-original");
    }
}
