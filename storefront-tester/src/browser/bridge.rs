use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thirtyfour::prelude::*;

pub const BRIDGE_KEY: &str = "__storefrontTest";

/// Snapshot returned by `window.__storefrontTest.state()`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    pub cart_href: Option<String>,
    pub cart_key: String,
    #[serde(default)]
    pub selection: Selection,
    #[serde(default)]
    pub expanded: Vec<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Selection {
    #[serde(default)]
    pub checked: BTreeMap<String, String>,
}

impl PageState {
    pub fn expanded_count(&self) -> usize {
        self.expanded.iter().filter(|&&on| on).count()
    }
}

#[derive(Debug, Clone)]
pub struct StorefrontBridge<'a> {
    driver: &'a WebDriver,
}

impl<'a> StorefrontBridge<'a> {
    pub const fn new(driver: &'a WebDriver) -> Self {
        Self { driver }
    }

    pub async fn ensure_available(&self) -> Result<()> {
        let result = self
            .driver
            .execute(&format!("return !!window.{BRIDGE_KEY}"), vec![])
            .await?;
        let ok = result.json().as_bool().unwrap_or(false);
        if !ok {
            bail!("{BRIDGE_KEY} is not available. Did you pass ?test=1 to the page?");
        }
        Ok(())
    }

    /// Check the radio `name=value` and fire `change` the way a click would.
    pub async fn check(&self, name: &str, value: &str) -> Result<()> {
        let found = self
            .driver
            .execute(
                r"
                const input = document.querySelector(
                    `input[name='${arguments[0]}'][value='${arguments[1]}']`);
                if (!input) { return false; }
                input.checked = true;
                input.dispatchEvent(new Event('change', { bubbles: true }));
                return true;
                ",
                vec![Value::from(name), Value::from(value)],
            )
            .await?;
        if !found.json().as_bool().unwrap_or(false) {
            bail!("no radio input[name='{name}'][value='{value}'] on the page");
        }
        Ok(())
    }

    /// Uncheck every radio without firing events.
    pub async fn clear_all(&self) -> Result<()> {
        self.driver
            .execute(
                "document.querySelectorAll(\"input[type='radio']\").forEach(i => { i.checked = false; });",
                vec![],
            )
            .await?;
        Ok(())
    }

    pub async fn reconcile(&self) -> Result<()> {
        self.driver
            .execute(&format!("window.{BRIDGE_KEY}.reconcile()"), vec![])
            .await?;
        Ok(())
    }

    pub async fn state(&self) -> Result<PageState> {
        let result = self
            .driver
            .execute(&format!("return window.{BRIDGE_KEY}.state()"), vec![])
            .await?;
        let v = result.json().clone();
        let s: PageState = serde_json::from_value(v).context("parsing PageState")?;
        Ok(s)
    }

    pub async fn cart_href(&self) -> Result<String> {
        let link = self.driver.find(By::Id("add-to-cart")).await?;
        link.attr("href")
            .await?
            .context("#add-to-cart has no href")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_state_parses_bridge_payload() {
        let state: PageState = serde_json::from_value(json!({
            "cartHref": "https://example.com/cart/double-rose",
            "cartKey": "double-rose",
            "selection": { "checked": { "purchase-plan": "double" } },
            "expanded": [false, true, false]
        }))
        .expect("bridge payload");
        assert_eq!(state.cart_key, "double-rose");
        assert_eq!(state.expanded_count(), 1);
        assert_eq!(
            state.selection.checked.get("purchase-plan").map(String::as_str),
            Some("double")
        );
    }

    #[test]
    fn page_state_tolerates_missing_collections() {
        let state: PageState =
            serde_json::from_value(json!({ "cartHref": null, "cartKey": "single-original" }))
                .expect("minimal payload");
        assert!(state.cart_href.is_none());
        assert_eq!(state.expanded_count(), 0);
    }
}
