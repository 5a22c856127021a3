//! What a failed browser scenario leaves behind for triage.
//!
//! Each failure gets its own directory under
//! `{base}/{browser}/{scenario}/{timestamp}` holding the page as the shopper
//! saw it, the bridge's view of the selection, and the cart link that
//! selection produced.
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thirtyfour::prelude::*;

use crate::browser::StorefrontBridge;
use crate::browser::bridge::PageState;

pub const SCREENSHOT_FILE: &str = "screenshot.png";
pub const DOM_FILE: &str = "dom.html";
pub const STATE_FILE: &str = "state.json";
pub const CART_FILE: &str = "cart.txt";
pub const ERROR_FILE: &str = "error.txt";

/// Where one scenario failure is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    dir: PathBuf,
}

impl ArtifactLayout {
    pub fn for_failure(base: &str, browser: &str, scenario: &str, at: DateTime<Utc>) -> Self {
        let stamp = at.format("%Y%m%dT%H%M%S").to_string();
        Self {
            dir: [base, browser, scenario, stamp.as_str()].iter().collect(),
        }
    }

    pub fn now(base: &str, browser: &str, scenario: &str) -> Self {
        Self::for_failure(base, browser, scenario, Utc::now())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

/// Everything gathered from the browser after a scenario fails. Each piece
/// is optional: a broken page may refuse any of them.
#[derive(Debug, Clone, Default)]
pub struct FailureBundle {
    pub screenshot: Option<Vec<u8>>,
    pub dom: Option<String>,
    pub state: Option<PageState>,
    pub cart_href: Option<String>,
    pub error: String,
}

impl FailureBundle {
    pub async fn collect(driver: &WebDriver, err: &anyhow::Error) -> Self {
        let bridge = StorefrontBridge::new(driver);
        let state = bridge.state().await.ok();
        // The link is read from the DOM so it is captured even without the bridge.
        let cart_href = match state.as_ref().and_then(|s| s.cart_href.clone()) {
            Some(href) => Some(href),
            None => bridge.cart_href().await.ok(),
        };
        Self {
            screenshot: driver.screenshot_as_png().await.ok(),
            dom: driver.source().await.ok(),
            state,
            cart_href,
            error: format!("{err:#}"),
        }
    }

    /// Human-readable cart summary: the link, the key the page composed and
    /// which plan blocks were open.
    pub fn cart_summary(&self) -> String {
        let mut out = String::new();
        let href = self.cart_href.as_deref().unwrap_or("<missing>");
        let _ = writeln!(out, "href: {href}");
        if let Some(state) = &self.state {
            let _ = writeln!(out, "key: {}", state.cart_key);
            for (group, value) in &state.selection.checked {
                let _ = writeln!(out, "checked {group}: {value}");
            }
            let open: Vec<String> = state
                .expanded
                .iter()
                .enumerate()
                .filter(|(_, on)| **on)
                .map(|(idx, _)| idx.to_string())
                .collect();
            let _ = writeln!(out, "expanded: [{}]", open.join(", "));
        }
        out
    }

    /// # Errors
    /// Fails only if the directory cannot be created; individual files are
    /// best effort.
    pub fn write_to(&self, layout: &ArtifactLayout) -> Result<()> {
        fs::create_dir_all(layout.dir()).context("creating artifacts dir")?;

        if let Some(png) = &self.screenshot {
            let _ = fs::write(layout.file(SCREENSHOT_FILE), png);
        }
        if let Some(dom) = &self.dom {
            let _ = fs::write(layout.file(DOM_FILE), dom);
        }
        if let Some(state) = &self.state {
            match serde_json::to_vec_pretty(state) {
                Ok(payload) => {
                    let _ = fs::write(layout.file(STATE_FILE), payload);
                }
                Err(err) => log::warn!("could not serialize page state: {err}"),
            }
        }
        let _ = fs::write(layout.file(CART_FILE), self.cart_summary());
        let _ = fs::write(layout.file(ERROR_FILE), &self.error);
        Ok(())
    }
}

/// Gather and write the bundle for a failed scenario.
///
/// # Errors
/// Returns an error if the artifacts directory cannot be created.
pub async fn capture_failure(
    driver: &WebDriver,
    layout: &ArtifactLayout,
    err: &anyhow::Error,
) -> Result<()> {
    FailureBundle::collect(driver, err).await.write_to(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    use crate::browser::bridge::Selection;

    fn scratch_dir() -> String {
        std::env::temp_dir()
            .join(format!(
                "storefront-artifacts-{}",
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_nanos()
            ))
            .to_string_lossy()
            .into_owned()
    }

    fn double_rose_state() -> PageState {
        PageState {
            cart_href: Some("https://example.com/cart/double-rose".to_string()),
            cart_key: "double-rose".to_string(),
            selection: Selection {
                checked: BTreeMap::from([
                    ("fragrance-double-choice-1".to_string(), "rose".to_string()),
                    ("purchase-plan".to_string(), "double".to_string()),
                ]),
            },
            expanded: vec![false, true, false],
        }
    }

    #[test]
    fn layout_nests_browser_scenario_and_timestamp() {
        let at = Utc
            .with_ymd_and_hms(2026, 3, 14, 9, 26, 53)
            .single()
            .expect("valid time");
        let layout = ArtifactLayout::for_failure("target/out", "chrome", "cart-matrix", at);
        assert_eq!(
            layout.dir(),
            Path::new("target/out/chrome/cart-matrix/20260314T092653")
        );
    }

    #[test]
    fn cart_summary_lists_href_key_and_open_plans() {
        let bundle = FailureBundle {
            state: Some(double_rose_state()),
            cart_href: Some("https://example.com/cart/double-rose".to_string()),
            ..FailureBundle::default()
        };
        assert_eq!(
            bundle.cart_summary(),
            "href: https://example.com/cart/double-rose\n\
             key: double-rose\n\
             checked fragrance-double-choice-1: rose\n\
             checked purchase-plan: double\n\
             expanded: [1]\n"
        );
    }

    #[test]
    fn cart_summary_marks_missing_link() {
        let bundle = FailureBundle::default();
        assert_eq!(bundle.cart_summary(), "href: <missing>\n");
    }

    #[test]
    fn write_to_produces_cart_and_state_files() {
        let layout = ArtifactLayout::now(&scratch_dir(), "firefox", "smoke");
        let bundle = FailureBundle {
            screenshot: Some(vec![1, 2, 3]),
            dom: Some("<html />".to_string()),
            state: Some(double_rose_state()),
            cart_href: Some("https://example.com/cart/double-rose".to_string()),
            error: "href mismatch".to_string(),
        };
        bundle.write_to(&layout).expect("write artifacts");

        for name in [SCREENSHOT_FILE, DOM_FILE, STATE_FILE, CART_FILE, ERROR_FILE] {
            assert!(layout.file(name).exists(), "{name} missing");
        }
        let cart = fs::read_to_string(layout.file(CART_FILE)).expect("cart.txt");
        assert!(cart.starts_with("href: https://example.com/cart/double-rose\n"));
        let state: PageState =
            serde_json::from_slice(&fs::read(layout.file(STATE_FILE)).expect("state.json"))
                .expect("state parses back");
        assert_eq!(state.cart_key, "double-rose");
    }

    #[test]
    fn write_to_skips_absent_pieces() {
        let layout = ArtifactLayout::now(&scratch_dir(), "chrome", "smoke");
        let bundle = FailureBundle {
            error: "bridge missing".to_string(),
            ..FailureBundle::default()
        };
        bundle.write_to(&layout).expect("write artifacts");
        assert!(!layout.file(SCREENSHOT_FILE).exists());
        assert!(!layout.file(STATE_FILE).exists());
        assert_eq!(
            fs::read_to_string(layout.file(ERROR_FILE)).expect("error.txt"),
            "bridge missing"
        );
    }
}
