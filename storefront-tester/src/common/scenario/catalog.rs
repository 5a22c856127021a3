use anyhow::{Context, Result, ensure};
use storefront_core::{
    Fragrance, LookupKey, OptionGroup, Plan, Reconciler, SelectionSnapshot, default_table,
    expanded_index, recompute_collapse_state,
};
use thirtyfour::prelude::*;

use crate::browser::bridge::PageState;

use super::{BrowserScenario, CombinedScenario, LogicCheck, ScenarioCtx, TestScenario};

/// Browser half of a scenario; each variant maps to one async flow below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserFlow {
    Smoke,
    CartMatrix,
    DefaultSelection,
    DoubleSecondSlot,
    TripleDefault,
    CollapseIdempotent,
    ExclusiveExpand,
}

#[derive(Debug, Clone)]
pub struct StorefrontScenario {
    pub key: &'static str,
    pub aliases: &'static [&'static str],
    pub title: &'static str,
    pub checks: &'static [(&'static str, LogicCheck)],
    pub flow: BrowserFlow,
}

pub static SCENARIOS: &[StorefrontScenario] = &[
    StorefrontScenario {
        key: "smoke",
        aliases: &[],
        title: "Smoke Test",
        checks: &[
            ("url table is total", table_is_total),
            ("empty selection resolves", empty_selection_resolves),
        ],
        flow: BrowserFlow::Smoke,
    },
    StorefrontScenario {
        key: "cart-matrix",
        aliases: &["matrix"],
        title: "Every wired plan/fragrance pair reaches its own URL",
        checks: &[
            ("wired combinations", wired_combinations_resolve),
            ("declared keys", declared_keys_resolve),
        ],
        flow: BrowserFlow::CartMatrix,
    },
    StorefrontScenario {
        key: "default-selection",
        aliases: &["default"],
        title: "Nothing checked falls back to single-original",
        checks: &[
            ("nothing checked", nothing_checked_is_single_original),
            ("unknown plan", unknown_plan_falls_back),
        ],
        flow: BrowserFlow::DefaultSelection,
    },
    StorefrontScenario {
        key: "double-second-slot",
        aliases: &["double"],
        title: "Second double fragrance never changes the key",
        checks: &[("second slot ignored", second_double_slot_ignored)],
        flow: BrowserFlow::DoubleSecondSlot,
    },
    StorefrontScenario {
        key: "triple-default",
        aliases: &["triple"],
        title: "Triple always resolves the default fragrance",
        checks: &[("triple ignores fragrance", triple_ignores_fragrance)],
        flow: BrowserFlow::TripleDefault,
    },
    StorefrontScenario {
        key: "collapse-idempotent",
        aliases: &["idempotent"],
        title: "Repeated collapse passes are stable",
        checks: &[("idempotent", collapse_is_idempotent)],
        flow: BrowserFlow::CollapseIdempotent,
    },
    StorefrontScenario {
        key: "exclusive-expand",
        aliases: &["exclusive"],
        title: "Exactly the checked plan is expanded",
        checks: &[
            ("one-hot", one_checked_plan_expands),
            ("none checked", nothing_checked_collapses_all),
        ],
        flow: BrowserFlow::ExclusiveExpand,
    },
];

fn plan_snapshot(plan: Plan) -> SelectionSnapshot {
    SelectionSnapshot::new().with(OptionGroup::PurchasePlan, plan)
}

fn expected_url(key: &LookupKey) -> Result<String> {
    default_table()
        .get(key)
        .map(str::to_string)
        .with_context(|| format!("no url for {key}"))
}

fn fallback_url() -> String {
    default_table().fallback_url()
}

/// Plan and fragrance pairs whose fragrance the page actually reads.
fn wired_pairs() -> impl Iterator<Item = (Plan, OptionGroup, Fragrance)> {
    Plan::ALL.into_iter().flat_map(|plan| {
        plan.fragrance_source().into_iter().flat_map(move |group| {
            Fragrance::ALL
                .into_iter()
                .map(move |fragrance| (plan, group, fragrance))
        })
    })
}

fn table_is_total(reconciler: &Reconciler) -> Result<()> {
    reconciler.table().validate()?;
    ensure!(
        reconciler.table().len() >= 9,
        "table has {} entries",
        reconciler.table().len()
    );
    Ok(())
}

fn empty_selection_resolves(reconciler: &Reconciler) -> Result<()> {
    let destination = reconciler.destination(&SelectionSnapshot::new());
    ensure!(!destination.url.is_empty(), "empty url for empty selection");
    Ok(())
}

fn wired_combinations_resolve(reconciler: &Reconciler) -> Result<()> {
    for (plan, group, fragrance) in wired_pairs() {
        let snapshot = plan_snapshot(plan).with(group, fragrance);
        let destination = reconciler.destination(&snapshot);
        let key = LookupKey::of(plan, fragrance);
        ensure!(destination.key == key, "{key} composed as {}", destination.key);
        ensure!(!destination.fell_back, "{key} fell back");
        ensure!(
            destination.url == expected_url(&key)?,
            "{key} resolved to {}",
            destination.url
        );
    }
    Ok(())
}

fn declared_keys_resolve(reconciler: &Reconciler) -> Result<()> {
    for key in LookupKey::declared() {
        ensure!(
            !reconciler.table().resolve(&key).fell_back,
            "{key} missing from table"
        );
    }
    Ok(())
}

fn nothing_checked_is_single_original(reconciler: &Reconciler) -> Result<()> {
    let destination = reconciler.destination(&SelectionSnapshot::new());
    let key = LookupKey::of(Plan::Single, Fragrance::Original);
    ensure!(destination.key == key, "composed {}", destination.key);
    ensure!(destination.url == expected_url(&key)?, "got {}", destination.url);
    Ok(())
}

fn unknown_plan_falls_back(reconciler: &Reconciler) -> Result<()> {
    let snapshot = SelectionSnapshot::new().with(OptionGroup::PurchasePlan, "quadruple");
    let destination = reconciler.destination(&snapshot);
    ensure!(destination.fell_back, "unknown plan did not fall back");
    ensure!(destination.url == fallback_url(), "got {}", destination.url);
    Ok(())
}

fn second_double_slot_ignored(reconciler: &Reconciler) -> Result<()> {
    let expected = expected_url(&LookupKey::of(Plan::Double, Fragrance::Rose))?;
    for second in Fragrance::ALL {
        let snapshot = plan_snapshot(Plan::Double)
            .with(OptionGroup::FragranceDoubleChoice1, Fragrance::Rose)
            .with(OptionGroup::FragranceDoubleChoice2, second);
        let destination = reconciler.destination(&snapshot);
        ensure!(
            destination.url == expected,
            "second slot {second} moved url to {}",
            destination.url
        );
    }
    Ok(())
}

fn triple_ignores_fragrance(reconciler: &Reconciler) -> Result<()> {
    let expected = expected_url(&LookupKey::of(Plan::Triple, Fragrance::Original))?;
    for fragrance in Fragrance::ALL {
        let snapshot = plan_snapshot(Plan::Triple)
            .with(OptionGroup::Fragrance, fragrance)
            .with(OptionGroup::FragranceDoubleChoice1, fragrance);
        let destination = reconciler.destination(&snapshot);
        ensure!(
            destination.url == expected,
            "triple with {fragrance} resolved to {}",
            destination.url
        );
    }
    Ok(())
}

fn collapse_is_idempotent(_: &Reconciler) -> Result<()> {
    for checked in [
        vec![true, false, false],
        vec![false, true, false],
        vec![false, false, true],
        vec![false, false, false],
    ] {
        let first = recompute_collapse_state(&checked);
        let second = recompute_collapse_state(&checked);
        ensure!(first == second, "unstable for {checked:?}");
    }
    Ok(())
}

fn one_checked_plan_expands(_: &Reconciler) -> Result<()> {
    for idx in 0..3 {
        let checked: Vec<bool> = (0..3).map(|i| i == idx).collect();
        let states = recompute_collapse_state(&checked);
        ensure!(
            expanded_index(&states) == Some(idx),
            "expected only option {idx} expanded, got {states:?}"
        );
    }
    Ok(())
}

fn nothing_checked_collapses_all(_: &Reconciler) -> Result<()> {
    let states = recompute_collapse_state(&[false, false, false]);
    ensure!(
        states.iter().all(|s| !s.expanded),
        "nothing checked but {states:?}"
    );
    Ok(())
}

async fn open_page(driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
    driver.goto(&ctx.base_url).await?;
    ctx.bridge.ensure_available().await
}

async fn select_plan(ctx: &ScenarioCtx<'_>, plan: Plan) -> Result<()> {
    ctx.bridge
        .check(OptionGroup::PurchasePlan.input_name(), plan.as_str())
        .await
}

async fn expect_href(ctx: &ScenarioCtx<'_>, expected: &str, label: &str) -> Result<()> {
    let href = ctx.bridge.cart_href().await?;
    ensure!(href == expected, "{label}: href {href}, expected {expected}");
    if ctx.verbose {
        println!("   ✓ {label} -> {href}");
    }
    Ok(())
}

/// A freshly loaded page has an absolute cart link and at most one open plan.
fn check_loaded_page(state: &PageState) -> Result<()> {
    let expanded = state.expanded_count();
    ensure!(expanded <= 1, "{expanded} plan blocks expanded");
    let href = state
        .cart_href
        .as_deref()
        .context("#add-to-cart has no href")?;
    ensure!(href.starts_with("http"), "unexpected cart href {href}");
    Ok(())
}

async fn smoke_flow(driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
    open_page(driver, ctx).await?;
    let state = ctx.bridge.state().await?;
    check_loaded_page(&state)
}

async fn cart_matrix_flow(driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
    open_page(driver, ctx).await?;
    for (plan, group, fragrance) in wired_pairs() {
        select_plan(ctx, plan).await?;
        ctx.bridge
            .check(group.input_name(), fragrance.as_str())
            .await?;
        let key = LookupKey::of(plan, fragrance);
        expect_href(ctx, &expected_url(&key)?, key.as_str()).await?;
    }
    select_plan(ctx, Plan::Triple).await?;
    let key = LookupKey::of(Plan::Triple, Fragrance::Original);
    expect_href(ctx, &expected_url(&key)?, key.as_str()).await
}

async fn default_selection_flow(driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
    open_page(driver, ctx).await?;
    ctx.bridge.clear_all().await?;
    ctx.bridge.reconcile().await?;
    let key = LookupKey::of(Plan::Single, Fragrance::Original);
    expect_href(ctx, &expected_url(&key)?, "nothing checked").await
}

async fn double_second_slot_flow(driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
    open_page(driver, ctx).await?;
    select_plan(ctx, Plan::Double).await?;
    ctx.bridge
        .check(
            OptionGroup::FragranceDoubleChoice1.input_name(),
            Fragrance::Rose.as_str(),
        )
        .await?;
    let expected = expected_url(&LookupKey::of(Plan::Double, Fragrance::Rose))?;
    for second in Fragrance::ALL {
        ctx.bridge
            .check(
                OptionGroup::FragranceDoubleChoice2.input_name(),
                second.as_str(),
            )
            .await?;
        expect_href(ctx, &expected, &format!("second slot {second}")).await?;
    }
    Ok(())
}

async fn triple_default_flow(driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
    open_page(driver, ctx).await?;
    select_plan(ctx, Plan::Single).await?;
    ctx.bridge
        .check(OptionGroup::Fragrance.input_name(), Fragrance::Rose.as_str())
        .await?;
    select_plan(ctx, Plan::Triple).await?;
    let key = LookupKey::of(Plan::Triple, Fragrance::Original);
    expect_href(ctx, &expected_url(&key)?, key.as_str()).await
}

async fn collapse_idempotent_flow(driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
    open_page(driver, ctx).await?;
    select_plan(ctx, Plan::Double).await?;
    let first = ctx.bridge.state().await?;
    ctx.bridge.reconcile().await?;
    ctx.bridge.reconcile().await?;
    let second = ctx.bridge.state().await?;
    ensure!(
        first.expanded == second.expanded,
        "expanded changed from {:?} to {:?}",
        first.expanded,
        second.expanded
    );
    ensure!(first.cart_href == second.cart_href, "cart href changed on reconcile");
    Ok(())
}

async fn exclusive_expand_flow(driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
    open_page(driver, ctx).await?;
    for (idx, plan) in Plan::ALL.into_iter().enumerate() {
        select_plan(ctx, plan).await?;
        let state = ctx.bridge.state().await?;
        ensure!(
            state.expanded_count() == 1 && state.expanded.get(idx) == Some(&true),
            "{plan} checked but expanded is {:?}",
            state.expanded
        );
    }
    Ok(())
}

#[async_trait::async_trait]
impl BrowserScenario for StorefrontScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        match self.flow {
            BrowserFlow::Smoke => smoke_flow(driver, ctx).await,
            BrowserFlow::CartMatrix => cart_matrix_flow(driver, ctx).await,
            BrowserFlow::DefaultSelection => default_selection_flow(driver, ctx).await,
            BrowserFlow::DoubleSecondSlot => double_second_slot_flow(driver, ctx).await,
            BrowserFlow::TripleDefault => triple_default_flow(driver, ctx).await,
            BrowserFlow::CollapseIdempotent => collapse_idempotent_flow(driver, ctx).await,
            BrowserFlow::ExclusiveExpand => exclusive_expand_flow(driver, ctx).await,
        }
    }
}

impl CombinedScenario for StorefrontScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario {
            name: self.title.to_string(),
            checks: self.checks.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_logic_checks_pass_against_builtin_table() {
        let reconciler = Reconciler::default();
        for scenario in SCENARIOS {
            for (label, check) in scenario.checks {
                check(&reconciler).unwrap_or_else(|err| {
                    panic!("{} / {label} failed: {err:#}", scenario.key)
                });
            }
        }
    }

    fn loaded_state(href: Option<&str>, expanded: Vec<bool>) -> PageState {
        PageState {
            cart_href: href.map(str::to_string),
            cart_key: "single-original".to_string(),
            expanded,
            ..PageState::default()
        }
    }

    #[test]
    fn loaded_page_accepts_link_and_single_open_plan() {
        let state = loaded_state(
            Some("https://example.com/cart/single-original"),
            vec![true, false, false],
        );
        check_loaded_page(&state).expect("healthy page");
        // still usable after the check borrowed it
        assert_eq!(state.expanded_count(), 1);
    }

    #[test]
    fn loaded_page_rejects_missing_href_and_double_expansion() {
        let no_href = loaded_state(None, vec![false, false, false]);
        assert!(check_loaded_page(&no_href).is_err());

        let two_open = loaded_state(
            Some("https://example.com/cart/single-original"),
            vec![true, true, false],
        );
        let err = check_loaded_page(&two_open).expect_err("two plans open");
        assert!(err.to_string().contains("2 plan blocks expanded"));
    }

    #[test]
    fn wired_pairs_cover_single_and_double_only() {
        let pairs: Vec<_> = wired_pairs().collect();
        assert_eq!(pairs.len(), 6);
        assert!(pairs.iter().all(|(plan, _, _)| *plan != Plan::Triple));
    }

    #[test]
    fn wired_check_fails_on_a_broken_table() {
        let json = r#"{"fallback":"single-original","urls":{
            "single-original":"https://example.com/cart/single-original",
            "single-lily":"https://example.com/cart/single-original",
            "single-rose":"https://example.com/cart/single-rose",
            "double-original":"https://example.com/cart/double-original",
            "double-lily":"https://example.com/cart/double-lily",
            "double-rose":"https://example.com/cart/double-rose",
            "triple-original":"https://example.com/cart/triple-original",
            "triple-lily":"https://example.com/cart/triple-lily",
            "triple-rose":"https://example.com/cart/triple-rose"}}"#;
        let table = storefront_core::CartUrlTable::from_json(json).expect("valid table");
        let reconciler = Reconciler::new(table);
        assert!(wired_combinations_resolve(&reconciler).is_err());
    }
}
