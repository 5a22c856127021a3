use anyhow::Result;
use storefront_core::Reconciler;
use thirtyfour::prelude::*;

use crate::browser::StorefrontBridge;

pub mod catalog;

use catalog::{SCENARIOS, StorefrontScenario};

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub bridge: StorefrontBridge<'a>,
    pub verbose: bool,
}

/// A single assertion against the pure reconciler.
pub type LogicCheck = fn(&Reconciler) -> Result<()>;

// Logic test scenario
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub checks: Vec<(&'static str, LogicCheck)>,
}

// Browser test scenario
#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;
}

// Combined scenario that can run both logic and browser tests
pub trait CombinedScenario: BrowserScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario>;
}

fn find(name: &str) -> Option<&'static StorefrontScenario> {
    let name = name.to_lowercase();
    SCENARIOS
        .iter()
        .find(|scenario| scenario.key == name || scenario.aliases.contains(&name.as_str()))
}

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    find(name).map(|scenario| Box::new(scenario.clone()) as _)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS
        .iter()
        .map(|scenario| (scenario.key, scenario.title))
        .collect()
}

/// Keys of every registered scenario, in listing order.
pub fn all_scenario_keys() -> Vec<String> {
    SCENARIOS
        .iter()
        .map(|scenario| scenario.key.to_string())
        .collect()
}
