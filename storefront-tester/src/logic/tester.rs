use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use storefront_core::Reconciler;

use crate::common::scenario::TestScenario;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub checks_run: usize,
    pub successful_checks: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
}

pub struct LogicTester {
    reconciler: Reconciler,
    verbose: bool,
}

impl LogicTester {
    pub const fn new(reconciler: Reconciler, verbose: bool) -> Self {
        Self {
            reconciler,
            verbose,
        }
    }

    pub fn run_scenario(&self, scenario: &TestScenario) -> ScenarioResult {
        if self.verbose {
            println!("🧪 Testing scenario: {}", scenario.name.bright_white());
        }

        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();

        for (label, check) in &scenario.checks {
            let start_time = Instant::now();
            let outcome = check(&self.reconciler);
            let duration = start_time.elapsed();
            performance_data.push(duration);

            match outcome {
                Ok(()) => {
                    successes += 1;
                    if self.verbose {
                        println!("  ✅ {label} ({duration:?})");
                    }
                }
                Err(err) => {
                    let message = format!("{label}: {err:#}");
                    if self.verbose {
                        println!("  ❌ {}", message.clone().red());
                    }
                    failures.push(message);
                }
            }
        }

        ScenarioResult {
            scenario_name: scenario.name.clone(),
            passed: failures.is_empty(),
            checks_run: scenario.checks.len(),
            successful_checks: successes,
            failures,
            total_duration: performance_data.iter().sum(),
            performance_data,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_micros().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros = u128::deserialize(deserializer)?;
        Ok(Duration::from_micros(u64::try_from(micros).unwrap_or(0)))
    }
}

mod duration_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let micros: Vec<u128> = durations.iter().map(Duration::as_micros).collect();
        micros.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros_vec = Vec::<u128>::deserialize(deserializer)?;
        Ok(micros_vec
            .into_iter()
            .map(|m| Duration::from_micros(u64::try_from(m).unwrap_or(0)))
            .collect())
    }
}
