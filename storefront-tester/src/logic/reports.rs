use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::ScenarioResult;

struct Summary {
    total: usize,
    passed: usize,
    failed: usize,
    success_rate: f64,
}

fn summarize(results: &[ScenarioResult]) -> Summary {
    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    #[allow(clippy::cast_precision_loss)]
    let success_rate = if total == 0 {
        0.0
    } else {
        (passed as f64 / total as f64) * 100.0
    };
    Summary {
        total,
        passed,
        failed: total - passed,
        success_rate,
    }
}

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Logic Test Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "==============================".cyan())?;

    let summary = summarize(results);
    writeln!(out, "Total scenarios: {}", summary.total)?;
    writeln!(out, "Passed: {}", summary.passed.to_string().green())?;
    writeln!(out, "Failed: {}", summary.failed.to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", summary.success_rate)?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };

        writeln!(out, "{} {}", status, result.scenario_name.bold())?;
        writeln!(
            out,
            "   Checks: {}/{} passed",
            result.successful_checks, result.checks_run
        )?;
        writeln!(out, "   Time: {:?}", result.total_duration)?;

        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }

    let fastest = results.iter().min_by_key(|r| r.total_duration);
    let slowest = results.iter().max_by_key(|r| r.total_duration);
    if let (Some(fastest), Some(slowest)) = (fastest, slowest) {
        writeln!(out, "{}", "⚡ Performance Summary".bright_yellow().bold())?;
        writeln!(out, "{}", "=====================".yellow())?;
        writeln!(
            out,
            "Fastest: {} ({:?})",
            fastest.scenario_name.green(),
            fastest.total_duration
        )?;
        writeln!(
            out,
            "Slowest: {} ({:?})",
            slowest.scenario_name.yellow(),
            slowest.total_duration
        )?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(out, "# Storefront Logic Test Results\n")?;

    let summary = summarize(results);
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total scenarios**: {}", summary.total)?;
    writeln!(out, "- **Passed**: {}", summary.passed)?;
    writeln!(out, "- **Failed**: {}", summary.failed)?;
    writeln!(out, "- **Success rate**: {:.1}%\n", summary.success_rate)?;

    writeln!(out, "## Detailed Results\n")?;

    for result in results {
        let status = if result.passed { "✅" } else { "❌" };

        writeln!(out, "### {} {}\n", status, result.scenario_name)?;
        writeln!(
            out,
            "- **Checks**: {}/{} passed",
            result.successful_checks, result.checks_run
        )?;
        writeln!(out, "- **Time**: {:?}", result.total_duration)?;

        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, passed: bool) -> ScenarioResult {
        ScenarioResult {
            scenario_name: name.to_string(),
            passed,
            checks_run: 2,
            successful_checks: if passed { 2 } else { 1 },
            failures: if passed {
                Vec::new()
            } else {
                vec!["wired combinations: single-lily fell back".to_string()]
            },
            total_duration: Duration::from_micros(40),
            performance_data: vec![Duration::from_micros(20), Duration::from_micros(20)],
        }
    }

    #[test]
    fn markdown_lists_failures() {
        let mut out = Vec::new();
        generate_markdown_report(&mut out, &[result("Smoke", true), result("Matrix", false)])
            .expect("markdown");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("- **Passed**: 1"));
        assert!(text.contains("single-lily fell back"));
    }

    #[test]
    fn console_handles_empty_results() {
        let mut out = Vec::new();
        generate_console_report(&mut out, &[], Duration::ZERO).expect("console");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("Total scenarios: 0"));
        assert!(!text.contains("Performance Summary"));
    }
}
