//! Scenario execution
//!
//! Runs the journey's steps in order against one browser session. The
//! steps are interdependent, so the first failure leaves the rest
//! unrunnable: they are recorded as skipped without executing. The
//! session is released exactly once on every path out of the run.

use std::time::Instant;

use colored::Colorize;

use super::report::{RunReport, StepReport};
use super::{steps, StepContext};
use crate::browser::Session;
use crate::common::config::{Config, EnvConfig, EnvName};
use crate::common::Result;

/// Run the full journey and report per-step outcomes
///
/// Returns `Err` only when the run could not start (no browser, launch
/// failure); step failures are part of the report, not errors.
pub async fn run_journey(
    config: &Config,
    env: &EnvConfig,
    env_name: EnvName,
    headed: bool,
) -> Result<RunReport> {
    let steps = steps::all();

    println!(
        "\n{} {}",
        "Running:".blue().bold(),
        config.report.title.white().bold()
    );
    println!("  environment: {}", env_name.to_string().dimmed());

    let mut session = Session::launch(&config.browser, env.driver.as_deref(), headed).await?;
    let browser = session.user_agent().to_string();

    let started = Instant::now();
    let mut reports: Vec<StepReport> = Vec::with_capacity(steps.len());
    let mut failed = false;

    println!("\n{}", "Steps:".cyan());
    {
        let ctx = StepContext {
            session: &session,
            env,
            timeouts: &config.timeouts,
        };

        for (i, step) in steps.iter().enumerate() {
            let index = i + 1;

            if failed {
                println!(
                    "  {} Step {}: {} (skipped)",
                    "-".dimmed(),
                    index,
                    step.name().dimmed()
                );
                reports.push(StepReport::skipped(index, step.name()));
                continue;
            }

            let step_started = Instant::now();
            match step.run(&ctx).await {
                Ok(()) => {
                    let ms = step_started.elapsed().as_millis() as u64;
                    println!(
                        "  {} Step {}: {} ({}ms)",
                        "✓".green(),
                        index,
                        step.name().dimmed(),
                        ms
                    );
                    reports.push(StepReport::passed(index, step.name(), ms));
                }
                Err(e) => {
                    let ms = step_started.elapsed().as_millis() as u64;
                    println!("  {} Step {}: {}", "✗".red(), index, e);
                    reports.push(StepReport::failed(index, step.name(), e.to_string(), ms));
                    failed = true;
                }
            }
        }
    }

    // Always, and only here: the run's single release
    session.close().await;
    debug_assert!(session.is_released());

    Ok(RunReport::new(
        config.report.title.clone(),
        env_name.to_string(),
        browser,
        reports,
        started.elapsed().as_millis() as u64,
    ))
}
