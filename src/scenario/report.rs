//! Run report types and rendering
//!
//! The report carries the suite version and the browser identification
//! alongside the per-step outcomes, so a CI log identifies exactly what
//! ran against what.

use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Outcome of a single step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    /// The step ran and its postcondition held
    Passed,
    /// The step ran and failed; the message names the violated expectation
    Failed { message: String },
    /// A prior step failed, so this step never ran
    Skipped,
}

/// Record of one step in the run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    /// 1-based position in the journey
    pub index: usize,
    pub name: String,
    #[serde(flatten)]
    pub status: StepStatus,
    pub duration_ms: u64,
}

impl StepReport {
    pub fn passed(index: usize, name: &str, duration_ms: u64) -> Self {
        Self {
            index,
            name: name.to_string(),
            status: StepStatus::Passed,
            duration_ms,
        }
    }

    pub fn failed(index: usize, name: &str, message: String, duration_ms: u64) -> Self {
        Self {
            index,
            name: name.to_string(),
            status: StepStatus::Failed { message },
            duration_ms,
        }
    }

    pub fn skipped(index: usize, name: &str) -> Self {
        Self {
            index,
            name: name.to_string(),
            status: StepStatus::Skipped,
            duration_ms: 0,
        }
    }
}

/// Full record of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Configured report title
    pub title: String,
    /// Suite version baked in at build time
    pub suite_version: String,
    /// Browser user-agent captured at session launch
    pub browser: String,
    /// Environment selector the run targeted
    pub environment: String,
    pub steps: Vec<StepReport>,
    pub duration_ms: u64,
}

impl RunReport {
    pub fn new(
        title: String,
        environment: String,
        browser: String,
        steps: Vec<StepReport>,
        duration_ms: u64,
    ) -> Self {
        Self {
            title,
            suite_version: env!("CARGO_PKG_VERSION").to_string(),
            browser,
            environment,
            steps,
            duration_ms,
        }
    }

    /// The run passed only if every step passed
    pub fn passed(&self) -> bool {
        self.steps
            .iter()
            .all(|s| matches!(s.status, StepStatus::Passed))
    }

    /// Counts of (passed, failed, skipped)
    pub fn tally(&self) -> (usize, usize, usize) {
        let mut tally = (0, 0, 0);
        for step in &self.steps {
            match step.status {
                StepStatus::Passed => tally.0 += 1,
                StepStatus::Failed { .. } => tally.1 += 1,
                StepStatus::Skipped => tally.2 += 1,
            }
        }
        tally
    }

    /// Print the human-readable summary
    pub fn render(&self) {
        println!(
            "\n{} {} (suite {}, env {})",
            "Report:".blue().bold(),
            self.title.white().bold(),
            self.suite_version,
            self.environment
        );
        println!("  {}", self.browser.dimmed());

        for step in &self.steps {
            match &step.status {
                StepStatus::Passed => println!(
                    "  {} Step {}: {} ({}ms)",
                    "✓".green(),
                    step.index,
                    step.name,
                    step.duration_ms
                ),
                StepStatus::Failed { message } => {
                    println!("  {} Step {}: {}: {}", "✗".red(), step.index, step.name, message)
                }
                StepStatus::Skipped => println!(
                    "  {} Step {}: {} (skipped)",
                    "-".dimmed(),
                    step.index,
                    step.name.dimmed()
                ),
            }
        }

        let (passed, failed, skipped) = self.tally();
        let verdict = if self.passed() {
            "Run Passed".green().bold()
        } else {
            "Run Failed".red().bold()
        };
        println!(
            "\n{verdict}: {passed} passed, {failed} failed, {skipped} skipped in {}ms\n",
            self.duration_ms
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunReport {
        RunReport::new(
            "Webcast Portal Regression".into(),
            "dev".into(),
            "Mozilla/5.0 HeadlessChrome/120.0".into(),
            vec![
                StepReport::passed(1, "login", 1200),
                StepReport::passed(2, "open-portal", 800),
                StepReport::failed(3, "create-webcast", "Element 'xpath://button' not found within 30s".into(), 30_000),
                StepReport::skipped(4, "upload-media"),
                StepReport::skipped(5, "activate-manage"),
                StepReport::skipped(6, "configure-layout"),
                StepReport::skipped(7, "toggle-status"),
            ],
            32_000,
        )
    }

    #[test]
    fn verdict_requires_every_step_to_pass() {
        let report = sample();
        assert!(!report.passed());

        let clean = RunReport::new(
            "t".into(),
            "dev".into(),
            "ua".into(),
            vec![StepReport::passed(1, "login", 10)],
            10,
        );
        assert!(clean.passed());
    }

    #[test]
    fn a_skipped_step_fails_the_run() {
        let report = RunReport::new(
            "t".into(),
            "dev".into(),
            "ua".into(),
            vec![
                StepReport::passed(1, "login", 10),
                StepReport::skipped(2, "open-portal"),
            ],
            10,
        );
        assert!(!report.passed());
    }

    #[test]
    fn tally_counts_each_status() {
        assert_eq!(sample().tally(), (2, 1, 4));
    }

    #[test]
    fn failure_cascade_marks_only_trailing_steps_skipped() {
        let report = sample();
        let first_failure = report
            .steps
            .iter()
            .position(|s| matches!(s.status, StepStatus::Failed { .. }))
            .unwrap();
        for (i, step) in report.steps.iter().enumerate() {
            match i.cmp(&first_failure) {
                std::cmp::Ordering::Less => {
                    assert!(matches!(step.status, StepStatus::Passed))
                }
                std::cmp::Ordering::Greater => {
                    assert!(matches!(step.status, StepStatus::Skipped))
                }
                std::cmp::Ordering::Equal => {}
            }
        }
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = sample();
        let json = serde_json::to_string(&report).unwrap();
        let back: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.steps.len(), report.steps.len());
        assert_eq!(back.steps[2].status, report.steps[2].status);
        assert!(!back.passed());
    }

    #[test]
    fn report_carries_suite_version() {
        assert_eq!(sample().suite_version, env!("CARGO_PKG_VERSION"));
    }
}
