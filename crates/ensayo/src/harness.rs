//! Scenario harness.
//!
//! Runs named scenarios sequentially against one shared session.
//! Failures are terminal for the scenario only: the run records the
//! error, optionally captures a screenshot artifact, and continues with
//! the next scenario. Successful runs report pass counts only.

use std::future::Future;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::actions::Actions;
use crate::driver::Driver;
use crate::result::EnsayoResult;

/// Outcome of one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    /// Scenario name
    pub name: String,
    /// Whether the scenario passed
    pub passed: bool,
    /// Error message if failed
    pub error: Option<String>,
    /// Wall-clock duration
    pub duration: Duration,
    /// Failure screenshot artifact, when captured
    pub screenshot: Option<PathBuf>,
}

impl ScenarioResult {
    /// Record a passing scenario.
    #[must_use]
    pub fn pass(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            passed: true,
            error: None,
            duration,
            screenshot: None,
        }
    }

    /// Record a failing scenario.
    #[must_use]
    pub fn fail(name: impl Into<String>, error: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            passed: false,
            error: Some(error.into()),
            duration,
            screenshot: None,
        }
    }
}

/// Aggregated results of a suite run.
#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    /// Individual scenario results, in execution order
    pub results: Vec<ScenarioResult>,
}

impl SuiteReport {
    /// Whether every scenario passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Count of passing scenarios.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// Count of failing scenarios.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }

    /// Total scenario count.
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Failing scenarios only.
    #[must_use]
    pub fn failures(&self) -> Vec<&ScenarioResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }
}

/// Sequential scenario runner bound to one session.
#[derive(Debug)]
pub struct ScenarioRunner<D> {
    actions: Actions<D>,
    report: SuiteReport,
}

impl<D: Driver> ScenarioRunner<D> {
    /// Create a runner over an action vocabulary.
    #[must_use]
    pub fn new(actions: Actions<D>) -> Self {
        Self {
            actions,
            report: SuiteReport::default(),
        }
    }

    /// Run one named scenario and record its outcome.
    ///
    /// The scenario receives a clone of the action vocabulary sharing the
    /// session. A failure does not propagate; the runner captures a
    /// screenshot artifact when configured and moves on.
    pub async fn run<F, Fut>(&mut self, name: &str, scenario: F)
    where
        F: FnOnce(Actions<D>) -> Fut,
        Fut: Future<Output = EnsayoResult<()>>,
    {
        let start = Instant::now();
        tracing::info!(scenario = name, "start");
        match scenario(self.actions.clone()).await {
            Ok(()) => {
                tracing::info!(scenario = name, "pass");
                self.report
                    .results
                    .push(ScenarioResult::pass(name, start.elapsed()));
            }
            Err(e) => {
                tracing::error!(scenario = name, error = %e, "fail");
                let mut result = ScenarioResult::fail(name, e.to_string(), start.elapsed());
                if self.actions.config().screenshot_on_failure {
                    result.screenshot = self.capture_screenshot(name).await;
                }
                self.report.results.push(result);
            }
        }
    }

    /// The report accumulated so far.
    #[must_use]
    pub fn report(&self) -> &SuiteReport {
        &self.report
    }

    /// Consume the runner and return its report.
    #[must_use]
    pub fn into_report(self) -> SuiteReport {
        self.report
    }

    async fn capture_screenshot(&self, name: &str) -> Option<PathBuf> {
        let dir = &self.actions.config().artifact_dir;
        let path = dir.join(format!("{}.png", slugify(name)));
        let bytes = match self.actions.driver().screenshot().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(scenario = name, error = %e, "screenshot capture failed");
                return None;
            }
        };
        if let Err(e) = std::fs::create_dir_all(dir).and_then(|()| std::fs::write(&path, bytes)) {
            tracing::warn!(scenario = name, error = %e, "screenshot write failed");
            return None;
        }
        Some(path)
    }
}

fn slugify(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}
