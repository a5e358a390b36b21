use crate::domain::{Fixture, RunSummary};
use std::path::PathBuf;

/// Sink for the progress and failure events of a suite run.
pub trait Reporter {
    fn fixture_started(&mut self, fixture: &Fixture);
    fn fixture_passed(&mut self, fixture: &Fixture);
    fn missing_expectation(&mut self, fixture: &Fixture);
    fn output_mismatch(&mut self, fixture: &Fixture, diff: &str);
    fn finished(&mut self, summary: &RunSummary);
}

/// Forwards events to `tracing`, keeping the severities of the original
/// harness: progress at debug, failures at error, the final verdict at info or
/// error.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn fixture_started(&mut self, fixture: &Fixture) {
        tracing::debug!(
            fixture = %fixture.path.display(),
            "running test for '{}'...",
            fixture.path.display()
        );
    }

    fn fixture_passed(&mut self, fixture: &Fixture) {
        tracing::debug!(fixture = %fixture.path.display(), "success");
    }

    fn missing_expectation(&mut self, fixture: &Fixture) {
        tracing::error!(
            fixture = %fixture.path.display(),
            expectation = %fixture.expectation_path.display(),
            "source file '{}' doesn't seem to have a corresponding file containing its expected output (expected '{}')",
            fixture.path.display(),
            fixture.expectation_path.display()
        );
    }

    fn output_mismatch(&mut self, fixture: &Fixture, diff: &str) {
        tracing::error!(
            fixture = %fixture.path.display(),
            "output does not match the expected output"
        );
        tracing::error!("\n{diff}");
    }

    fn finished(&mut self, summary: &RunSummary) {
        if summary.passed() {
            tracing::info!(num_run = summary.num_run, "all {} tests succeeded", summary.num_run);
        } else {
            tracing::error!(
                num_run = summary.num_run,
                num_failed = summary.num_failed,
                "{} out {} tests of failed",
                summary.num_failed,
                summary.num_run
            );
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    Started(PathBuf),
    Passed(PathBuf),
    MissingExpectation {
        fixture: PathBuf,
        expectation: PathBuf,
    },
    OutputMismatch {
        fixture: PathBuf,
        diff: String,
    },
    Finished {
        num_run: usize,
        num_failed: usize,
    },
}

/// Records events in order instead of logging them.
#[derive(Debug, Default, Clone)]
pub struct MemoryReporter {
    pub events: Vec<ReportEvent>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ReportEvent> {
        self.events.iter().filter(|event| {
            matches!(
                event,
                ReportEvent::MissingExpectation { .. } | ReportEvent::OutputMismatch { .. }
            )
        })
    }
}

impl Reporter for MemoryReporter {
    fn fixture_started(&mut self, fixture: &Fixture) {
        self.events.push(ReportEvent::Started(fixture.path.clone()));
    }

    fn fixture_passed(&mut self, fixture: &Fixture) {
        self.events.push(ReportEvent::Passed(fixture.path.clone()));
    }

    fn missing_expectation(&mut self, fixture: &Fixture) {
        self.events.push(ReportEvent::MissingExpectation {
            fixture: fixture.path.clone(),
            expectation: fixture.expectation_path.clone(),
        });
    }

    fn output_mismatch(&mut self, fixture: &Fixture, diff: &str) {
        self.events.push(ReportEvent::OutputMismatch {
            fixture: fixture.path.clone(),
            diff: diff.to_string(),
        });
    }

    fn finished(&mut self, summary: &RunSummary) {
        self.events.push(ReportEvent::Finished {
            num_run: summary.num_run,
            num_failed: summary.num_failed,
        });
    }
}
