pub mod errors;

pub use errors::{GoldenError, GoldenErrorCategory, GoldenResult};

use serde::Serialize;
use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const FIXTURE_EXTENSION: &str = "las";
pub const EXPECTATION_SUFFIX: &str = "_expected.txt";

/// A `.las` source file handed to the interpreter as a single test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub path: PathBuf,
    /// Name of the directory entry the fixture was found under; discovery
    /// filters and orders on it.
    pub file_name: OsString,
    pub expectation_path: PathBuf,
}

impl Fixture {
    /// `path` must already be canonical; the expectation lives in `sources_dir`
    /// under the fixture's base name.
    pub fn new(sources_dir: &Path, path: PathBuf) -> Option<Self> {
        let mut expectation_name = path.file_stem()?.to_os_string();
        expectation_name.push(EXPECTATION_SUFFIX);
        let expectation_path = sources_dir.join(expectation_name);
        let file_name = path.file_name()?.to_os_string();
        Some(Self {
            path,
            file_name,
            expectation_path,
        })
    }

    pub fn with_file_name(mut self, file_name: impl Into<OsString>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Base name of the entry, lossily decoded for display.
    pub fn name(&self) -> String {
        let file_name = Path::new(&self.file_name);
        file_name
            .file_stem()
            .unwrap_or(file_name.as_os_str())
            .to_string_lossy()
            .into_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitState {
    Code(i32),
    Signal,
}

impl ExitState {
    pub const fn success(self) -> bool {
        matches!(self, Self::Code(0))
    }
}

impl Display for ExitState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Code(code) => write!(f, "return code {code}"),
            Self::Signal => f.write_str("terminated by signal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResult {
    pub status: ExitState,
    pub stdout: String,
    pub stderr: String,
}

impl InvocationResult {
    pub fn new(status: ExitState, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            status,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FixtureOutcome {
    Passed,
    MissingExpectation,
    OutputMismatch { diff: String },
}

impl FixtureOutcome {
    pub const fn passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureReport {
    pub fixture_path: String,
    pub expectation_path: String,
    pub passed: bool,
    pub outcome: FixtureOutcome,
}

impl FixtureReport {
    pub fn new(fixture: &Fixture, outcome: FixtureOutcome) -> Self {
        Self {
            fixture_path: normalize_path(&fixture.path),
            expectation_path: normalize_path(&fixture.expectation_path),
            passed: outcome.passed(),
            outcome,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub num_run: usize,
    pub num_failed: usize,
    pub fixtures: Vec<FixtureReport>,
}

impl RunSummary {
    pub fn record(&mut self, report: FixtureReport) {
        self.num_run += 1;
        if !report.passed {
            self.num_failed += 1;
        }
        self.fixtures.push(report);
    }

    pub const fn passed(&self) -> bool {
        self.num_failed == 0
    }

    pub const fn exit_code(&self) -> i32 {
        if self.passed() { 0 } else { 1 }
    }
}

pub(crate) fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::{ExitState, Fixture, FixtureOutcome, FixtureReport, RunSummary};
    use std::path::{Path, PathBuf};

    #[test]
    fn fixture_derives_sibling_expectation_path() {
        let fixture = Fixture::new(Path::new("/suite"), PathBuf::from("/suite/loops.las"))
            .expect("fixture should have a base name");
        assert_eq!(fixture.name(), "loops");
        assert_eq!(fixture.file_name, "loops.las");
        assert_eq!(
            fixture.expectation_path,
            PathBuf::from("/suite/loops_expected.txt")
        );
    }

    #[test]
    fn summary_counts_failures_and_sets_exit_code() {
        let passing = Fixture::new(Path::new("/s"), PathBuf::from("/s/a.las")).unwrap();
        let failing = Fixture::new(Path::new("/s"), PathBuf::from("/s/b.las")).unwrap();

        let mut summary = RunSummary::default();
        summary.record(FixtureReport::new(&passing, FixtureOutcome::Passed));
        assert!(summary.passed());
        assert_eq!(summary.exit_code(), 0);

        summary.record(FixtureReport::new(
            &failing,
            FixtureOutcome::MissingExpectation,
        ));
        assert_eq!(summary.num_run, 2);
        assert_eq!(summary.num_failed, 1);
        assert!(!summary.passed());
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn exit_state_renders_code_or_signal() {
        assert!(ExitState::Code(0).success());
        assert!(!ExitState::Code(2).success());
        assert!(!ExitState::Signal.success());
        assert_eq!(ExitState::Code(2).to_string(), "return code 2");
        assert_eq!(ExitState::Signal.to_string(), "terminated by signal");
    }
}
