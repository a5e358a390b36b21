use crate::comparator::{Comparison, compare_output};
use crate::discovery::{FixtureFilter, discover_fixtures};
use crate::domain::{
    ExitState, Fixture, FixtureOutcome, FixtureReport, GoldenError, GoldenResult, RunSummary,
};
use crate::executor::{Executor, ProcessExecutor};
use crate::report::{RunReport, write_report_file};
use crate::reporter::Reporter;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub executable_path: PathBuf,
    pub sources_dir: PathBuf,
    pub filter: Option<String>,
    pub timeout: Option<Duration>,
    pub report_path: Option<PathBuf>,
}

impl RunnerConfig {
    pub fn new(executable_path: impl Into<PathBuf>, sources_dir: impl Into<PathBuf>) -> Self {
        Self {
            executable_path: executable_path.into(),
            sources_dir: sources_dir.into(),
            filter: None,
            timeout: None,
            report_path: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("invalid fixture filter '{pattern}': {source}")]
    InvalidFilter {
        pattern: String,
        source: globset::Error,
    },
    #[error("failed to read directory '{}': {source}", path.display())]
    ReadDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read expected output '{}': {source}", path.display())]
    ReadExpectation {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to start the laszlo interpreter '{}': {source}", path.display())]
    SpawnExecutor {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to wait for the laszlo interpreter on '{}': {source}", fixture.display())]
    WaitExecutor {
        fixture: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to capture interpreter output for '{}': {source}", fixture.display())]
    CaptureOutput {
        fixture: PathBuf,
        source: std::io::Error,
    },
    #[error(
        "failed to execute the laszlo interpreter on '{}': {status}\n{}",
        fixture.display(),
        stderr.trim_end()
    )]
    ExecutorFailed {
        fixture: PathBuf,
        status: ExitState,
        stderr: String,
    },
    #[error(
        "the laszlo interpreter did not finish '{}' within {:.3}s and was killed",
        fixture.display(),
        timeout.as_secs_f64()
    )]
    ExecutorTimedOut { fixture: PathBuf, timeout: Duration },
    #[error("failed to create report directory '{}': {source}", path.display())]
    ReportDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize report '{}': {source}", path.display())]
    SerializeReport {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write report '{}': {source}", path.display())]
    WriteReport {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<RunnerError> for GoldenError {
    fn from(error: RunnerError) -> Self {
        let message = error.to_string();
        match error {
            RunnerError::InvalidFilter { .. } => GoldenError::usage("INPUT.FILTER_GLOB", message),
            RunnerError::ReadDirectory { .. } => {
                GoldenError::io_system("IO.SOURCES_DIRECTORY", message)
            }
            RunnerError::ReadExpectation { .. } => {
                GoldenError::io_system("IO.EXPECTATION_READ", message)
            }
            RunnerError::SpawnExecutor { .. } => {
                GoldenError::io_system("IO.EXECUTOR_SPAWN", message)
            }
            RunnerError::WaitExecutor { .. } | RunnerError::CaptureOutput { .. } => {
                GoldenError::io_system("IO.EXECUTOR_PROCESS", message)
            }
            RunnerError::ExecutorFailed { .. } => {
                GoldenError::executor_crash("RUN.EXECUTOR_EXIT", message)
            }
            RunnerError::ExecutorTimedOut { .. } => {
                GoldenError::executor_crash("RUN.EXECUTOR_TIMEOUT", message)
            }
            RunnerError::ReportDirectory { .. } | RunnerError::WriteReport { .. } => {
                GoldenError::io_system("IO.REPORT_FILESYSTEM", message)
            }
            RunnerError::SerializeReport { .. } => {
                GoldenError::internal("SYS.REPORT_SERIALIZE", message)
            }
        }
    }
}

/// Validates the configured paths, runs every discovered fixture through the
/// interpreter, and optionally writes a JSON report.
///
/// A fixture failure (missing expectation or mismatching output) is recorded in
/// the returned summary. Anything that makes the rest of the session
/// meaningless, including an interpreter exiting with a nonzero status, is
/// returned as an error and stops the run at that fixture.
pub fn run_suite(config: &RunnerConfig, reporter: &mut dyn Reporter) -> GoldenResult<RunSummary> {
    let executable_path = resolve_executable(&config.executable_path)?;
    let sources_dir = resolve_sources_dir(&config.sources_dir)?;
    let filter = match config.filter.as_deref() {
        Some(pattern) => FixtureFilter::from_glob(pattern)?,
        None => FixtureFilter::all(),
    };

    let executor = ProcessExecutor::new(&executable_path).with_timeout(config.timeout);
    let summary = run_fixtures(&sources_dir, &filter, &executor, reporter)?;

    if let Some(report_path) = &config.report_path {
        let report = RunReport::new(&executable_path, &sources_dir, &summary);
        write_report_file(report_path, &report)?;
    }
    Ok(summary)
}

pub fn run_fixtures<E>(
    sources_dir: &Path,
    filter: &FixtureFilter,
    executor: &E,
    reporter: &mut dyn Reporter,
) -> GoldenResult<RunSummary>
where
    E: Executor + ?Sized,
{
    let fixtures = discover_fixtures(sources_dir, filter)?;

    let mut summary = RunSummary::default();
    for fixture in &fixtures {
        if !fixture.expectation_path.is_file() {
            reporter.missing_expectation(fixture);
            summary.record(FixtureReport::new(
                fixture,
                FixtureOutcome::MissingExpectation,
            ));
            continue;
        }

        let expected_output = load_expectation(&fixture.expectation_path)?;
        let outcome = run_one_test(executor, fixture, &expected_output, reporter)?;
        summary.record(FixtureReport::new(fixture, outcome));
    }

    reporter.finished(&summary);
    Ok(summary)
}

pub fn run_one_test<E>(
    executor: &E,
    fixture: &Fixture,
    expected_output: &str,
    reporter: &mut dyn Reporter,
) -> GoldenResult<FixtureOutcome>
where
    E: Executor + ?Sized,
{
    reporter.fixture_started(fixture);
    let result = executor.execute(fixture)?;
    if !result.status.success() {
        return Err(RunnerError::ExecutorFailed {
            fixture: fixture.path.clone(),
            status: result.status,
            stderr: result.stderr,
        }
        .into());
    }

    match compare_output(&result.stdout, expected_output) {
        Comparison::Match => {
            reporter.fixture_passed(fixture);
            Ok(FixtureOutcome::Passed)
        }
        Comparison::Mismatch { diff } => {
            reporter.output_mismatch(fixture, &diff);
            Ok(FixtureOutcome::OutputMismatch { diff })
        }
    }
}

fn load_expectation(path: &Path) -> Result<String, RunnerError> {
    fs::read_to_string(path).map_err(|source| RunnerError::ReadExpectation {
        path: path.to_path_buf(),
        source,
    })
}

fn resolve_executable(path: &Path) -> GoldenResult<PathBuf> {
    match fs::canonicalize(path) {
        Ok(resolved) if resolved.is_file() => Ok(resolved),
        _ => Err(GoldenError::path_not_found(
            "INPUT.EXECUTABLE_NOT_FOUND",
            format!(
                "the provided path for the laszlo interpreter doesn't seem to specify an existing file (file not found): '{}'",
                path.display()
            ),
        )),
    }
}

fn resolve_sources_dir(path: &Path) -> GoldenResult<PathBuf> {
    match fs::canonicalize(path) {
        Ok(resolved) if resolved.is_dir() => Ok(resolved),
        Ok(resolved) => Err(sources_dir_not_found(&resolved)),
        Err(_) => Err(sources_dir_not_found(path)),
    }
}

fn sources_dir_not_found(path: &Path) -> GoldenError {
    GoldenError::path_not_found(
        "INPUT.SOURCES_DIR_NOT_FOUND",
        format!("laszlo sources directory not found at '{}'", path.display()),
    )
}
