use crate::domain::{FixtureReport, RunSummary, normalize_path};
use crate::runner::RunnerError;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at_unix_seconds: u64,
    pub passed: bool,
    pub executable_path: String,
    pub sources_dir: String,
    pub num_run: usize,
    pub num_failed: usize,
    pub fixtures: Vec<FixtureReport>,
}

impl RunReport {
    pub fn new(executable_path: &Path, sources_dir: &Path, summary: &RunSummary) -> Self {
        Self {
            generated_at_unix_seconds: current_unix_timestamp_seconds(),
            passed: summary.passed(),
            executable_path: normalize_path(executable_path),
            sources_dir: normalize_path(sources_dir),
            num_run: summary.num_run,
            num_failed: summary.num_failed,
            fixtures: summary.fixtures.clone(),
        }
    }
}

pub fn write_report_file(report_path: &Path, report: &RunReport) -> Result<(), RunnerError> {
    if let Some(parent_dir) = report_path.parent() {
        fs::create_dir_all(parent_dir).map_err(|source| RunnerError::ReportDirectory {
            path: parent_dir.to_path_buf(),
            source,
        })?;
    }

    let report_json =
        serde_json::to_string_pretty(report).map_err(|source| RunnerError::SerializeReport {
            path: report_path.to_path_buf(),
            source,
        })?;
    fs::write(report_path, report_json).map_err(|source| RunnerError::WriteReport {
        path: report_path.to_path_buf(),
        source,
    })
}

fn current_unix_timestamp_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}
