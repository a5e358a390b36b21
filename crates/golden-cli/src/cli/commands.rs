use super::CliError;
use golden_core::{RunnerConfig, TracingReporter, run_suite};
use std::path::PathBuf;
use std::time::Duration;

#[derive(clap::Args)]
pub(super) struct RunArgs {
    /// Path to the laszlo interpreter under test
    #[arg(value_name = "LASZLO EXECUTABLE PATH")]
    executable: PathBuf,

    /// Directory holding `.las` sources and their `<name>_expected.txt` files
    #[arg(value_name = "SOURCES DIRECTORY PATH")]
    sources_dir: PathBuf,

    /// Only run fixtures whose file name matches this glob
    #[arg(long, value_name = "GLOB")]
    filter: Option<String>,

    /// Kill the interpreter and abort the run if one fixture takes longer
    #[arg(long, value_name = "SECONDS", value_parser = parse_timeout)]
    timeout: Option<Duration>,

    /// Write a JSON run report to this path
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
}

impl RunArgs {
    fn into_config(self) -> RunnerConfig {
        RunnerConfig {
            executable_path: self.executable,
            sources_dir: self.sources_dir,
            filter: self.filter,
            timeout: self.timeout,
            report_path: self.report,
        }
    }
}

pub(super) fn run_suite_command(args: RunArgs) -> Result<i32, CliError> {
    let config = args.into_config();
    let summary = run_suite(&config, &mut TracingReporter).map_err(CliError::Run)?;
    if let Some(report_path) = &config.report_path {
        tracing::debug!(report = %report_path.display(), "wrote run report");
    }
    Ok(summary.exit_code())
}

fn parse_timeout(value: &str) -> Result<Duration, String> {
    let seconds = value
        .parse::<f64>()
        .map_err(|_| format!("'{value}' is not a number of seconds"))?;
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(format!("timeout must be a positive number of seconds, got '{value}'"));
    }
    Duration::try_from_secs_f64(seconds).map_err(|error| error.to_string())
}
