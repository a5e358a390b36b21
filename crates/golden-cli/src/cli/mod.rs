mod commands;

use clap::Parser;
use golden_core::GoldenError;
use std::ffi::OsString;

pub fn run_from_env() -> i32 {
    match run(std::env::args_os()) {
        Ok(code) => code,
        Err(error) => {
            let error = error.as_golden_error();
            tracing::error!(category = %error.category(), "{}", error.diagnostic_line());
            error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => commands::run_suite_command(cli.run),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "laszlo-test-runner",
    version,
    about = "Run laszlo sources and compare their output against recorded expectations"
)]
struct Cli {
    #[command(flatten)]
    run: commands::RunArgs,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Run(GoldenError),
}

impl CliError {
    fn as_golden_error(&self) -> GoldenError {
        match self {
            Self::Usage(message) => GoldenError::usage("INPUT.CLI_USAGE", message.trim_end()),
            Self::Run(error) => error.clone(),
        }
    }
}
