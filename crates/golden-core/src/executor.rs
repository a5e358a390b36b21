use crate::domain::{ExitState, Fixture, InvocationResult};
use crate::runner::RunnerError;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

pub trait Executor {
    fn execute(&self, fixture: &Fixture) -> Result<InvocationResult, RunnerError>;
}

/// Runs the interpreter binary as `<program> <fixture-path>` and captures both
/// output streams as text.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    program: PathBuf,
    timeout: Option<Duration>,
}

impl ProcessExecutor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Executor for ProcessExecutor {
    fn execute(&self, fixture: &Fixture) -> Result<InvocationResult, RunnerError> {
        let mut child = Command::new(&self.program)
            .arg(&fixture.path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RunnerError::SpawnExecutor {
                path: self.program.clone(),
                source,
            })?;

        // Both pipes drain on their own threads so a child that fills one of
        // them cannot stall the wait below.
        let stdout_reader = child.stdout.take().map(spawn_reader);
        let stderr_reader = child.stderr.take().map(spawn_reader);

        let status = match self.timeout {
            None => child.wait().map_err(|source| RunnerError::WaitExecutor {
                fixture: fixture.path.clone(),
                source,
            })?,
            Some(timeout) => match wait_with_deadline(&mut child, timeout).map_err(|source| {
                RunnerError::WaitExecutor {
                    fixture: fixture.path.clone(),
                    source,
                }
            })? {
                Some(status) => status,
                None => {
                    return Err(RunnerError::ExecutorTimedOut {
                        fixture: fixture.path.clone(),
                        timeout,
                    });
                }
            },
        };

        let stdout = collect_output(stdout_reader, &fixture.path)?;
        let stderr = collect_output(stderr_reader, &fixture.path)?;
        Ok(InvocationResult {
            status: exit_state(status),
            stdout,
            stderr,
        })
    }
}

fn spawn_reader<R>(mut reader: R) -> JoinHandle<io::Result<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        Ok(buffer)
    })
}

fn collect_output(
    reader: Option<JoinHandle<io::Result<Vec<u8>>>>,
    fixture: &Path,
) -> Result<String, RunnerError> {
    let Some(reader) = reader else {
        return Ok(String::new());
    };
    let bytes = reader
        .join()
        .unwrap_or_else(|_| Err(io::Error::other("output reader thread panicked")))
        .map_err(|source| RunnerError::CaptureOutput {
            fixture: fixture.to_path_buf(),
            source,
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Returns `None` after killing a child that outlived `timeout`.
fn wait_with_deadline(child: &mut Child, timeout: Duration) -> io::Result<Option<ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn exit_state(status: ExitStatus) -> ExitState {
    status.code().map_or(ExitState::Signal, ExitState::Code)
}

#[cfg(all(test, unix))]
mod tests {
    use super::{Executor, ProcessExecutor};
    use crate::domain::{ExitState, Fixture};
    use crate::runner::RunnerError;
    use std::fs;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::TempDir;

    // `/bin/sh` stands in for the interpreter, so every fixture is a shell script.
    const SHELL: &str = "/bin/sh";

    #[test]
    fn captures_stdout_stderr_and_exit_code() {
        let temp = TempDir::new().expect("tempdir should be created");
        let fixture = write_fixture(
            temp.path(),
            "mixed",
            "echo out-line\necho err-line >&2\nexit 3\n",
        );

        let result = ProcessExecutor::new(SHELL)
            .execute(&fixture)
            .expect("shell should run");
        assert_eq!(result.status, ExitState::Code(3));
        assert_eq!(result.stdout, "out-line\n");
        assert_eq!(result.stderr, "err-line\n");
    }

    #[test]
    fn drains_large_output_without_blocking() {
        let temp = TempDir::new().expect("tempdir should be created");
        let fixture = write_fixture(
            temp.path(),
            "chatty",
            "i=0\nwhile [ $i -lt 20000 ]; do echo line-$i; echo noise-$i >&2; i=$((i+1)); done\n",
        );

        let result = ProcessExecutor::new(SHELL)
            .execute(&fixture)
            .expect("shell should run");
        assert!(result.status.success());
        assert_eq!(result.stdout.lines().count(), 20000);
        assert_eq!(result.stderr.lines().count(), 20000);
    }

    #[test]
    fn timeout_kills_hung_child() {
        let temp = TempDir::new().expect("tempdir should be created");
        let fixture = write_fixture(temp.path(), "hang", "exec sleep 30\n");

        let error = ProcessExecutor::new(SHELL)
            .with_timeout(Some(Duration::from_millis(200)))
            .execute(&fixture)
            .expect_err("hung child should time out");
        assert!(matches!(error, RunnerError::ExecutorTimedOut { .. }));
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let temp = TempDir::new().expect("tempdir should be created");
        let fixture = write_fixture(temp.path(), "any", "echo 1\n");

        let error = ProcessExecutor::new(temp.path().join("no-such-interpreter"))
            .execute(&fixture)
            .expect_err("spawn should fail");
        assert!(matches!(error, RunnerError::SpawnExecutor { .. }));
    }

    fn write_fixture(dir: &Path, name: &str, script: &str) -> Fixture {
        let path = dir.join(format!("{name}.las"));
        fs::write(&path, script).expect("fixture should be written");
        Fixture::new(dir, path).expect("fixture should have a name")
    }
}
