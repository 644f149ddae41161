use std::env;
use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wait_timeout::ChildExt;

use revise_api::TextDocument;
use revise_refiner_api::{Refinement, Refiner, RefinerError, RefinerResult};

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const COMMAND_ENV: &str = "REVISE_REFINER_CMD";
const TIMEOUT_ENV: &str = "REVISE_REFINER_TIMEOUT_SECS";

/// External program invocation used by [`CommandRefiner`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Program to execute, resolved through `PATH`.
    pub program: String,
    /// Arguments passed to the program.
    #[serde(default)]
    pub args: Vec<String>,
    /// Seconds to wait before the program is killed.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl CommandSpec {
    /// Program with no arguments and the default timeout.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Append an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Override the timeout.
    #[must_use]
    pub const fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Parse a command line setting and an optional timeout setting.
    ///
    /// The command is split on whitespace into program and arguments. A
    /// timeout that does not parse as seconds keeps the default.
    #[must_use]
    pub fn from_settings(command: &str, timeout: Option<&str>) -> Option<Self> {
        let mut parts = command.split_whitespace();
        let mut spec = Self::new(parts.next()?);
        spec.args = parts.map(str::to_owned).collect();

        if let Some(secs) = timeout.and_then(|value| value.trim().parse().ok()) {
            spec.timeout_secs = secs;
        }

        Some(spec)
    }
}

/// Refiner that pipes the document through an external program.
///
/// The document text is written to stdin and stdout becomes the new document.
/// One trailing newline is stripped from the output, so a program that ends
/// its output with `'\n'` does not grow the document by a blank line. The
/// child runs with a cleared environment apart from `PATH` and `HOME`.
#[derive(Debug, Clone)]
pub struct CommandRefiner {
    spec: CommandSpec,
    path: Option<OsString>,
    home: Option<OsString>,
}

impl CommandRefiner {
    /// Construct a refiner for the given command.
    #[must_use]
    pub fn new(spec: CommandSpec) -> Self {
        Self {
            spec,
            path: env::var_os("PATH"),
            home: env::var_os("HOME"),
        }
    }

    /// Build a refiner from `REVISE_REFINER_CMD` and
    /// `REVISE_REFINER_TIMEOUT_SECS`, if a command is configured.
    ///
    /// See [`CommandSpec::from_settings`] for how the values are parsed.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let command = env::var(COMMAND_ENV).ok()?;
        let timeout = env::var(TIMEOUT_ENV).ok();
        CommandSpec::from_settings(&command, timeout.as_deref()).map(Self::new)
    }

    /// The command this refiner runs.
    #[must_use]
    pub const fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn run(&self, input: &str) -> RefinerResult<String> {
        let mut command = Command::new(&self.spec.program);
        command
            .args(&self.spec.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        self.configure_environment(&mut command);

        let mut child = command.spawn().map_err(|err| {
            RefinerError::message(format!("failed to spawn {}: {err}", self.spec.program))
        })?;

        let stdout_handle = child.stdout.take().map(spawn_reader);
        let stderr_handle = child.stderr.take().map(spawn_reader);
        let stdin_handle = child
            .stdin
            .take()
            .map(|stdin| spawn_writer(stdin, input.as_bytes().to_vec()));

        let timeout = Duration::from_secs(self.spec.timeout_secs);
        match child.wait_timeout(timeout) {
            Ok(Some(_)) => (),
            Ok(None) => {
                warn!(program = %self.spec.program, secs = self.spec.timeout_secs, "refiner command timed out");
                reap(&mut child);
                return Err(RefinerError::Timeout {
                    after_secs: self.spec.timeout_secs,
                });
            }
            Err(err) => {
                reap(&mut child);
                return Err(RefinerError::message(format!(
                    "failed waiting on {}: {err}",
                    self.spec.program
                )));
            }
        }

        let status = child.wait().map_err(|err| {
            RefinerError::message(format!("failed to reap {}: {err}", self.spec.program))
        })?;

        let written = join_writer(stdin_handle);
        let stdout = join_reader(stdout_handle, "stdout")?;
        let stderr = join_reader(stderr_handle, "stderr")?;

        if !status.success() {
            let code = status
                .code()
                .map_or_else(|| "terminated".to_string(), |c| c.to_string());
            return Err(RefinerError::message(format!(
                "{} failed with status {}: {}",
                self.spec.program,
                code,
                stderr.trim()
            )));
        }

        // A child that exits early without reading its input is only an error
        // when it claims success.
        written.map_err(|err| {
            RefinerError::message(format!(
                "failed to write to {} stdin: {err}",
                self.spec.program
            ))
        })?;

        Ok(stdout)
    }

    fn configure_environment(&self, command: &mut Command) {
        command.env_clear();
        if let Some(path) = &self.path {
            command.env("PATH", path);
        }
        if let Some(home) = &self.home {
            command.env("HOME", home);
        }
    }
}

impl Refiner for CommandRefiner {
    fn id(&self) -> &'static str {
        "command"
    }

    fn label(&self) -> &'static str {
        "External command"
    }

    fn refine(&self, document: &TextDocument) -> RefinerResult<Refinement> {
        debug!(program = %self.spec.program, lines = document.line_count(), "running refiner command");
        let output = self.run(&document.text())?;
        let output = output.strip_suffix('\n').unwrap_or(&output);
        Ok(Refinement::new(
            TextDocument::from_text(output),
            format!("Ran {}", self.spec.program),
        ))
    }
}

fn spawn_reader<R>(mut stream: R) -> JoinHandle<io::Result<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buffer = Vec::new();
        stream.read_to_end(&mut buffer)?;
        Ok(buffer)
    })
}

// Dropping stdin after the write closes the pipe so the child sees EOF.
fn spawn_writer(mut stdin: ChildStdin, input: Vec<u8>) -> JoinHandle<io::Result<()>> {
    thread::spawn(move || stdin.write_all(&input))
}

fn join_writer(handle: Option<JoinHandle<io::Result<()>>>) -> io::Result<()> {
    match handle {
        Some(handle) => handle
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked"))),
        None => Ok(()),
    }
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn join_reader(
    handle: Option<JoinHandle<io::Result<Vec<u8>>>>,
    stream: &str,
) -> RefinerResult<String> {
    match handle {
        Some(handle) => {
            let bytes = handle
                .join()
                .map_err(|_| RefinerError::message(format!("failed to join {stream} reader")))?
                .map_err(|err| RefinerError::message(format!("failed to read {stream}: {err}")))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        None => Ok(String::new()),
    }
}
