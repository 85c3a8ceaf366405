//! Subprocess bridge to self-describing programs.
//!
//! A [`Subject`] wraps the command line of a program built on the argument
//! registry and talks to it the only way an outside tool can: by running it.
//! Descriptor requests append the argdump flag and decode the binary stream
//! from the child's stdout; argument checks append the dry-run flag and
//! treat any stderr output or nonzero exit as a rejection.

use std::io::{self, ErrorKind, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, info};
use wait_timeout::ChildExt;

use argwire_codec::{
    ARGDUMP_FLAG, CodecError, DRY_RUN_FLAG, ProgramDescriptor, ProgramSetDescriptor,
};

use crate::error::{BridgeError, Result};

/// How long a subject gets to answer a descriptor or dry-run request, in
/// milliseconds. Real runs are not bounded; see [`Subject::run`].
pub const SUBJECT_TIMEOUT_MS: u64 = 5000;

/// Outcome of a dry-run argument check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// True when the subject exited zero with nothing on stderr.
    pub accepted: bool,
    /// Exit code of the dry run, if the subject was not killed by a signal.
    pub exit_code: Option<i32>,
    /// Everything the subject wrote to stderr.
    pub stderr: String,
}

/// A program (or program set) reachable through its command line.
#[derive(Debug, Clone)]
pub struct Subject {
    command: Vec<String>,
    timeout: Duration,
}

impl Subject {
    /// Wraps a single executable path.
    pub fn new(program: impl Into<String>) -> Self {
        Subject {
            command: vec![program.into()],
            timeout: Duration::from_millis(SUBJECT_TIMEOUT_MS),
        }
    }

    /// Wraps a full invocation: the executable plus any fixed leading
    /// arguments (interpreter, launcher script, and the like).
    pub fn from_command(command: Vec<String>) -> Result<Self> {
        if command.is_empty() {
            return Err(BridgeError::EmptyCommand);
        }
        Ok(Subject {
            command,
            timeout: Duration::from_millis(SUBJECT_TIMEOUT_MS),
        })
    }

    /// Overrides the descriptor and dry-run deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The wrapped command line.
    pub fn command(&self) -> &[String] {
        &self.command
    }

    /// Asks a standalone program to describe its arguments.
    pub fn fetch_program(&self) -> Result<ProgramDescriptor> {
        self.program_descriptor(None)
    }

    /// Asks a program set to describe one of its members.
    pub fn fetch_member(&self, member: &str) -> Result<ProgramDescriptor> {
        self.program_descriptor(Some(member))
    }

    /// Asks a program set to list its members.
    pub fn fetch_program_set(&self) -> Result<ProgramSetDescriptor> {
        let mut child = self.spawn_probe(&[ARGDUMP_FLAG.to_string()], Stdio::piped())?;
        let stderr_thread = drain_stderr(&mut child);
        let decoded = match child.stdout.take() {
            Some(mut pipe) => ProgramSetDescriptor::decode(&mut pipe),
            None => Err(CodecError::Truncated("set descriptor")),
        };
        let wait_result = self.finish(&mut child);
        let stderr = collect_stderr(stderr_thread);
        let status = wait_result?;
        if !status.success() {
            info!(
                command = ?self.command,
                exit_code = ?status.code(),
                "Subject rejected set descriptor request"
            );
            return Err(BridgeError::SetInfo {
                exit_code: status.code(),
                stderr,
            });
        }
        Ok(decoded?)
    }

    /// Runs the subject's dry-run check over `args` without executing its
    /// real work. `member` selects a sub-program when the subject is a set.
    pub fn check_arguments(&self, member: Option<&str>, args: &[String]) -> Result<CheckReport> {
        let mut probe_args = Vec::with_capacity(args.len() + 2);
        if let Some(member) = member {
            probe_args.push(member.to_string());
        }
        probe_args.push(DRY_RUN_FLAG.to_string());
        probe_args.extend(args.iter().cloned());

        let mut child = self.spawn_probe(&probe_args, Stdio::null())?;
        let stderr_thread = drain_stderr(&mut child);
        let wait_result = self.finish(&mut child);
        let stderr = collect_stderr(stderr_thread);
        let status = wait_result?;
        let accepted = status.success() && stderr.is_empty();
        debug!(command = ?self.command, accepted, exit_code = ?status.code(), "Dry run finished");
        Ok(CheckReport {
            accepted,
            exit_code: status.code(),
            stderr,
        })
    }

    /// Runs the subject for real.
    ///
    /// The child inherits this process's stdout so its output lands where
    /// the caller's would. There is no deadline: a legitimate run may take
    /// arbitrarily long. Anything on stderr, or a nonzero exit, is failure.
    pub fn run(&self, member: Option<&str>, args: &[String]) -> Result<()> {
        let mut run_args = Vec::with_capacity(args.len() + 1);
        if let Some(member) = member {
            run_args.push(member.to_string());
        }
        run_args.extend(args.iter().cloned());

        let mut command = self.base_command();
        command
            .args(&run_args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped());
        info!(command = ?self.command, args = ?run_args, "Running subject");
        let mut child = self.spawn(command)?;
        let stderr_thread = drain_stderr(&mut child);
        let status = child.wait()?;
        let stderr = collect_stderr(stderr_thread);
        let trimmed = stderr.trim();
        if !status.success() || !trimmed.is_empty() {
            return Err(BridgeError::RunFailed {
                exit_code: status.code(),
                stderr: trimmed.to_string(),
            });
        }
        Ok(())
    }

    fn program_descriptor(&self, member: Option<&str>) -> Result<ProgramDescriptor> {
        let mut probe_args = Vec::with_capacity(2);
        if let Some(member) = member {
            probe_args.push(member.to_string());
        }
        probe_args.push(ARGDUMP_FLAG.to_string());

        let mut child = self.spawn_probe(&probe_args, Stdio::piped())?;
        let stderr_thread = drain_stderr(&mut child);
        // Decode straight off the pipe; the descriptor can be large and the
        // child blocks once the pipe buffer fills.
        let decoded = match child.stdout.take() {
            Some(mut pipe) => ProgramDescriptor::decode(&mut pipe),
            None => Err(CodecError::Truncated("program descriptor")),
        };
        let wait_result = self.finish(&mut child);
        let stderr = collect_stderr(stderr_thread);
        let status = wait_result?;
        if !status.success() {
            info!(
                command = ?self.command,
                exit_code = ?status.code(),
                "Subject rejected descriptor request"
            );
            return Err(BridgeError::ArgumentInfo {
                exit_code: status.code(),
                stderr,
            });
        }
        Ok(decoded?)
    }

    fn base_command(&self) -> Command {
        let mut command = Command::new(&self.command[0]);
        command.args(&self.command[1..]);
        command
    }

    fn spawn_probe(&self, probe_args: &[String], stdout: Stdio) -> Result<Child> {
        let mut command = self.base_command();
        command
            .args(probe_args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::piped());
        debug!(command = ?self.command, args = ?probe_args, "Probing subject");
        self.spawn(command)
    }

    fn spawn(&self, mut command: Command) -> Result<Child> {
        command.spawn().map_err(|e| {
            let not_runnable =
                e.kind() == ErrorKind::NotFound || e.kind() == ErrorKind::PermissionDenied;
            debug!(command = ?self.command, error = %e, not_runnable, "Failed to spawn subject");
            BridgeError::Spawn {
                command: self.command[0].clone(),
                source: e,
            }
        })
    }

    fn finish(&self, child: &mut Child) -> Result<ExitStatus> {
        match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => Ok(status),
            Ok(None) => {
                debug!(
                    command = ?self.command,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Subject timed out, killing process"
                );
                let _ = child.kill();
                let _ = child.wait();
                Err(BridgeError::Timeout {
                    command: self.command[0].clone(),
                })
            }
            Err(e) => {
                debug!(command = ?self.command, error = %e, "Failed to wait on subject");
                let _ = child.kill();
                let _ = child.wait();
                Err(BridgeError::Io(e))
            }
        }
    }
}

/// Drains the child's stderr in a background thread to prevent deadlock
/// when the pipe buffer fills before the child exits.
fn drain_stderr(child: &mut Child) -> Option<JoinHandle<(Vec<u8>, io::Result<usize>)>> {
    child.stderr.take().map(|pipe| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let mut pipe = pipe;
            let result = pipe.read_to_end(&mut buf);
            (buf, result)
        })
    })
}

fn collect_stderr(thread: Option<JoinHandle<(Vec<u8>, io::Result<usize>)>>) -> String {
    thread
        .and_then(|t| t.join().ok())
        .map(|(buf, result)| {
            if let Err(e) = result {
                debug!(error = %e, "Failed to read subject stderr");
            }
            String::from_utf8_lossy(&buf).into_owned()
        })
        .unwrap_or_default()
}
