use std::ffi::OsStr;
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Output, Stdio};
use tracing::debug;

/// Seam around external-process invocation. Production shells out; tests
/// substitute a fake that records calls and returns scripted results, so
/// the checker and converter logic run without ffmpeg installed.
pub trait CommandRunner {
    /// Resolve `program` on the execution search path.
    fn locate(&self, program: &str) -> Option<PathBuf>;

    /// Run `program` to completion, capturing stdout/stderr.
    fn capture(&self, program: &str, args: &[&OsStr]) -> io::Result<Output>;

    /// Run `program` with stdout/stderr forwarded to ours, wait for exit.
    /// The child is reaped before this returns.
    fn stream(&self, program: &str, args: &[&OsStr]) -> io::Result<ExitStatus>;
}

pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    fn capture(&self, program: &str, args: &[&OsStr]) -> io::Result<Output> {
        debug!(program, ?args, "capturing command output");
        Command::new(program).args(args).stdin(Stdio::null()).output()
    }

    fn stream(&self, program: &str, args: &[&OsStr]) -> io::Result<ExitStatus> {
        debug!(program, ?args, "running command");
        // stdin is closed so the child cannot sit waiting on a prompt
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .status()
    }
}
