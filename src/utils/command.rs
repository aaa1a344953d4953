//! Command execution utilities

use crate::error::{EzfetchError, Result};
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Execute a command and return trimmed stdout.
///
/// The child is killed once `timeout` elapses. When `env` is given the child
/// sees exactly that environment instead of inheriting ours.
pub fn run_command(
    program: &Path,
    args: &[&str],
    env: Option<&HashMap<String, String>>,
    timeout: Duration,
) -> Result<String> {
    let name = program.display().to_string();
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null());
    if let Some(env) = env {
        command.env_clear().envs(env);
    }

    let mut child = command.spawn()?;

    // Drain stdout on its own thread so a chatty command cannot fill the pipe and stall
    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| EzfetchError::detection(format!("No stdout for '{}'", name)))?;
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = tx.send(stdout.read_to_end(&mut buf).map(|_| buf));
    });

    let timed_out = |name: String| EzfetchError::Timeout {
        program: name,
        secs: timeout.as_secs(),
    };

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(timed_out(name));
        }
        thread::sleep(POLL_INTERVAL);
    };

    // A backgrounded grandchild can keep stdout open after the child exits
    let output = match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(read) => read?,
        Err(RecvTimeoutError::Timeout) => return Err(timed_out(name)),
        Err(RecvTimeoutError::Disconnected) => {
            return Err(EzfetchError::detection(format!("Reader for '{}' panicked", name)))
        }
    };

    if status.success() {
        Ok(String::from_utf8_lossy(&output).trim().to_string())
    } else {
        Err(EzfetchError::Detection(format!(
            "Command '{}' failed with exit code: {:?}",
            name,
            status.code()
        )))
    }
}

/// Resolve a program against a `PATH`-style search list
pub fn find_in_path(program: &str, path_var: &str) -> Option<PathBuf> {
    if program.contains('/') {
        let path = PathBuf::from(program);
        return path.is_file().then_some(path);
    }

    path_var
        .split(':')
        .filter(|dir| !dir.is_empty())
        .map(|dir| Path::new(dir).join(program))
        .find(|full_path| full_path.is_file())
}
