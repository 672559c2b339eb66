//! External vulnerability lookup tools.

use crate::config::{ScanConfig, FALLBACK_API_KEY_ENV, PURL_PLACEHOLDER};
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use wait_timeout::ChildExt;

/// Why a single lookup did not produce a result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("lookup timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("lookup failed (exit code {}): {stderr}", exit_code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    Failed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("could not start lookup: {0}")]
    Spawn(String),
}

/// A service that resolves one package identifier to vulnerability data.
///
/// Implementations must honor `timeout` themselves; the orchestrator relies
/// on every call returning once it has elapsed.
pub trait LookupTool: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Look up a single package identifier.
    fn lookup(&self, identifier: &str, timeout: Duration) -> Result<String, LookupError>;
}

/// Runs an external program once per identifier.
///
/// The identifier is substituted into the argument template and the access
/// credential is exported to the child as `SCANOSS_API_KEY`. Output streams
/// are drained on background threads while the child runs. On Unix the child
/// leads its own process group, and the timeout covers the group: output still
/// open at the deadline counts as a timeout and the whole group is killed.
#[derive(Debug, Clone)]
pub struct CommandLookup {
    program: String,
    args: Vec<String>,
    credential: String,
}

impl CommandLookup {
    /// Create a lookup with an empty credential.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            credential: String::new(),
        }
    }

    /// Build from configuration, resolving the credential from the environment.
    #[must_use]
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
            .with_credential(resolve_credential(&config.api_key_env))
    }

    #[must_use]
    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = credential.into();
        self
    }

    /// Argument list with the identifier substituted.
    #[must_use]
    pub fn render_args(&self, identifier: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace(PURL_PLACEHOLDER, identifier))
            .collect()
    }
}

impl LookupTool for CommandLookup {
    fn name(&self) -> &str {
        &self.program
    }

    fn lookup(&self, identifier: &str, timeout: Duration) -> Result<String, LookupError> {
        let deadline = Instant::now() + timeout;
        let mut command = Command::new(&self.program);
        command
            .args(self.render_args(identifier))
            .env(FALLBACK_API_KEY_ENV, &self.credential)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        // The tool and anything it forks share one group so a timeout can kill them all.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }
        let mut child = command
            .spawn()
            .map_err(|e| LookupError::Spawn(format!("{}: {e}", self.program)))?;

        let (tx, rx) = mpsc::channel();
        let mut pending = 0;
        if let Some(out) = child.stdout.take() {
            drain(Stream::Stdout, out, tx.clone());
            pending += 1;
        }
        if let Some(err) = child.stderr.take() {
            drain(Stream::Stderr, err, tx.clone());
            pending += 1;
        }
        drop(tx);

        let status = match child.wait_timeout(timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                terminate(&mut child);
                return Err(LookupError::Timeout { after: timeout });
            }
            Err(e) => {
                terminate(&mut child);
                return Err(LookupError::Spawn(format!("waiting on {}: {e}", self.program)));
            }
        };

        // A forked helper can keep the pipes open after the tool itself exits.
        let Some(captured) = collect(&rx, pending, deadline) else {
            tracing::debug!("{} exited but its output stayed open past the deadline", self.program);
            terminate(&mut child);
            return Err(LookupError::Timeout { after: timeout });
        };

        if status.success() {
            Ok(captured.stdout)
        } else {
            Err(LookupError::Failed {
                exit_code: status.code(),
                stderr: captured.stderr.trim().to_string(),
            })
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

#[derive(Debug, Default)]
struct Captured {
    stdout: String,
    stderr: String,
}

fn drain<R: Read + Send + 'static>(stream: Stream, mut reader: R, tx: Sender<(Stream, String)>) {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        let _ = tx.send((stream, String::from_utf8_lossy(&buf).into_owned()));
    });
}

/// Wait for `pending` streams to reach end of file. `None` once `deadline` passes first.
fn collect(rx: &Receiver<(Stream, String)>, pending: usize, deadline: Instant) -> Option<Captured> {
    let mut captured = Captured::default();
    for _ in 0..pending {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok((Stream::Stdout, text)) => captured.stdout = text,
            Ok((Stream::Stderr, text)) => captured.stderr = text,
            Err(RecvTimeoutError::Timeout) => return None,
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    Some(captured)
}

/// Kill the tool's whole process group, then reap the tool.
fn terminate(child: &mut Child) {
    #[cfg(unix)]
    kill_process_group(child.id());
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(unix)]
fn kill_process_group(pgid: u32) {
    let Ok(pgid) = libc::pid_t::try_from(pgid) else {
        return;
    };
    // SAFETY: killpg has no memory-safety preconditions; the group was created
    // by `process_group(0)` at spawn and an already-empty group yields ESRCH.
    unsafe {
        libc::killpg(pgid, libc::SIGKILL);
    }
}

/// Read the lookup credential.
///
/// Tries `primary_env`, then `SCANOSS_API_KEY`. An unset credential is not an
/// error: the tool falls back to its anonymous tier.
#[must_use]
pub fn resolve_credential(primary_env: &str) -> String {
    [primary_env, FALLBACK_API_KEY_ENV]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| {
            tracing::debug!("No lookup credential set; using anonymous access");
            String::new()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_args_substitutes_identifier() {
        let lookup = CommandLookup::new(
            "scanoss-py",
            vec!["component".into(), "vulns".into(), "--purl".into(), "{purl}".into()],
        );
        assert_eq!(
            lookup.render_args("pkg:npm/lodash@4.17.21"),
            ["component", "vulns", "--purl", "pkg:npm/lodash@4.17.21"]
        );
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let lookup = CommandLookup::new("/nonexistent/lookup-tool", vec!["{purl}".into()]);
        let err = lookup
            .lookup("pkg:npm/a@1", Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, LookupError::Spawn(_)));
    }

    #[test]
    fn test_resolve_credential_ignores_unset_variable() {
        let credential = resolve_credential("SBOM_DIGEST_TEST_UNSET_VARIABLE_9F2C");
        // Falls through to SCANOSS_API_KEY, which may or may not be set here.
        assert_eq!(
            credential,
            std::env::var(FALLBACK_API_KEY_ENV)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_default()
        );
    }

    #[test]
    fn test_error_display() {
        let err = LookupError::Failed {
            exit_code: Some(2),
            stderr: "bad purl".into(),
        };
        assert_eq!(err.to_string(), "lookup failed (exit code 2): bad purl");
        let err = LookupError::Timeout {
            after: Duration::from_secs(10),
        };
        assert_eq!(err.to_string(), "lookup timed out after 10s");
    }

    #[cfg(unix)]
    mod unix {
        use super::*;

        fn shell(script: &str) -> CommandLookup {
            CommandLookup::new("sh", vec!["-c".into(), script.into(), "lookup".into(), "{purl}".into()])
                .with_credential("secret-token")
        }

        #[test]
        fn test_success_captures_stdout() {
            let out = shell("echo \"vulns for $1\"")
                .lookup("pkg:npm/a@1", Duration::from_secs(5))
                .expect("lookup");
            assert_eq!(out.trim(), "vulns for pkg:npm/a@1");
        }

        #[test]
        fn test_credential_is_exported() {
            let out = shell("printf %s \"$SCANOSS_API_KEY\"")
                .lookup("pkg:npm/a@1", Duration::from_secs(5))
                .expect("lookup");
            assert_eq!(out, "secret-token");
        }

        #[test]
        fn test_non_zero_exit_is_failure_with_stderr() {
            let err = shell("echo 'no such package' >&2; exit 3")
                .lookup("pkg:npm/a@1", Duration::from_secs(5))
                .unwrap_err();
            assert_eq!(
                err,
                LookupError::Failed {
                    exit_code: Some(3),
                    stderr: "no such package".to_string()
                }
            );
        }

        #[test]
        fn test_slow_lookup_times_out() {
            let start = std::time::Instant::now();
            let err = shell("exec sleep 5")
                .lookup("pkg:npm/a@1", Duration::from_millis(200))
                .unwrap_err();
            assert!(matches!(err, LookupError::Timeout { .. }));
            assert!(start.elapsed() < Duration::from_secs(4));
        }

        #[test]
        fn test_background_helper_holding_output_times_out() {
            let start = std::time::Instant::now();
            let err = shell("sleep 6 & echo \"started $1\"")
                .lookup("pkg:npm/a@1", Duration::from_secs(1))
                .unwrap_err();
            assert!(matches!(err, LookupError::Timeout { .. }));
            assert!(
                start.elapsed() < Duration::from_secs(4),
                "lookup ran for {:?}",
                start.elapsed()
            );
        }

        #[test]
        fn test_timeout_kills_forked_helpers() {
            let dir = tempfile::tempdir().expect("tempdir");
            let marker = dir.path().join("helper-finished");
            let script = format!("(sleep 1; touch '{}') & wait", marker.display());
            let err = CommandLookup::new("sh", vec!["-c".into(), script])
                .lookup("pkg:npm/a@1", Duration::from_millis(200))
                .unwrap_err();
            assert!(matches!(err, LookupError::Timeout { .. }));

            std::thread::sleep(Duration::from_secs(2));
            assert!(!marker.exists(), "helper outlived the timed-out lookup");
        }

        #[test]
        fn test_quick_helper_output_is_kept() {
            let out = shell("(sleep 1; echo late) & echo early")
                .lookup("pkg:npm/a@1", Duration::from_secs(5))
                .expect("lookup");
            assert_eq!(out, "early\nlate\n");
        }
    }
}
