// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delivery through an external helper program.
//!
//! The helper is spawned once per event with placeholder-substituted
//! arguments and given a bounded time to finish. A helper that overruns is
//! killed so a hung notifier never stalls the event loop.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chime_core::{ChimeError, DeliveryStatus, Event, RawNames, Sink, SourceResolver, TagSet};
use tracing::{debug, warn};

use crate::request::{NotificationRequest, Timeout};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs a helper program for every event it is asked to deliver.
pub struct CommandSink {
    name: String,
    program: PathBuf,
    args: Vec<String>,
    icon: Option<String>,
    display_timeout: Timeout,
    wait: Duration,
    success_status: DeliveryStatus,
    interest: TagSet,
    resolver: Arc<dyn SourceResolver + Send + Sync>,
}

impl CommandSink {
    pub const DEFAULT_WAIT: Duration = Duration::from_millis(5000);
    pub const DEFAULT_SUCCESS_STATUS: DeliveryStatus = DeliveryStatus::LikelySeen;

    /// Resolve `program` (absolute/relative path or a name on `PATH`).
    ///
    /// Fails with [`ChimeError::SinkUnavailable`] when it cannot be found.
    pub fn new(
        name: impl Into<String>,
        program: &str,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, ChimeError> {
        let name = name.into();
        let Some(resolved) = find_program(program) else {
            return Err(ChimeError::SinkUnavailable {
                sink: name,
                reason: format!("program `{program}` not found or not executable"),
            });
        };
        debug!(sink = %name, program = %resolved.display(), "command sink ready");

        Ok(Self {
            name,
            program: resolved,
            args: args.into_iter().map(Into::into).collect(),
            icon: None,
            display_timeout: Timeout::Default,
            wait: Self::DEFAULT_WAIT,
            success_status: Self::DEFAULT_SUCCESS_STATUS,
            interest: TagSet::wildcard(),
            resolver: Arc::new(RawNames),
        })
    }

    pub fn with_icon(mut self, icon: Option<String>) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_display_timeout(mut self, timeout: Timeout) -> Self {
        self.display_timeout = timeout;
        self
    }

    /// Upper bound on how long one helper run may take.
    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    /// Status reported when the helper exits with code 0.
    pub fn with_success_status(mut self, status: DeliveryStatus) -> Self {
        self.success_status = status;
        self
    }

    pub fn with_interest(mut self, interest: TagSet) -> Self {
        self.interest = interest;
        self
    }

    /// Source of conversation names used in notification titles.
    pub fn with_resolver(mut self, resolver: Arc<dyn SourceResolver + Send + Sync>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn wait_bounded(&self, child: &mut Child) -> DeliveryStatus {
        let deadline = Instant::now() + self.wait;
        loop {
            match child.try_wait() {
                Ok(Some(status)) if status.success() => {
                    debug!(sink = %self.name, "helper exited successfully");
                    return self.success_status;
                }
                Ok(Some(status)) => {
                    warn!(sink = %self.name, code = ?status.code(), "helper exited with failure");
                    return DeliveryStatus::Error;
                }
                Ok(None) if Instant::now() >= deadline => {
                    warn!(
                        sink = %self.name,
                        wait_ms = self.wait.as_millis() as u64,
                        "helper timed out, killing it"
                    );
                    reap(child);
                    return DeliveryStatus::TemporaryError;
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    warn!(sink = %self.name, error = %e, "failed to poll helper");
                    reap(child);
                    return DeliveryStatus::Error;
                }
            }
        }
    }
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

impl Sink for CommandSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn notify(&self, event: &Event) -> DeliveryStatus {
        let request = NotificationRequest::from_event(
            event,
            self.resolver.as_ref(),
            self.icon.as_deref(),
            self.display_timeout,
        );
        let args: Vec<String> = self.args.iter().map(|arg| request.render(arg)).collect();

        let spawned = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(mut child) => self.wait_bounded(&mut child),
            Err(e) => {
                warn!(sink = %self.name, error = %e, "failed to spawn helper");
                DeliveryStatus::Error
            }
        }
    }

    fn interested_in_tags(&self) -> TagSet {
        self.interest.clone()
    }
}

/// Locate an executable the way a shell would.
///
/// Anything containing a path separator is checked as given; a bare name is
/// searched for in each `PATH` directory.
pub fn find_program(program: &str) -> Option<PathBuf> {
    let path = Path::new(program);
    if program.is_empty() {
        return None;
    }
    if path.components().count() > 1 || path.is_absolute() {
        return is_executable(path).then(|| path.to_path_buf());
    }

    let search = std::env::var_os("PATH")?;
    std::env::split_paths(&search)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
