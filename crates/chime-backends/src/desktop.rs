// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Desktop notification backends, picked by availability.

use chime_core::ChimeError;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use tracing::{debug, info};

use crate::command::{find_program, CommandSink};

/// A desktop notifier reachable through a command-line helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Backend {
    /// libnotify's `notify-send` (Linux and BSD desktops).
    NotifySend,
    /// AppleScript `display notification` (macOS).
    Osascript,
}

impl Backend {
    pub fn program(self) -> &'static str {
        match self {
            Backend::NotifySend => "notify-send",
            Backend::Osascript => "osascript",
        }
    }

    /// Argument template; title and body travel as separate arguments so
    /// message text is never parsed by the helper's own language.
    pub fn args(self) -> Vec<String> {
        let args: &[&str] = match self {
            Backend::NotifySend => &[
                "--app-name=chime",
                "--urgency={urgency}",
                "--expire-time={timeout}",
                "--icon={icon}",
                "--",
                "{title}",
                "{body}",
            ],
            Backend::Osascript => &[
                "-e",
                "on run argv",
                "-e",
                "display notification (item 2 of argv) with title (item 1 of argv)",
                "-e",
                "end run",
                "{title}",
                "{body}",
            ],
        };
        args.iter().map(|arg| arg.to_string()).collect()
    }

    pub fn is_available(self) -> bool {
        find_program(self.program()).is_some()
    }

    /// Every backend in default preference order.
    pub fn all() -> Vec<Backend> {
        Backend::iter().collect()
    }

    /// A command sink driving this backend.
    pub fn sink(self, name: impl Into<String>) -> Result<CommandSink, ChimeError> {
        CommandSink::new(name, self.program(), self.args())
    }
}

/// The first backend in `preferences` whose helper is installed.
pub fn select_backend(preferences: &[Backend]) -> Result<Backend, ChimeError> {
    first_available(preferences, Backend::is_available)
}

/// Build a sink for the first available backend in `preferences`.
pub fn desktop_sink(
    name: impl Into<String>,
    preferences: &[Backend],
) -> Result<CommandSink, ChimeError> {
    let name = name.into();
    let backend = first_available(preferences, Backend::is_available).map_err(|e| match e {
        ChimeError::SinkUnavailable { reason, .. } => ChimeError::SinkUnavailable {
            sink: name.clone(),
            reason,
        },
        other => other,
    })?;
    info!(sink = %name, %backend, "desktop backend selected");
    backend.sink(name)
}

fn first_available(
    preferences: &[Backend],
    available: impl Fn(Backend) -> bool,
) -> Result<Backend, ChimeError> {
    for &backend in preferences {
        if available(backend) {
            return Ok(backend);
        }
        debug!(%backend, program = backend.program(), "desktop backend not installed");
    }

    let tried: Vec<String> = preferences.iter().map(ToString::to_string).collect();
    Err(ChimeError::SinkUnavailable {
        sink: "desktop".to_string(),
        reason: if tried.is_empty() {
            "no desktop backends configured".to_string()
        } else {
            format!("none of [{}] is installed", tried.join(", "))
        },
    })
}
