// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! What a desktop-style notification looks like once an event is rendered.

use std::fmt;

use chime_core::{Event, SourceResolver};
use strum::{Display, EnumString};

/// Notification urgency, in the names `notify-send -u` expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Urgency {
    Low,
    Normal,
    Critical,
}

/// How long the notification stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeout {
    /// Whatever the notification server prefers.
    #[default]
    Default,
    /// Until dismissed.
    Forever,
    After(u64),
}

impl Timeout {
    /// `None` keeps the server default, `0` means never expire.
    pub fn from_millis(ms: Option<u64>) -> Self {
        match ms {
            None => Timeout::Default,
            Some(0) => Timeout::Forever,
            Some(ms) => Timeout::After(ms),
        }
    }
}

/// Renders in the freedesktop convention: `-1` server default, `0` forever.
impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeout::Default => f.write_str("-1"),
            Timeout::Forever => f.write_str("0"),
            Timeout::After(ms) => write!(f, "{ms}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub urgency: Urgency,
    pub icon: Option<String>,
    pub timeout: Timeout,
}

impl NotificationRequest {
    /// Render an event. Highlights and private messages are critical;
    /// events the host did not display are low.
    pub fn from_event(
        event: &Event,
        resolver: &dyn SourceResolver,
        icon: Option<&str>,
        timeout: Timeout,
    ) -> Self {
        let target = event.target(resolver);
        let urgency = if event.highlighted || event.is_private() {
            Urgency::Critical
        } else if !event.displayed {
            Urgency::Low
        } else {
            Urgency::Normal
        };

        Self {
            title: format!("{} @ {}", event.sender_prefix, target),
            body: event.body.clone(),
            urgency,
            icon: icon.map(str::to_string),
            timeout,
        }
    }

    /// Substitute `{title}`, `{body}`, `{urgency}`, `{icon}` and `{timeout}`
    /// in one pass. Unknown or unterminated braces are copied verbatim, and
    /// substituted text is never rescanned.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            let resolved = tail
                .find('}')
                .and_then(|end| self.placeholder(&tail[1..end]).map(|value| (end, value)));
            match resolved {
                Some((end, value)) => {
                    out.push_str(&value);
                    rest = &tail[end + 1..];
                }
                None => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }

        out.push_str(rest);
        out
    }

    fn placeholder(&self, name: &str) -> Option<String> {
        match name {
            "title" => Some(self.title.clone()),
            "body" => Some(self.body.clone()),
            "urgency" => Some(self.urgency.to_string()),
            "icon" => Some(self.icon.clone().unwrap_or_default()),
            "timeout" => Some(self.timeout.to_string()),
            _ => None,
        }
    }
}
