// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The normalized event record and its source handle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tags::TagSet;

/// Tag carried by private (query) messages.
pub const PRIVATE_TAG: &str = "notify_private";

/// Tag carried by messages that highlight the user.
pub const HIGHLIGHT_TAG: &str = "notify_highlight";

/// Tag carried by ordinary channel messages.
pub const MESSAGE_TAG: &str = "notify_message";

/// Target label used for private messages.
pub const PRIVATE_TARGET: &str = "me";

/// Opaque handle to the conversation buffer an event came from.
///
/// Only meaningful to the host; it is used for read-back queries such as the
/// buffer's display name and never compared across events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRef(pub String);

/// Host read-back queries about a [`SourceRef`].
pub trait SourceResolver {
    /// Human-readable name of the conversation, if the host still knows it.
    fn display_name(&self, source: &SourceRef) -> Option<String>;
}

/// Resolver used when the host offers no read-back; echoes the raw handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawNames;

impl SourceResolver for RawNames {
    fn display_name(&self, source: &SourceRef) -> Option<String> {
        Some(source.0.clone())
    }
}

/// One chat occurrence considered for notification.
///
/// Built once per host event, never mutated, dropped after routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub source: SourceRef,
    pub timestamp: DateTime<Utc>,
    pub tags: TagSet,
    pub displayed: bool,
    pub highlighted: bool,
    pub sender_prefix: String,
    pub body: String,
}

impl Event {
    pub fn is_private(&self) -> bool {
        self.tags.contains(PRIVATE_TAG)
    }

    /// Where the event happened: [`PRIVATE_TARGET`] for private messages,
    /// otherwise the buffer's display name (or the raw handle if unknown).
    pub fn target(&self, resolver: &dyn SourceResolver) -> String {
        if self.is_private() {
            return PRIVATE_TARGET.to_string();
        }
        resolver
            .display_name(&self.source)
            .unwrap_or_else(|| self.source.0.clone())
    }
}
