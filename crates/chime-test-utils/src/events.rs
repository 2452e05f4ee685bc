// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terse construction of [`Event`]s for tests.

use chrono::DateTime;

use chime_core::{Event, SourceRef, TagSet, MESSAGE_TAG};

/// Builder for a normalized event.
///
/// Defaults: buffer `0x1`, timestamp 2023-11-14T22:13:20Z, tags
/// `{notify_message}`, displayed, not highlighted, sender `alice`, body
/// `hello`.
#[derive(Debug, Clone)]
pub struct EventBuilder {
    event: Event,
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBuilder {
    pub fn new() -> Self {
        Self {
            event: Event {
                source: SourceRef("0x1".to_string()),
                timestamp: DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default(),
                tags: TagSet::from([MESSAGE_TAG]),
                displayed: true,
                highlighted: false,
                sender_prefix: "alice".to_string(),
                body: "hello".to_string(),
            },
        }
    }

    pub fn source(mut self, source: &str) -> Self {
        self.event.source = SourceRef(source.to_string());
        self
    }

    pub fn timestamp(mut self, epoch_secs: i64) -> Self {
        self.event.timestamp = DateTime::from_timestamp(epoch_secs, 0).unwrap_or_default();
        self
    }

    /// Replace the tag set.
    pub fn tags<'a>(mut self, tags: impl IntoIterator<Item = &'a str>) -> Self {
        self.event.tags = tags.into_iter().collect();
        self
    }

    pub fn displayed(mut self, displayed: bool) -> Self {
        self.event.displayed = displayed;
        self
    }

    pub fn highlighted(mut self, highlighted: bool) -> Self {
        self.event.highlighted = highlighted;
        self
    }

    pub fn sender(mut self, sender: &str) -> Self {
        self.event.sender_prefix = sender.to_string();
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.event.body = body.to_string();
        self
    }

    pub fn build(self) -> Event {
        self.event
    }
}
