// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A sink that only writes events to the log.

use chime_core::{DeliveryStatus, Event, Sink, TagSet, HIGHLIGHT_TAG, MESSAGE_TAG, PRIVATE_TAG};
use tracing::info;

/// Logs every event it receives and reports [`DeliveryStatus::Unknown`].
///
/// Handy as the last link of a chain while tuning filter rules.
#[derive(Debug, Clone)]
pub struct LogSink {
    name: String,
    interest: TagSet,
}

impl LogSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interest: TagSet::from([MESSAGE_TAG, PRIVATE_TAG, HIGHLIGHT_TAG]),
        }
    }

    pub fn with_interest(mut self, interest: TagSet) -> Self {
        self.interest = interest;
        self
    }
}

impl Sink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn notify(&self, event: &Event) -> DeliveryStatus {
        info!(
            sink = %self.name,
            source = %event.source.0,
            timestamp = %event.timestamp,
            tags = %event.tags,
            displayed = event.displayed,
            highlighted = event.highlighted,
            sender = %event.sender_prefix,
            body = %event.body,
            "event received"
        );
        DeliveryStatus::Unknown
    }

    fn interested_in_tags(&self) -> TagSet {
        self.interest.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chime_test_utils::EventBuilder;
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn logs_and_reports_unknown() {
        let sink = LogSink::new("debug");
        let status = sink.notify(&EventBuilder::new().sender("bob").body("ping").build());
        assert_eq!(status, DeliveryStatus::Unknown);
        assert!(logs_contain("event received"));
        assert!(logs_contain("ping"));
    }

    #[test]
    fn interest_defaults_to_message_tags() {
        let sink = LogSink::new("debug");
        assert_eq!(
            sink.interested_in_tags(),
            TagSet::from(["notify_message", "notify_private", "notify_highlight"])
        );
        let sink = sink.with_interest(TagSet::wildcard());
        assert!(sink.interested_in_tags().has_wildcard());
    }
}
