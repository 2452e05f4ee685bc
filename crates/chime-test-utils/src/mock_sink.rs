// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock sink for deterministic routing tests.
//!
//! `MockSink` replays a scripted list of statuses (repeating the last one)
//! and records every event it was asked to deliver.

use std::collections::VecDeque;
use std::sync::Mutex;

use chime_core::{DeliveryStatus, Event, Sink, TagSet};

/// A scripted delivery channel for testing.
pub struct MockSink {
    name: String,
    script: Mutex<VecDeque<DeliveryStatus>>,
    fallback: DeliveryStatus,
    interest: TagSet,
    received: Mutex<Vec<Event>>,
}

impl MockSink {
    /// A sink that always reports `status` and wants every tag.
    pub fn new(name: &str, status: DeliveryStatus) -> Self {
        Self::scripted(name, [status])
    }

    /// A sink that reports `statuses` in order, then keeps repeating the
    /// last one.
    pub fn scripted(name: &str, statuses: impl IntoIterator<Item = DeliveryStatus>) -> Self {
        let script: VecDeque<_> = statuses.into_iter().collect();
        let fallback = script.back().copied().unwrap_or(DeliveryStatus::Unknown);
        Self {
            name: name.to_string(),
            script: Mutex::new(script),
            fallback,
            interest: TagSet::wildcard(),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Replace the declared tag interest.
    pub fn interested_in<const N: usize>(mut self, tags: [&str; N]) -> Self {
        self.interest = TagSet::from(tags);
        self
    }

    /// Number of `notify` calls so far.
    pub fn calls(&self) -> usize {
        self.received.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Every event passed to `notify`, in order.
    pub fn received(&self) -> Vec<Event> {
        self.received.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl Sink for MockSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn notify(&self, event: &Event) -> DeliveryStatus {
        if let Ok(mut received) = self.received.lock() {
            received.push(event.clone());
        }
        let Ok(mut script) = self.script.lock() else {
            return self.fallback;
        };
        if script.len() > 1 {
            script.pop_front().unwrap_or(self.fallback)
        } else {
            script.front().copied().unwrap_or(self.fallback)
        }
    }

    fn interested_in_tags(&self) -> TagSet {
        self.interest.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventBuilder;

    #[test]
    fn scripted_statuses_repeat_last() {
        let sink = MockSink::scripted(
            "m",
            [DeliveryStatus::Error, DeliveryStatus::TemporaryError, DeliveryStatus::Seen],
        );
        let e = EventBuilder::new().build();
        assert_eq!(sink.notify(&e), DeliveryStatus::Error);
        assert_eq!(sink.notify(&e), DeliveryStatus::TemporaryError);
        assert_eq!(sink.notify(&e), DeliveryStatus::Seen);
        assert_eq!(sink.notify(&e), DeliveryStatus::Seen);
        assert_eq!(sink.calls(), 4);
        assert_eq!(sink.received()[0], e);
    }

    #[test]
    fn default_interest_is_wildcard() {
        let sink = MockSink::new("m", DeliveryStatus::Seen);
        assert_eq!(sink.interested_in_tags(), TagSet::wildcard());
        let sink = sink.interested_in(["a"]);
        assert_eq!(sink.interested_in_tags(), TagSet::from(["a"]));
    }
}
