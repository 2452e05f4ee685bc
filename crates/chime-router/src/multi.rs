// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered fallback delivery across several sinks.
//!
//! Sinks are tried in insertion order. The first one whose status reaches
//! its target wins and routing stops. If none does, the worst status seen
//! is reported (or the router's default, if nothing fell below it): the
//! worst failure is the most actionable signal for the caller.

use std::sync::Arc;

use chime_core::{DeliveryStatus, Event, Sink, TagSet};
use tracing::{debug, info};

/// One link in a [`MultiSink`] chain.
#[derive(Clone)]
pub struct RouteEntry {
    pub sink: Arc<dyn Sink>,
    /// Threshold for this sink; `None` uses the router's default.
    pub target_status: Option<DeliveryStatus>,
}

impl std::fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteEntry")
            .field("sink", &self.sink.name())
            .field("target_status", &self.target_status)
            .finish()
    }
}

/// Either side of [`MultiSink::chain`].
pub enum Link {
    Router(MultiSink),
    Sink(Arc<dyn Sink>),
}

impl From<MultiSink> for Link {
    fn from(router: MultiSink) -> Self {
        Link::Router(router)
    }
}

impl From<Arc<dyn Sink>> for Link {
    fn from(sink: Arc<dyn Sink>) -> Self {
        Link::Sink(sink)
    }
}

/// A router: an ordered chain of sinks with per-entry success thresholds.
///
/// The chain may only be changed between events; `notify` borrows it
/// immutably for the whole pass.
#[derive(Debug, Clone)]
pub struct MultiSink {
    name: String,
    entries: Vec<RouteEntry>,
    default_target_status: DeliveryStatus,
    default_status: DeliveryStatus,
}

impl Default for MultiSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiSink {
    pub const DEFAULT_TARGET_STATUS: DeliveryStatus = DeliveryStatus::Unknown;
    pub const DEFAULT_STATUS: DeliveryStatus = DeliveryStatus::NotPresented;

    /// An empty router with the standard defaults.
    pub fn new() -> Self {
        Self::with_defaults(Self::DEFAULT_TARGET_STATUS, Self::DEFAULT_STATUS)
    }

    pub fn with_defaults(
        default_target_status: DeliveryStatus,
        default_status: DeliveryStatus,
    ) -> Self {
        Self {
            name: "router".to_string(),
            entries: Vec::new(),
            default_target_status,
            default_status,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder form of [`MultiSink::add_sink`].
    pub fn with_sink(mut self, sink: Arc<dyn Sink>, target_status: Option<DeliveryStatus>) -> Self {
        self.add_sink(sink, target_status);
        self
    }

    /// Append a sink at the end of the chain.
    pub fn add_sink(&mut self, sink: Arc<dyn Sink>, target_status: Option<DeliveryStatus>) {
        debug!(sink = sink.name(), ?target_status, "sink added to router");
        self.entries.push(RouteEntry {
            sink,
            target_status,
        });
    }

    /// Remove the first entry holding this exact sink instance.
    pub fn remove_sink(&mut self, sink: &Arc<dyn Sink>) -> bool {
        self.remove_where(|entry| Arc::ptr_eq(&entry.sink, sink))
    }

    /// Remove the first entry whose sink has this name.
    pub fn remove_named(&mut self, name: &str) -> bool {
        self.remove_where(|entry| entry.sink.name() == name)
    }

    fn remove_where(&mut self, pred: impl Fn(&RouteEntry) -> bool) -> bool {
        match self.entries.iter().position(pred) {
            Some(i) => {
                let removed = self.entries.remove(i);
                debug!(sink = removed.sink.name(), "sink removed from router");
                true
            }
            None => false,
        }
    }

    /// Join two sinks or routers into one flat chain.
    ///
    /// A router on the left keeps its defaults and gets the right side
    /// appended; a router on the right contributes its entries in order, so
    /// routers never nest.
    pub fn chain(first: impl Into<Link>, second: impl Into<Link>) -> MultiSink {
        let mut router = match first.into() {
            Link::Router(router) => router,
            Link::Sink(sink) => MultiSink::new().with_sink(sink, None),
        };
        match second.into() {
            Link::Router(other) => router.entries.extend(other.entries),
            Link::Sink(sink) => router.add_sink(sink, None),
        }
        router
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn default_target_status(&self) -> DeliveryStatus {
        self.default_target_status
    }

    pub fn default_status(&self) -> DeliveryStatus {
        self.default_status
    }

    pub fn set_default_target_status(&mut self, status: DeliveryStatus) {
        self.default_target_status = status;
    }

    pub fn set_default_status(&mut self, status: DeliveryStatus) {
        self.default_status = status;
    }
}

impl Sink for MultiSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn notify(&self, event: &Event) -> DeliveryStatus {
        let mut result = self.default_status;

        for (position, entry) in self.entries.iter().enumerate() {
            let target = entry.target_status.unwrap_or(self.default_target_status);
            let status = entry.sink.notify(event);

            if status >= target {
                info!(
                    sink = entry.sink.name(),
                    %status,
                    %target,
                    position,
                    "delivery target reached"
                );
                return status;
            }

            debug!(
                sink = entry.sink.name(),
                %status,
                %target,
                position,
                "sink below target, falling back"
            );
            if status < result {
                result = status;
            }
        }

        debug!(status = %result, "no sink reached its target");
        result
    }

    /// Union of every member's interest: any tag one sink wants must reach
    /// the router.
    fn interested_in_tags(&self) -> TagSet {
        let mut tags = TagSet::new();
        for entry in &self.entries {
            tags.union_update(&entry.sink.interested_in_tags());
        }
        tags
    }
}
