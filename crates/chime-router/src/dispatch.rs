// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filter-then-route pipeline for one event at a time.

use chime_core::{DeliveryStatus, Event, Priority, Sink, TagSet};
use tracing::debug;

use crate::filter::Filter;
use crate::multi::MultiSink;

/// What happened to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The filter scored the event below the threshold; no sink was tried.
    Filtered(Priority),
    /// The router ran and reported this status.
    Delivered(DeliveryStatus),
}

impl Dispatch {
    pub fn status(self) -> Option<DeliveryStatus> {
        match self {
            Dispatch::Filtered(_) => None,
            Dispatch::Delivered(status) => Some(status),
        }
    }
}

/// Scores events with an optional filter rule and hands the interesting
/// ones to a [`MultiSink`].
///
/// Without a rule, all filtering is left to the tag interest the sinks
/// declare.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    rule: Option<Filter>,
    min_priority: Priority,
    router: MultiSink,
}

impl Dispatcher {
    pub const DEFAULT_MIN_PRIORITY: Priority = Priority::YES;

    /// A dispatcher that routes every event.
    pub fn new(router: MultiSink) -> Self {
        Self {
            rule: None,
            min_priority: Self::DEFAULT_MIN_PRIORITY,
            router,
        }
    }

    /// Only route events the rule scores at `min_priority` or above.
    pub fn with_rule(mut self, rule: Filter, min_priority: Priority) -> Self {
        self.rule = Some(rule);
        self.min_priority = min_priority;
        self
    }

    pub fn rule(&self) -> Option<&Filter> {
        self.rule.as_ref()
    }

    pub fn min_priority(&self) -> Priority {
        self.min_priority
    }

    pub fn router(&self) -> &MultiSink {
        &self.router
    }

    /// Mutable access to the chain; only use it between events.
    pub fn router_mut(&mut self) -> &mut MultiSink {
        &mut self.router
    }

    pub fn dispatch(&self, event: &Event) -> Dispatch {
        if let Some(rule) = &self.rule {
            let priority = rule.prioritize(event);
            if priority < self.min_priority {
                debug!(%priority, min = %self.min_priority, "event filtered out");
                return Dispatch::Filtered(priority);
            }
            debug!(%priority, "event passed filter");
        }
        Dispatch::Delivered(self.router.notify(event))
    }

    /// Tags the host must hook: the router's interest, narrowed by the rule.
    pub fn interested_in_tags(&self) -> TagSet {
        let tags = self.router.interested_in_tags();
        match &self.rule {
            Some(rule) => tags.intersection(&rule.interested_in_tags()),
            None => tags,
        }
    }
}
