// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sink trait for delivery channels (desktop popups, helper commands, logs).

use crate::status::DeliveryStatus;
use crate::tags::TagSet;
use crate::types::Event;

/// A unit that tries to deliver one event through some channel.
///
/// `notify` runs synchronously on the host's event thread. Implementations
/// that do I/O must bound their own blocking time: the router has no way to
/// cancel them. Failures are reported as error statuses, never panics.
pub trait Sink: Send + Sync {
    /// Short name used in logs and for lookup.
    fn name(&self) -> &str;

    /// Attempt delivery and report how well it went.
    fn notify(&self, event: &Event) -> DeliveryStatus;

    /// Tags this sink wants to see. Defaults to everything.
    fn interested_in_tags(&self) -> TagSet {
        TagSet::wildcard()
    }
}
