// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Suppression of repeated host callbacks.
//!
//! The host fires one callback per hooked tag, so a line carrying two hooked
//! tags arrives twice. Remembering the last few raw tuples is enough to
//! drop the copies.

use std::collections::VecDeque;

use crate::raw::RawEvent;

/// Fixed-size memory of the most recent distinct raw events.
#[derive(Debug, Clone)]
pub struct RecentEvents {
    slots: VecDeque<RawEvent>,
    capacity: usize,
}

impl Default for RecentEvents {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl RecentEvents {
    pub const DEFAULT_CAPACITY: usize = 5;

    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns `true` if `raw` was seen among the remembered events.
    /// Otherwise remembers it, evicting the oldest when full.
    pub fn check_and_remember(&mut self, raw: &RawEvent) -> bool {
        if self.slots.contains(raw) {
            return true;
        }
        if self.slots.len() == self.capacity {
            self.slots.pop_front();
        }
        self.slots.push_back(raw.clone());
        false
    }
}
