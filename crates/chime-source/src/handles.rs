// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handles that let a text-only host callback find its Rust object.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chime_core::ChimeError;
use tracing::debug;

use crate::raw::RawEvent;
use crate::source::{EventSource, HookHost, HostReply};

/// Opaque key into a [`HandleTable`]. Never reused within a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Handle {
    type Err = ChimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Handle)
            .map_err(|_| ChimeError::HandleNotFound {
                handle: s.to_string(),
            })
    }
}

/// Objects keyed by monotonically allocated handles, starting at 1.
#[derive(Debug)]
pub struct HandleTable<T> {
    next: u64,
    entries: HashMap<Handle, T>,
}

impl<T> Default for HandleTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HandleTable<T> {
    pub fn new() -> Self {
        Self {
            next: 1,
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, value: T) -> Handle {
        let handle = Handle(self.next);
        self.next += 1;
        self.entries.insert(handle, value);
        handle
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.entries.get(&handle)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.entries.get_mut(&handle)
    }

    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        self.entries.remove(&handle)
    }

    /// Look up by the handle's string form, as carried by host callbacks.
    pub fn lookup_mut(&mut self, handle: &str) -> Result<&mut T, ChimeError> {
        let key: Handle = handle.parse()?;
        self.entries
            .get_mut(&key)
            .ok_or_else(|| ChimeError::HandleNotFound {
                handle: handle.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Every live [`EventSource`], reachable from a callback's handle string.
pub struct SourceRegistry<H: HookHost> {
    sources: HandleTable<EventSource<H>>,
}

impl<H: HookHost> Default for SourceRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HookHost> SourceRegistry<H> {
    pub fn new() -> Self {
        Self {
            sources: HandleTable::new(),
        }
    }

    /// Take ownership of a source and tell it its handle, so the hooks it
    /// installs call back to the right place.
    pub fn register(&mut self, source: EventSource<H>) -> Handle {
        let handle = self.sources.insert(source);
        if let Some(source) = self.sources.get_mut(handle) {
            source.attach(handle);
        }
        debug!(%handle, "event source registered");
        handle
    }

    /// Remove a source, unhooking all its tags first.
    pub fn unregister(&mut self, handle: Handle) -> Option<EventSource<H>> {
        let mut source = self.sources.remove(handle)?;
        source.disable();
        debug!(%handle, "event source unregistered");
        Some(source)
    }

    pub fn get(&self, handle: Handle) -> Option<&EventSource<H>> {
        self.sources.get(handle)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut EventSource<H>> {
        self.sources.get_mut(handle)
    }

    /// Entry point for a host callback: route `raw` to the source named by
    /// the callback's data string.
    pub fn dispatch_raw(&mut self, handle: &str, raw: RawEvent) -> Result<HostReply, ChimeError> {
        self.sources.lookup_mut(handle)?.on_raw(raw)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
