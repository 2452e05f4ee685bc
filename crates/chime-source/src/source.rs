// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The event source: owns the tag hooks and feeds the dispatcher.

use std::collections::BTreeMap;

use chime_core::{ChimeError, TagSet};
use chime_router::{Dispatch, Dispatcher};
use tracing::{debug, info, warn};

use crate::dedup::RecentEvents;
use crate::handles::Handle;
use crate::raw::RawEvent;

/// Host-side identifier of an installed hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookId(pub u64);

/// What a callback tells the host. Chime always acknowledges; failures are
/// returned as errors instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostReply {
    Ok,
}

/// The chat host's hook API.
///
/// A hook fires for every printed line carrying `tag`. Hooks installed for
/// different tags combine with OR semantics, so one hook per tag is needed.
pub trait HookHost {
    /// Install a print hook for `tag`. `callback_data` comes back verbatim
    /// with every callback and identifies the source.
    fn hook_tag(&mut self, tag: &str, callback_data: &str) -> Result<HookId, ChimeError>;

    fn unhook(&mut self, hook: HookId);
}

/// Connects a host's tag hooks to a [`Dispatcher`].
pub struct EventSource<H: HookHost> {
    dispatcher: Dispatcher,
    host: H,
    hooks: BTreeMap<String, HookId>,
    recent: RecentEvents,
    handle: Option<Handle>,
}

impl<H: HookHost> EventSource<H> {
    pub fn new(dispatcher: Dispatcher, host: H) -> Self {
        Self {
            dispatcher,
            host,
            hooks: BTreeMap::new(),
            recent: RecentEvents::default(),
            handle: None,
        }
    }

    pub fn with_dedup_capacity(mut self, capacity: usize) -> Self {
        self.recent = RecentEvents::new(capacity);
        self
    }

    pub(crate) fn attach(&mut self, handle: Handle) {
        self.handle = Some(handle);
    }

    pub fn handle(&self) -> Option<Handle> {
        self.handle
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Mutable access to the pipeline. Call [`EventSource::update`] after
    /// changing anything that affects tag interest.
    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Tags currently hooked, in lexical order.
    pub fn active_tags(&self) -> TagSet {
        self.hooks.keys().map(String::as_str).collect()
    }

    /// Tags the pipeline wants hooked. The wildcard cannot be hooked and is
    /// dropped.
    pub fn wanted_tags(&self) -> TagSet {
        self.dispatcher.interested_in_tags().without_wildcard()
    }

    /// Hook every wanted tag.
    ///
    /// An empty set is allowed but almost certainly a configuration mistake,
    /// so it is logged.
    pub fn enable(&mut self) -> Result<(), ChimeError> {
        let wanted = self.wanted_tags();
        if wanted.is_empty() {
            warn!("enabling event source with an empty tag set; no notifications will arrive");
        }
        for tag in wanted.iter() {
            self.hook(tag)?;
        }
        Ok(())
    }

    /// Remove every hook.
    pub fn disable(&mut self) {
        for (tag, hook) in std::mem::take(&mut self.hooks) {
            self.host.unhook(hook);
            debug!(%tag, "tag unhooked");
        }
    }

    /// Bring the hooks in line with the current interest without touching
    /// tags that stay wanted.
    pub fn update(&mut self) -> Result<(), ChimeError> {
        let wanted = self.wanted_tags();
        let active = self.active_tags();

        for tag in wanted.difference(&active).iter() {
            self.hook(tag)?;
        }
        for tag in active.difference(&wanted).iter() {
            self.unhook(tag);
        }
        Ok(())
    }

    /// Handle one host callback. Duplicates are acknowledged without being
    /// dispatched.
    pub fn on_raw(&mut self, raw: RawEvent) -> Result<HostReply, ChimeError> {
        self.process(raw)?;
        Ok(HostReply::Ok)
    }

    /// Like [`EventSource::on_raw`] but reports what happened: `None` for a
    /// suppressed duplicate.
    ///
    /// Only well-formed events are remembered, so a malformed line is an
    /// error every time it arrives.
    pub fn process(&mut self, raw: RawEvent) -> Result<Option<Dispatch>, ChimeError> {
        let event = raw.normalize()?;
        if self.recent.check_and_remember(&raw) {
            info!(source = %raw.source, "duplicate event suppressed");
            return Ok(None);
        }
        Ok(Some(self.dispatcher.dispatch(&event)))
    }

    fn hook(&mut self, tag: &str) -> Result<(), ChimeError> {
        if self.hooks.contains_key(tag) {
            return Ok(());
        }
        let callback_data = self.handle.map(|h| h.to_string()).unwrap_or_default();
        let hook = self.host.hook_tag(tag, &callback_data)?;
        self.hooks.insert(tag.to_string(), hook);
        debug!(%tag, ?hook, "tag hooked");
        Ok(())
    }

    fn unhook(&mut self, tag: &str) {
        if let Some(hook) = self.hooks.remove(tag) {
            self.host.unhook(hook);
            debug!(%tag, "tag unhooked");
        }
    }
}
