// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! An in-process [`HookHost`] that only keeps a record.
//!
//! Used where no chat client is attached: the `chime route` command feeds
//! lines from stdin and uses this host to see which tags would be hooked.

use std::collections::{BTreeMap, BTreeSet};

use chime_core::ChimeError;

use crate::source::{HookHost, HookId};

/// One call made against a [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Hook { tag: String, callback_data: String },
    Unhook { tag: String },
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    next: u64,
    hooks: BTreeMap<HookId, String>,
    refused: BTreeSet<String>,
    calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `hook_tag` fail for this tag.
    pub fn refusing(mut self, tag: &str) -> Self {
        self.refused.insert(tag.to_string());
        self
    }

    /// Tags with a live hook, sorted.
    pub fn hooked_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.hooks.values().cloned().collect();
        tags.sort();
        tags
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }
}

impl HookHost for RecordingHost {
    fn hook_tag(&mut self, tag: &str, callback_data: &str) -> Result<HookId, ChimeError> {
        if self.refused.contains(tag) {
            return Err(ChimeError::Hook {
                tag: tag.to_string(),
                message: "refused by host".to_string(),
            });
        }
        self.next += 1;
        let id = HookId(self.next);
        self.hooks.insert(id, tag.to_string());
        self.calls.push(HostCall::Hook {
            tag: tag.to_string(),
            callback_data: callback_data.to_string(),
        });
        Ok(id)
    }

    fn unhook(&mut self, hook: HookId) {
        if let Some(tag) = self.hooks.remove(&hook) {
            self.calls.push(HostCall::Unhook { tag });
        }
    }
}
