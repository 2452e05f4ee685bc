// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The inbound side of Chime.
//!
//! A chat host calls back with seven raw strings per printed line. This
//! crate turns them into [`chime_core::Event`]s, drops the duplicates that
//! arrive when one line matches several hooked tags, and keeps the host's
//! tag hooks in step with what the sinks want.

pub mod dedup;
pub mod handles;
pub mod host;
pub mod raw;
pub mod source;

pub use dedup::RecentEvents;
pub use handles::{Handle, HandleTable, SourceRegistry};
pub use host::{HostCall, RecordingHost};
pub use raw::RawEvent;
pub use source::{EventSource, HookHost, HookId, HostReply};
