// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event filtering and delivery routing for Chime.
//!
//! This crate provides:
//! - [`PatternMatcher`]: exact / glob / regex string matching from one spec string
//! - [`Filter`]: priority-scoring filter trees with tag interest aggregation
//! - [`MultiSink`]: ordered first-success fallback delivery across sinks
//! - [`Dispatcher`]: the filter → router pipeline fed by the event source

pub mod dispatch;
pub mod filter;
pub mod multi;
pub mod pattern;

pub use dispatch::{Dispatch, Dispatcher};
pub use filter::{Filter, Operator};
pub use multi::{Link, MultiSink, RouteEntry};
pub use pattern::{glob_to_regex, MatchMode, PatternMatcher};
