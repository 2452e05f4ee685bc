// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compiled-in registries for Chime filters and sinks.
//!
//! Configuration names components by `kind`; the registries map each kind
//! to a constructor. There is no dynamic lookup: a kind that is not
//! registered is an error, with a suggestion when a close name exists.

pub mod build;
pub mod registry;

pub use build::{build_dispatcher, build_router, build_rule};
pub use registry::{FilterFactory, FilterRegistry, SinkFactory, SinkRegistry};
