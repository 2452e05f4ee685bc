// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Chime notification router.
//!
//! This crate holds the value types every other crate speaks: the normalized
//! [`Event`], wildcard-aware [`TagSet`]s, filter [`Priority`] scores, ordered
//! [`DeliveryStatus`] outcomes, the [`Sink`] trait and the shared
//! [`ChimeError`].

pub mod error;
pub mod priority;
pub mod status;
pub mod tags;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ChimeError;
pub use priority::Priority;
pub use status::DeliveryStatus;
pub use tags::{TagSet, WILDCARD};
pub use traits::Sink;
pub use types::{
    Event, RawNames, SourceRef, SourceResolver, HIGHLIGHT_TAG, MESSAGE_TAG, PRIVATE_TAG,
    PRIVATE_TARGET,
};
