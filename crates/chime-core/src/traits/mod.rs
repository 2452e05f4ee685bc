// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the routing core and its collaborators.

pub mod sink;

pub use sink::Sink;
