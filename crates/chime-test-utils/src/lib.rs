// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Chime tests.
//!
//! Provides deterministic stand-ins for delivery backends and terse event
//! construction, so routing can be tested without a chat host or desktop.
//!
//! # Components
//!
//! - [`MockSink`] - Sink with a scripted status sequence and call capture
//! - [`EventBuilder`] - Builder for normalized events with sane defaults

pub mod events;
pub mod mock_sink;

pub use events::EventBuilder;
pub use mock_sink::MockSink;
