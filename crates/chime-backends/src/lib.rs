// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound delivery for Chime.
//!
//! Every type here implements [`chime_core::Sink`] and reports failures as
//! [`chime_core::DeliveryStatus`] values, never as errors, so a router can
//! fall back to the next channel. Errors only surface at construction time,
//! when a backend is missing.

pub mod command;
pub mod desktop;
pub mod log;
pub mod request;

pub use command::{find_program, CommandSink};
pub use desktop::{desktop_sink, select_backend, Backend};
pub use log::LogSink;
pub use request::{NotificationRequest, Timeout, Urgency};
