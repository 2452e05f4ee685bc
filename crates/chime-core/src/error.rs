// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Chime notification router.

use thiserror::Error;

/// The primary error type shared by every Chime crate.
///
/// Delivery failures inside a sink are never reported through this type;
/// they are [`DeliveryStatus`](crate::DeliveryStatus) values so the router
/// can keep trying other sinks.
#[derive(Debug, Error)]
pub enum ChimeError {
    /// Configuration errors (missing parameters, wrong arity, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// A glob, regex or exact pattern could not be compiled.
    #[error("invalid pattern `{pattern}`: {reason}")]
    PatternSyntax { pattern: String, reason: String },

    /// A combinator filter asked for an operator the engine does not implement.
    #[error("unknown filter operator `{operator}`")]
    UnknownOperator { operator: String },

    /// A filter or sink kind was not found in its registry.
    #[error("unknown {kind} `{name}`{}", suggestion.as_ref().map(|s| format!(" (did you mean `{s}`?)")).unwrap_or_default())]
    UnknownComponent {
        kind: &'static str,
        name: String,
        suggestion: Option<String>,
    },

    /// A sink cannot be constructed because its backend is missing.
    #[error("sink `{sink}` is unavailable: {reason}")]
    SinkUnavailable { sink: String, reason: String },

    /// A raw host event could not be normalized.
    #[error("invalid event field `{field}`: {message}")]
    InvalidEvent { field: &'static str, message: String },

    /// No object is registered under the given handle.
    #[error("no object registered for handle {handle}")]
    HandleNotFound { handle: String },

    /// The host refused to install or remove a tag hook.
    #[error("hook error for tag `{tag}`: {message}")]
    Hook { tag: String, message: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ChimeError {
    /// Shorthand for a [`ChimeError::PatternSyntax`] error.
    pub fn pattern(pattern: &str, reason: impl Into<String>) -> Self {
        ChimeError::PatternSyntax {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}
