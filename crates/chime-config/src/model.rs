// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Chime.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is an
//! error at startup rather than a silently ignored setting.

use chime_core::DeliveryStatus;
use serde::{Deserialize, Serialize};

/// Top-level Chime configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChimeConfig {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub router: RouterConfig,

    #[serde(default)]
    pub filter: FilterConfig,
}

/// Engine-wide behavior.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// How many recent raw events are remembered for duplicate suppression.
    #[serde(default = "default_dedup_capacity")]
    pub dedup_capacity: usize,

    /// Case sensitivity for patterns without an explicit `cs:`/`ic:`
    /// prefix.
    #[serde(default = "default_ignore_case")]
    pub ignore_case: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dedup_capacity: default_dedup_capacity(),
            ignore_case: default_ignore_case(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_dedup_capacity() -> usize {
    5
}

fn default_ignore_case() -> bool {
    true
}

/// The fallback chain.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Threshold for sinks that do not set their own `target_status`.
    #[serde(default = "default_target_status")]
    pub default_target_status: DeliveryStatus,

    /// Reported when no sink reaches its target and none did worse.
    #[serde(default = "default_status")]
    pub default_status: DeliveryStatus,

    /// Sinks in the order they are tried.
    #[serde(default)]
    pub sinks: Vec<SinkSpec>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_target_status: default_target_status(),
            default_status: default_status(),
            sinks: Vec::new(),
        }
    }
}

fn default_target_status() -> DeliveryStatus {
    DeliveryStatus::Unknown
}

fn default_status() -> DeliveryStatus {
    DeliveryStatus::NotPresented
}

/// One `[[router.sinks]]` entry.
///
/// Which fields matter depends on `kind`: `command` needs `program`,
/// `desktop` reads `backends`, and every kind accepts `tags` to override
/// its tag interest.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SinkSpec {
    /// Registry name: `log`, `command` or `desktop`.
    pub kind: String,

    /// Unique name; defaults to `kind`.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub target_status: Option<DeliveryStatus>,

    /// Helper program for `command` sinks.
    #[serde(default)]
    pub program: Option<String>,

    /// Argument templates for `command` sinks.
    #[serde(default)]
    pub args: Vec<String>,

    /// Preference order for `desktop` sinks; all known backends if unset.
    #[serde(default)]
    pub backends: Option<Vec<String>>,

    #[serde(default)]
    pub icon: Option<String>,

    /// Display time of the notification; `0` keeps it until dismissed.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// How long the helper may run before it is killed.
    #[serde(default)]
    pub wait_ms: Option<u64>,

    /// Status a helper exiting with code 0 reports.
    #[serde(default)]
    pub success_status: Option<DeliveryStatus>,

    /// Replaces the sink's default tag interest.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl SinkSpec {
    pub fn effective_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.kind)
    }
}

/// Optional rule that scores events before routing.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    /// Events scoring below this are dropped.
    #[serde(default = "default_min_priority")]
    pub min_priority: i64,

    #[serde(default)]
    pub rule: Option<FilterSpec>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_priority: default_min_priority(),
            rule: None,
        }
    }
}

fn default_min_priority() -> i64 {
    1
}

/// A node of the filter tree, as written in TOML.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSpec {
    pub kind: String,

    /// For `tag`.
    #[serde(default)]
    pub tag: Option<String>,

    /// For `text` and `sender`.
    #[serde(default)]
    pub pattern: Option<String>,

    /// Overrides `engine.ignore_case` for this pattern.
    #[serde(default)]
    pub ignore_case: Option<bool>,

    /// For `scale`.
    #[serde(default)]
    pub factor: Option<i64>,

    /// For `constant`.
    #[serde(default)]
    pub value: Option<i64>,

    #[serde(default)]
    pub children: Vec<FilterSpec>,
}
