// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assembling a dispatcher from a validated configuration.

use chime_config::{ChimeConfig, FilterConfig, RouterConfig};
use chime_core::{ChimeError, Priority};
use chime_router::{Dispatcher, Filter, MultiSink};
use tracing::info;

use crate::registry::{FilterRegistry, SinkRegistry};

/// The router described by `[router]`, sinks in configuration order.
pub fn build_router(config: &RouterConfig, sinks: &SinkRegistry) -> Result<MultiSink, ChimeError> {
    let mut router = MultiSink::with_defaults(config.default_target_status, config.default_status);
    for spec in &config.sinks {
        router.add_sink(sinks.build(spec)?, spec.target_status);
    }
    Ok(router)
}

/// The rule described by `[filter.rule]`, if any.
pub fn build_rule(
    config: &FilterConfig,
    filters: &FilterRegistry,
    default_ignore_case: bool,
) -> Result<Option<Filter>, ChimeError> {
    config
        .rule
        .as_ref()
        .map(|spec| filters.build(spec, default_ignore_case))
        .transpose()
}

/// Build the whole pipeline with the compiled-in registries.
pub fn build_dispatcher(config: &ChimeConfig) -> Result<Dispatcher, ChimeError> {
    let router = build_router(&config.router, &SinkRegistry::default())?;
    let rule = build_rule(
        &config.filter,
        &FilterRegistry::default(),
        config.engine.ignore_case,
    )?;

    let dispatcher = match rule {
        Some(rule) => {
            info!(%rule, min_priority = config.filter.min_priority, "filter rule installed");
            Dispatcher::new(router).with_rule(rule, Priority::new(config.filter.min_priority))
        }
        None => Dispatcher::new(router),
    };
    info!(
        sinks = dispatcher.router().len(),
        tags = %dispatcher.interested_in_tags(),
        "dispatcher built"
    );
    Ok(dispatcher)
}
