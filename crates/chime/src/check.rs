// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `chime check`: build the engine and describe it.

use std::io::Write;
use std::process::ExitCode;

use chime_config::ChimeConfig;
use chime_core::Sink;
use chime_router::Dispatcher;

use crate::CliError;

pub fn run(config: &ChimeConfig, mut out: impl Write) -> Result<ExitCode, CliError> {
    let dispatcher = chime_plugin::build_dispatcher(config)?;
    describe(&dispatcher, &mut out)?;
    Ok(ExitCode::SUCCESS)
}

fn describe(dispatcher: &Dispatcher, out: &mut impl Write) -> std::io::Result<()> {
    let router = dispatcher.router();
    writeln!(
        out,
        "router: default target {}, default status {}",
        router.default_target_status(),
        router.default_status()
    )?;
    for (i, entry) in router.entries().iter().enumerate() {
        let target = entry
            .target_status
            .unwrap_or(router.default_target_status());
        writeln!(
            out,
            "  {}. {} (target {}, tags {})",
            i + 1,
            entry.sink.name(),
            target,
            entry.sink.interested_in_tags()
        )?;
    }

    match dispatcher.rule() {
        Some(rule) => writeln!(out, "rule: {rule} >= {}", dispatcher.min_priority())?,
        None => writeln!(out, "rule: none")?,
    }

    let hooks = dispatcher.interested_in_tags().without_wildcard();
    if hooks.is_empty() {
        writeln!(out, "hooks: none (no notifications would be delivered)")?;
    } else {
        writeln!(out, "hooks: {}", hooks.iter().collect::<Vec<_>>().join(" "))?;
    }
    Ok(())
}
