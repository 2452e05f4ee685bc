// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `chime route`: feed raw events through the engine.
//!
//! Each input line is one event in the host's tab-separated form:
//! buffer, date, tags, displayed, highlighted, prefix, message. One outcome
//! line is written per event. A malformed line is reported and skipped;
//! bytes that are not UTF-8 are replaced rather than rejected.

use std::borrow::Cow;
use std::io::{BufRead, Write};
use std::process::ExitCode;

use chime_config::ChimeConfig;
use chime_router::Dispatch;
use chime_source::{EventSource, RawEvent, RecordingHost};
use tracing::{debug, info, warn};

use crate::CliError;

pub fn run(
    config: &ChimeConfig,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<ExitCode, CliError> {
    let dispatcher = chime_plugin::build_dispatcher(config)?;
    let mut source = EventSource::new(dispatcher, RecordingHost::new())
        .with_dedup_capacity(config.engine.dedup_capacity);
    source.enable()?;
    info!(hooks = ?source.host().hooked_tags(), "event source enabled");

    let mut failures = 0usize;
    for (lineno, bytes) in input.split(b'\n').enumerate() {
        let bytes = bytes?;
        let decoded = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = decoded {
            debug!(line = lineno + 1, "invalid UTF-8 replaced");
        }
        let line = decoded.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let outcome = RawEvent::from_tab_line(line).and_then(|raw| source.process(raw));
        match outcome {
            Ok(None) => writeln!(out, "duplicate")?,
            Ok(Some(Dispatch::Filtered(priority))) => writeln!(out, "filtered\t{priority}")?,
            Ok(Some(Dispatch::Delivered(status))) => writeln!(out, "delivered\t{status}")?,
            Err(e) => {
                warn!(line = lineno + 1, error = %e, "event rejected");
                failures += 1;
                writeln!(out, "error\t{e}")?;
            }
        }
    }

    source.disable();
    Ok(if failures == 0 { ExitCode::SUCCESS } else { ExitCode::from(2) })
}
