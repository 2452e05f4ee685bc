// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for Chime.
//!
//! TOML parsing with strict key checking (`deny_unknown_fields`), an XDG
//! file hierarchy, `CHIME_*` environment overrides and miette diagnostics
//! with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use chime_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("sinks: {}", config.router.sinks.len());
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{ChimeConfig, EngineConfig, FilterConfig, FilterSpec, RouterConfig, SinkSpec};

/// Load from the standard hierarchy and validate.
pub fn load_and_validate() -> Result<ChimeConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load one explicit file (plus environment overrides) and validate.
///
/// Unlike the hierarchy lookup, a missing file is an error here.
pub fn load_and_validate_path(path: &Path) -> Result<ChimeConfig, Vec<ConfigError>> {
    if !path.is_file() {
        return Err(vec![ConfigError::NotFound {
            path: path.display().to_string(),
        }]);
    }
    finish(loader::load_config_from_path(path), || {
        std::fs::read_to_string(path)
            .map(|content| vec![(path.display().to_string(), content)])
            .unwrap_or_default()
    })
}

/// Load from a TOML string and validate.
pub fn load_and_validate_str(toml_content: &str) -> Result<ChimeConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Validate a loaded config, or turn the load error into diagnostics. The
/// sources are only read when there is an error to point into.
fn finish(
    loaded: Result<ChimeConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<ChimeConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            tracing::debug!(sinks = config.router.sinks.len(), "configuration loaded");
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

fn collect_toml_sources() -> Vec<(String, String)> {
    loader::standard_paths()
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            let shown = if path.is_relative() {
                std::env::current_dir()
                    .map(|d| d.join(&path))
                    .unwrap_or_else(|_| path.clone())
            } else {
                path
            };
            Some((shown.display().to_string(), content))
        })
        .collect()
}
