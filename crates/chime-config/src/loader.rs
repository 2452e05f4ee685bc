// SPDX-FileCopyrightText: 2026 Chime Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Lookup order, later wins: compiled defaults, `/etc/chime/chime.toml`,
//! `$XDG_CONFIG_HOME/chime/chime.toml`, `./chime.toml`, then `CHIME_*`
//! environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ChimeConfig;

pub const SYSTEM_CONFIG: &str = "/etc/chime/chime.toml";
pub const LOCAL_CONFIG: &str = "chime.toml";

/// Sections that environment variables can address.
const ENV_SECTIONS: [&str; 3] = ["engine", "router", "filter"];

/// Per-user config file, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("chime").join("chime.toml"))
}

/// Every file the standard lookup reads, lowest precedence first.
pub fn standard_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SYSTEM_CONFIG)];
    paths.extend(user_config_path());
    paths.push(PathBuf::from(LOCAL_CONFIG));
    paths
}

/// The standard hierarchy before extraction.
pub fn build_figment() -> Figment {
    standard_paths()
        .into_iter()
        .fold(defaults(), |figment, path| figment.merge(Toml::file(path)))
        .merge(env_provider())
}

/// Load from the standard hierarchy with environment overrides.
pub fn load_config() -> Result<ChimeConfig, figment::Error> {
    build_figment().extract()
}

/// Load one explicit file (no hierarchy) with environment overrides.
pub fn load_config_from_path(path: &Path) -> Result<ChimeConfig, figment::Error> {
    defaults()
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Load from a TOML string over the defaults only.
pub fn load_config_from_str(toml_content: &str) -> Result<ChimeConfig, figment::Error> {
    defaults().merge(Toml::string(toml_content)).extract()
}

fn defaults() -> Figment {
    Figment::new().merge(Serialized::defaults(ChimeConfig::default()))
}

/// `CHIME_ENGINE_LOG_LEVEL` becomes `engine.log_level`.
///
/// Only the section prefix is turned into a dot; splitting on every `_`
/// would break keys such as `dedup_capacity`.
fn env_provider() -> Env {
    Env::prefixed("CHIME_").map(|key| {
        let key_str = key.as_str();
        ENV_SECTIONS
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or_else(|| key_str.to_string())
            .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_paths_run_system_to_local() {
        let paths = standard_paths();
        assert_eq!(paths.first(), Some(&PathBuf::from(SYSTEM_CONFIG)));
        assert_eq!(paths.last(), Some(&PathBuf::from(LOCAL_CONFIG)));
    }

    #[test]
    fn env_keys_map_to_sections() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("CHIME_ENGINE_DEDUP_CAPACITY", "9");
            jail.set_env("CHIME_ROUTER_DEFAULT_STATUS", "error");
            jail.set_env("CHIME_FILTER_MIN_PRIORITY", "3");
            let config: ChimeConfig = defaults().merge(env_provider()).extract()?;
            assert_eq!(config.engine.dedup_capacity, 9);
            assert_eq!(config.router.default_status, chime_core::DeliveryStatus::Error);
            assert_eq!(config.filter.min_priority, 3);
            Ok(())
        });
    }
}
