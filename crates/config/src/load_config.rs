// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::path::{Path, PathBuf};

use crate::app_config::{AppConfig, DEFAULT_CONFIG_NAME};
use crate::yaml::load_yaml_with_env;
use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use path_clean::clean;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ENV_PREFIX: &str = "FHEGW_";

/// `FHEGW_` variables holding signing keys. They are read by the cli and never
/// become part of the config.
pub const SECRET_ENV_KEYS: &[&str] = &["owner_key", "relayer_key", "user_key"];

pub type FindInParent = fn(&Path, &str) -> Option<PathBuf>;

pub fn find_in_parent(path: &Path, filename: &str) -> Option<PathBuf> {
    let mut current = path.to_path_buf();

    loop {
        let file_path = current.join(filename);
        if file_path.exists() {
            return Some(file_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Work out which config file applies. An explicit cli path wins, then the first
/// `fhegw.config.yaml` walking up from cwd, then the OS config folder.
pub fn resolve_config_path(
    find_in_parent: FindInParent,
    cwd: &Path,
    default_config_dir: &Path,
    cli_file: Option<&Path>,
) -> PathBuf {
    if let Some(cli_file) = cli_file {
        if cli_file.is_absolute() {
            return cli_file.to_path_buf();
        }
        return clean(cwd.join(cli_file));
    }

    if let Some(found) = find_in_parent(cwd, DEFAULT_CONFIG_NAME) {
        return found;
    }

    clean(default_config_dir.join(DEFAULT_CONFIG_NAME))
}

/// Values passed from the cli that override the file and the environment
#[derive(Default, Serialize, Deserialize, Clone, Debug)]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fhegw")
}

fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX)
        .ignore(SECRET_ENV_KEYS)
        .split("__")
}

/// Load the config at the given file or the default location if not provided.
/// A missing default file is not an error: defaults and `FHEGW_` variables apply.
pub fn load_config(config_file: Option<&str>, overrides: CliOverrides) -> Result<AppConfig> {
    let cwd = std::env::current_dir()?;
    let explicit = config_file.map(PathBuf::from);
    let resolved = resolve_config_path(
        find_in_parent,
        &cwd,
        &default_config_dir(),
        explicit.as_deref(),
    );

    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
    let mut found_config_file = None;

    if resolved.exists() {
        debug!(path = %resolved.display(), "loading config file");
        let yaml = load_yaml_with_env(&resolved)?;
        figment = figment.merge(Yaml::string(&yaml));
        found_config_file = Some(resolved);
    } else if explicit.is_some() {
        bail!("Configuration file not found at {}", resolved.display());
    }

    let config: AppConfig = figment
        .merge(env_provider())
        .merge(Serialized::defaults(CliOverrides {
            config_file: found_config_file,
            ..overrides
        }))
        .extract()
        .context("Could not parse configuration")?;

    config.validate()?;
    Ok(config)
}
