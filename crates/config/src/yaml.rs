// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{anyhow, Context, Result};
use std::{fs, path::Path};

/// Read a yaml file expanding `$VAR` and `${VAR}` references from the environment
pub fn load_yaml_with_env(path: &Path) -> Result<String> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Could not read config file {}", path.display()))?;
    expand_env(&raw)
}

pub fn expand_env(raw: &str) -> Result<String> {
    let expanded = shellexpand::env(raw)
        .map_err(|e| anyhow!("Could not expand variable '{}': {}", e.var_name, e.cause))?;
    Ok(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_expands_environment() {
        Jail::expect_with(|jail| {
            jail.set_env("FHEGW_TEST_RPC", "http://node:8545");
            let out = expand_env("rpc_url: \"${FHEGW_TEST_RPC}\"").map_err(|e| e.to_string())?;
            assert_eq!(out, "rpc_url: \"http://node:8545\"");
            Ok(())
        });
    }

    #[test]
    fn test_missing_variable_is_an_error() {
        assert!(expand_env("rpc_url: $FHEGW_DEFINITELY_NOT_SET_ANYWHERE").is_err());
    }
}
