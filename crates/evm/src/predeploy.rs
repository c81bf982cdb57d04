// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Files publishing the gateway address before the gateway exists, so contracts
//! compiled afterwards can embed it as a constant.

use crate::address::parse_address;
use crate::artifacts::read_env_value;
use crate::{GatewayError, Result};
use alloy::primitives::Address;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

pub const PREDEPLOY_ENV_KEY: &str = "GATEWAY_CONTRACT_PREDEPLOY_ADDRESS";

pub fn render_env_line(address: Address) -> String {
    format!("{PREDEPLOY_ENV_KEY}={}\n", address.to_checksum(None))
}

pub fn render_solidity_constant(address: Address) -> String {
    format!(
        "// SPDX-License-Identifier: BSD-3-Clause-Clear

pragma solidity ^0.8.24;

address constant {PREDEPLOY_ENV_KEY} = {};
",
        address.to_checksum(None)
    )
}

/// Outcome of writing the predeploy files. Failures are collected, not raised.
#[derive(Debug, Default)]
pub struct PersistReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<GatewayError>,
}

impl PersistReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredeployArtifacts {
    pub env_file: PathBuf,
    pub solidity_file: PathBuf,
}

impl PredeployArtifacts {
    pub fn new(env_file: PathBuf, solidity_file: PathBuf) -> Self {
        Self {
            env_file,
            solidity_file,
        }
    }

    pub async fn write_all(&self, address: Address) -> PersistReport {
        let mut report = PersistReport::default();
        let outputs = [
            (&self.env_file, render_env_line(address)),
            (&self.solidity_file, render_solidity_constant(address)),
        ];

        for (path, contents) in outputs {
            match write_file(path, &contents).await {
                Ok(()) => {
                    info!(path = %path.display(), %address, "wrote predeployed gateway address");
                    report.written.push(path.clone());
                }
                Err(err) => {
                    warn!("{err}");
                    report.failed.push(err);
                }
            }
        }

        report
    }

    pub fn read_predeployed_address(&self) -> Result<Address> {
        read_predeployed_address(&self.env_file)
    }
}

async fn write_file(path: &Path, contents: &str) -> Result<()> {
    let to_error = |e: std::io::Error| GatewayError::FileWrite {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(to_error)?;
    }
    fs::write(path, contents).await.map_err(to_error)
}

/// The gateway address a previous deployment persisted to `env_file`
pub fn read_predeployed_address(env_file: &Path) -> Result<Address> {
    let value = read_env_value(env_file, PREDEPLOY_ENV_KEY)?.ok_or_else(|| {
        GatewayError::Deployment(format!(
            "{PREDEPLOY_ENV_KEY} not found in {}",
            env_file.display()
        ))
    })?;
    parse_address(&value)
}
