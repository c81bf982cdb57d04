// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::contract::{ContractAddresses, KmsVerifier};
use crate::rpc::{RpcAuth, RpcUrl};
use crate::validation::parse_address;
use anyhow::{bail, Context, Result};
use path_clean::clean;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_CONFIG_NAME: &str = "fhegw.config.yaml";

/// Output locations for the predicted gateway address
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PredeployPaths {
    /// Receives `GATEWAY_CONTRACT_PREDEPLOY_ADDRESS=<address>`
    pub env_file: PathBuf,
    /// Receives the solidity constant consumed when compiling dependent contracts
    pub solidity_file: PathBuf,
}

impl Default for PredeployPaths {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from("node_modules/fhevm/gateway/lib/.env.gateway"),
            solidity_file: PathBuf::from("node_modules/fhevm/gateway/lib/PredeployAddress.sol"),
        }
    }
}

/// Contract artifact names looked up as `<artifacts_dir>/<name>.json`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ArtifactNames {
    pub gateway: String,
    pub token: String,
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            gateway: "GatewayContract".to_string(),
            token: "EncryptedERC20".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON-RPC endpoint of the network. Every chain read and write goes through it.
    pub rpc_url: String,
    #[serde(default)]
    pub rpc_auth: RpcAuth,
    /// Confidential computation gateway used for input proofs and re-encryption
    pub gateway_url: String,
    /// Directory holding compiled `<ContractName>.json` artifacts
    pub artifacts_dir: PathBuf,
    pub artifacts: ArtifactNames,
    /// Upper bound for waiting on a transaction receipt
    pub confirmation_timeout_secs: u64,
    pub predeploy: PredeployPaths,
    pub contracts: ContractAddresses,
    /// The config file this was loaded from. Relative paths resolve against its folder.
    pub config_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            rpc_auth: RpcAuth::None,
            gateway_url: "http://localhost:7077".to_string(),
            artifacts_dir: PathBuf::from("build"),
            artifacts: ArtifactNames::default(),
            confirmation_timeout_secs: 120,
            predeploy: PredeployPaths::default(),
            contracts: ContractAddresses::default(),
            config_file: None,
        }
    }
}

impl AppConfig {
    pub fn rpc(&self) -> Result<RpcUrl> {
        RpcUrl::from_url(&self.rpc_url)
            .with_context(|| format!("Failed to parse rpc_url '{}'", self.rpc_url))
    }

    pub fn rpc_auth(&self) -> &RpcAuth {
        &self.rpc_auth
    }

    pub fn gateway_url(&self) -> Result<Url> {
        Url::parse(&self.gateway_url)
            .with_context(|| format!("Failed to parse gateway_url '{}'", self.gateway_url))
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_secs)
    }

    pub fn artifacts_dir(&self) -> PathBuf {
        self.resolve(&self.artifacts_dir)
    }

    pub fn predeploy_env_file(&self) -> PathBuf {
        self.resolve(&self.predeploy.env_file)
    }

    pub fn predeploy_solidity_file(&self) -> PathBuf {
        self.resolve(&self.predeploy.solidity_file)
    }

    /// The verifier source with any file path resolved
    pub fn kms_verifier(&self) -> KmsVerifier {
        match &self.contracts.kms_verifier {
            KmsVerifier::EnvFile { env_file, key } => KmsVerifier::EnvFile {
                env_file: self.resolve(env_file),
                key: key.clone(),
            },
            direct => direct.clone(),
        }
    }

    /// Folder relative paths are anchored to: the config file's folder if one was loaded,
    /// otherwise the current working directory.
    pub fn base_dir(&self) -> PathBuf {
        self.config_file
            .as_ref()
            .and_then(|file| file.parent().map(Path::to_path_buf))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default()
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        clean(self.base_dir().join(path))
    }

    /// Check every required field up front so components never read bad values mid-flight
    pub fn validate(&self) -> Result<()> {
        self.rpc()?;
        self.gateway_url()?;

        if self.confirmation_timeout_secs == 0 {
            bail!("confirmation_timeout_secs must be greater than zero");
        }

        for (label, address) in self.contracts.configured() {
            parse_address(label, address)?;
        }

        if self.artifacts.gateway.trim().is_empty() || self.artifacts.token.trim().is_empty() {
            bail!("artifact names must not be empty");
        }

        Ok(())
    }
}
