// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Turns the loaded config into the components commands are built from.

use crate::helpers::ensure_hex_zeroizing;
use alloy::primitives::Address;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use fhegw_config::{AppConfig, KmsVerifier};
use fhegw_evm::{
    parse_address, read_env_value, read_predeployed_address, take_env_secret, ContractArtifact,
    Identity, PredeployArtifacts, ProviderConfig,
};
use fhegw_fhe::{ConfidentialBackend, HttpGateway};
use std::sync::Arc;
use tracing::debug;
use zeroize::Zeroizing;

/// Where a command finds the key it signs with
#[derive(Args, Debug, Clone, Default)]
pub struct KeyArgs {
    /// Environment variable holding the signing key. It is removed from the
    /// environment once read.
    #[arg(long = "key-env")]
    pub key_env: Option<String>,

    /// The signing key itself, 0x prefixed hex
    #[arg(long = "private-key", value_parser = ensure_hex_zeroizing, conflicts_with = "key_env")]
    pub private_key: Option<Zeroizing<String>>,
}

impl KeyArgs {
    /// Move the key out of the environment into these args. Must run before the
    /// runtime starts.
    pub fn preload(&mut self, default_env: &str) {
        if self.private_key.is_some() {
            return;
        }
        let var = self.key_env.as_deref().unwrap_or(default_env);
        self.private_key = take_env_secret(var);
    }

    pub fn identity(&self, default_env: &str) -> Result<Identity> {
        if let Some(secret) = &self.private_key {
            return Ok(Identity::from_secret(secret.clone())?);
        }
        let var = self.key_env.as_deref().unwrap_or(default_env);
        Ok(Identity::from_env(var)?)
    }
}

pub fn provider_config(config: &AppConfig) -> Result<ProviderConfig> {
    Ok(ProviderConfig::new(config.rpc()?, config.rpc_auth().clone()))
}

pub fn backend(config: &AppConfig) -> Result<Arc<dyn ConfidentialBackend>> {
    Ok(Arc::new(HttpGateway::new(config.gateway_url()?)))
}

pub fn gateway_artifact(config: &AppConfig) -> Result<ContractArtifact> {
    Ok(ContractArtifact::load(
        &config.artifacts_dir(),
        &config.artifacts.gateway,
    )?)
}

pub fn token_artifact(config: &AppConfig) -> Result<ContractArtifact> {
    Ok(ContractArtifact::load(
        &config.artifacts_dir(),
        &config.artifacts.token,
    )?)
}

pub fn predeploy(config: &AppConfig) -> PredeployArtifacts {
    PredeployArtifacts::new(
        config.predeploy_env_file(),
        config.predeploy_solidity_file(),
    )
}

/// An explicit address wins, then the configured one, then the predeploy env artifact
pub fn gateway_address(config: &AppConfig, explicit: Option<&str>) -> Result<Address> {
    if let Some(address) = explicit.or(config.contracts.gateway.as_deref()) {
        return Ok(parse_address(address)?);
    }
    let env_file = config.predeploy_env_file();
    debug!(path = %env_file.display(), "reading gateway address from predeploy artifact");
    read_predeployed_address(&env_file).with_context(|| {
        format!(
            "No gateway address configured and none readable from {}",
            env_file.display()
        )
    })
}

pub fn token_address(config: &AppConfig, explicit: Option<&str>) -> Result<Address> {
    let address = explicit
        .or(config.contracts.token.as_deref())
        .ok_or_else(|| anyhow!("No token address given. Pass --token or set contracts.token"))?;
    Ok(parse_address(address)?)
}

/// Resolve the KMS verifier passed to the gateway constructor
pub fn kms_verifier_address(config: &AppConfig, explicit: Option<&str>) -> Result<Address> {
    if let Some(address) = explicit {
        return Ok(parse_address(address)?);
    }
    match config.kms_verifier() {
        KmsVerifier::Address(address) => Ok(parse_address(&address)?),
        KmsVerifier::EnvFile { env_file, key } => {
            let value = read_env_value(&env_file, &key)?.ok_or_else(|| {
                anyhow!("{key} is not present in {}", env_file.display())
            })?;
            Ok(parse_address(&value)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::path::PathBuf;

    const GATEWAY: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
    const KMS: &str = "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0";

    fn config_in(dir: &std::path::Path) -> AppConfig {
        AppConfig {
            config_file: Some(dir.join("fhegw.config.yaml")),
            ..Default::default()
        }
    }

    #[test]
    fn test_gateway_address_precedence() {
        Jail::expect_with(|jail| {
            let mut config = config_in(jail.directory());
            jail.create_dir("node_modules/fhevm/gateway/lib")?;
            jail.create_file(
                "node_modules/fhevm/gateway/lib/.env.gateway",
                "GATEWAY_CONTRACT_PREDEPLOY_ADDRESS=0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512\n",
            )?;

            let from_file = gateway_address(&config, None).map_err(|e| e.to_string())?;
            assert_eq!(
                from_file,
                parse_address("0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512")
                    .map_err(|e| e.to_string())?
            );

            config.contracts.gateway = Some(GATEWAY.to_string());
            let configured = gateway_address(&config, None).map_err(|e| e.to_string())?;
            assert_eq!(configured, parse_address(GATEWAY).map_err(|e| e.to_string())?);

            let explicit = gateway_address(&config, Some(KMS)).map_err(|e| e.to_string())?;
            assert_eq!(explicit, parse_address(KMS).map_err(|e| e.to_string())?);
            Ok(())
        });
    }

    #[test]
    fn test_gateway_address_missing_everywhere() {
        Jail::expect_with(|jail| {
            let config = config_in(jail.directory());
            assert!(gateway_address(&config, None).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_kms_verifier_from_env_file() {
        Jail::expect_with(|jail| {
            let mut config = config_in(jail.directory());
            jail.create_dir("kms")?;
            jail.create_file(
                "kms/.env.kmsverifier",
                &format!("KMS_VERIFIER_CONTRACT_ADDRESS={KMS}\n"),
            )?;
            config.contracts.kms_verifier = KmsVerifier::EnvFile {
                env_file: PathBuf::from("kms/.env.kmsverifier"),
                key: "KMS_VERIFIER_CONTRACT_ADDRESS".to_string(),
            };
            let address = kms_verifier_address(&config, None).map_err(|e| e.to_string())?;
            assert_eq!(address, parse_address(KMS).map_err(|e| e.to_string())?);

            config.contracts.kms_verifier = KmsVerifier::EnvFile {
                env_file: PathBuf::from("kms/.env.kmsverifier"),
                key: "OTHER_KEY".to_string(),
            };
            assert!(kms_verifier_address(&config, None).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_token_address_required() {
        let config = AppConfig::default();
        assert!(token_address(&config, None).is_err());
        assert!(token_address(&config, Some(GATEWAY)).is_ok());
    }

    #[test]
    fn test_identity_from_env_var() {
        Jail::expect_with(|jail| {
            jail.set_env(
                "TEST_SIGNER_KEY",
                "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            );
            let keys = KeyArgs {
                key_env: Some("TEST_SIGNER_KEY".to_string()),
                private_key: None,
            };
            let identity = keys.identity("UNUSED").map_err(|e| e.to_string())?;
            assert_eq!(
                identity.address(),
                parse_address("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
                    .map_err(|e| e.to_string())?
            );
            assert!(std::env::var("TEST_SIGNER_KEY").is_err());
            Ok(())
        });
    }

    #[test]
    fn test_preload_moves_key_out_of_env() {
        Jail::expect_with(|jail| {
            let key = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
            jail.set_env("FHEGW_USER_KEY", key);
            let mut keys = KeyArgs::default();
            keys.preload("FHEGW_USER_KEY");

            assert!(std::env::var("FHEGW_USER_KEY").is_err());
            let identity = keys.identity("FHEGW_USER_KEY").map_err(|e| e.to_string())?;
            assert_eq!(
                identity.address(),
                parse_address("0x70997970C51812dc3A010C7d01b50e0d17dc79C8")
                    .map_err(|e| e.to_string())?
            );

            // an explicit key is left alone and the variable stays untouched
            jail.set_env("FHEGW_USER_KEY", key);
            let mut explicit = KeyArgs {
                key_env: None,
                private_key: Some(Zeroizing::new(
                    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
                        .to_string(),
                )),
            };
            explicit.preload("FHEGW_USER_KEY");
            assert!(std::env::var("FHEGW_USER_KEY").is_ok());
            Ok(())
        });
    }
}
