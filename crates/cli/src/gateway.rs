// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::*;
use clap::Subcommand;
use fhegw_config::AppConfig;
use fhegw_evm::{take_env_secret, Identity};

use crate::helpers::context::KeyArgs;
use crate::{gateway_add_relayer, gateway_deploy, gateway_is_relayer, gateway_launch};

pub const OWNER_KEY_ENV: &str = "FHEGW_OWNER_KEY";
pub const RELAYER_KEY_ENV: &str = "FHEGW_RELAYER_KEY";

#[derive(Subcommand, Debug)]
pub enum GatewayCommands {
    /// Deploy the gateway contract at the address predicted for the owner's nonce
    Deploy {
        /// Nonce the owner account is expected to deploy with
        #[arg(long, default_value_t = 0)]
        nonce: u64,

        /// KMS verifier address. Defaults to `contracts.kms_verifier` from the config
        #[arg(long = "kms-verifier")]
        kms_verifier: Option<String>,

        #[command(flatten)]
        keys: KeyArgs,
    },

    /// Authorize a relayer on a deployed gateway. Must be signed by the gateway owner.
    AddRelayer {
        /// Relayer address. When absent it is derived from `FHEGW_RELAYER_KEY`
        #[arg(long)]
        relayer: Option<String>,

        /// Gateway address. Falls back to the config then the predeploy artifact
        #[arg(long)]
        gateway: Option<String>,

        #[command(flatten)]
        keys: KeyArgs,
    },

    /// Deploy the gateway and then authorize the relayer on the persisted address
    Launch {
        #[arg(long, default_value_t = 0)]
        nonce: u64,

        #[arg(long = "kms-verifier")]
        kms_verifier: Option<String>,

        #[arg(long)]
        relayer: Option<String>,

        #[command(flatten)]
        keys: KeyArgs,
    },

    /// Check whether an account is an authorized relayer
    IsRelayer {
        /// Account to check
        #[arg(long)]
        account: String,

        #[arg(long)]
        gateway: Option<String>,
    },
}

impl GatewayCommands {
    /// Move signing keys out of the environment. Must run before the runtime starts.
    pub fn preload_keys(&mut self) -> Result<()> {
        match self {
            GatewayCommands::Deploy { keys, .. } => keys.preload(OWNER_KEY_ENV),
            GatewayCommands::AddRelayer { relayer, keys, .. }
            | GatewayCommands::Launch { relayer, keys, .. } => {
                keys.preload(OWNER_KEY_ENV);
                preload_relayer(relayer)?;
            }
            GatewayCommands::IsRelayer { .. } => {}
        }
        Ok(())
    }
}

/// Only the relayer's address is used, its key is dropped once derived
fn preload_relayer(relayer: &mut Option<String>) -> Result<()> {
    if relayer.is_some() {
        return Ok(());
    }
    if let Some(secret) = take_env_secret(RELAYER_KEY_ENV) {
        let address = Identity::from_secret(secret)?.address();
        *relayer = Some(address.to_checksum(None));
    }
    Ok(())
}

pub async fn execute(command: GatewayCommands, config: &AppConfig) -> Result<()> {
    match command {
        GatewayCommands::Deploy {
            nonce,
            kms_verifier,
            keys,
        } => gateway_deploy::execute(config, nonce, kms_verifier.as_deref(), &keys).await?,
        GatewayCommands::AddRelayer {
            relayer,
            gateway,
            keys,
        } => {
            gateway_add_relayer::execute(config, relayer.as_deref(), gateway.as_deref(), &keys)
                .await?
        }
        GatewayCommands::Launch {
            nonce,
            kms_verifier,
            relayer,
            keys,
        } => {
            gateway_launch::execute(
                config,
                nonce,
                kms_verifier.as_deref(),
                relayer.as_deref(),
                &keys,
            )
            .await?
        }
        GatewayCommands::IsRelayer { account, gateway } => {
            gateway_is_relayer::execute(config, &account, gateway.as_deref()).await?
        }
    };

    Ok(())
}
