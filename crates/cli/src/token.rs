// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::providers::{Provider, WalletProvider};
use anyhow::*;
use clap::Subcommand;
use fhegw_config::AppConfig;
use fhegw_evm::{ConfidentialTokenClient, Identity};

use crate::helpers::context::{backend, provider_config, token_address, token_artifact, KeyArgs};
use crate::{
    token_approve, token_balance, token_decrypt, token_details, token_mint, token_transfer,
};

pub const USER_KEY_ENV: &str = "FHEGW_USER_KEY";

#[derive(Subcommand, Debug)]
pub enum TokenCommands {
    /// Mint tokens to the signing account
    Mint {
        amount: u64,

        /// Token address. Defaults to `contracts.token` from the config
        #[arg(long)]
        token: Option<String>,

        #[command(flatten)]
        keys: KeyArgs,
    },

    /// Transfer an encrypted amount
    Transfer {
        /// Recipient address
        #[arg(long)]
        to: String,

        amount: u64,

        #[arg(long)]
        token: Option<String>,

        #[command(flatten)]
        keys: KeyArgs,
    },

    /// Approve a spender for an encrypted amount
    Approve {
        #[arg(long)]
        spender: String,

        amount: u64,

        #[arg(long)]
        token: Option<String>,

        #[command(flatten)]
        keys: KeyArgs,
    },

    /// Recover the signing account's balance through re-encryption
    Balance {
        #[arg(long)]
        token: Option<String>,

        #[command(flatten)]
        keys: KeyArgs,
    },

    /// Print the token's public details
    Details {
        #[arg(long)]
        token: Option<String>,
    },

    /// Request the gateway decryption of the signing account's balance and print the result
    Decrypt {
        #[arg(long)]
        token: Option<String>,

        /// Seconds to wait for the gateway callback before reading the result
        #[arg(long = "settle-secs", default_value_t = 10)]
        settle_secs: u64,

        #[command(flatten)]
        keys: KeyArgs,
    },
}

impl TokenCommands {
    /// Move the user key out of the environment. Must run before the runtime starts.
    pub fn preload_keys(&mut self) {
        match self {
            TokenCommands::Mint { keys, .. }
            | TokenCommands::Transfer { keys, .. }
            | TokenCommands::Approve { keys, .. }
            | TokenCommands::Balance { keys, .. }
            | TokenCommands::Decrypt { keys, .. } => keys.preload(USER_KEY_ENV),
            TokenCommands::Details { .. } => {}
        }
    }
}

pub async fn execute(command: TokenCommands, config: &AppConfig) -> Result<()> {
    match command {
        TokenCommands::Mint {
            amount,
            token,
            keys,
        } => token_mint::execute(config, token.as_deref(), amount, &keys).await?,
        TokenCommands::Transfer {
            to,
            amount,
            token,
            keys,
        } => token_transfer::execute(config, token.as_deref(), &to, amount, &keys).await?,
        TokenCommands::Approve {
            spender,
            amount,
            token,
            keys,
        } => token_approve::execute(config, token.as_deref(), &spender, amount, &keys).await?,
        TokenCommands::Balance { token, keys } => {
            token_balance::execute(config, token.as_deref(), &keys).await?
        }
        TokenCommands::Details { token } => {
            token_details::execute(config, token.as_deref()).await?
        }
        TokenCommands::Decrypt {
            token,
            settle_secs,
            keys,
        } => token_decrypt::execute(config, token.as_deref(), settle_secs, &keys).await?,
    };

    Ok(())
}

/// A token client that signs with `identity`
pub async fn signer_client(
    config: &AppConfig,
    token: Option<&str>,
    identity: &Identity,
) -> Result<ConfidentialTokenClient<impl Provider + WalletProvider + Clone>> {
    let address = token_address(config, token)?;
    let provider = provider_config(config)?
        .create_signer_provider(identity)
        .await?;
    Ok(ConfidentialTokenClient::new(
        provider,
        address,
        &token_artifact(config)?,
        backend(config)?,
        config.confirmation_timeout(),
    )?)
}

pub fn print_tx(tx: &fhegw_evm::TokenTx) {
    match tx.block_number {
        Some(block) => println!("{} (block {})", tx.tx_hash, block),
        None => println!("{}", tx.tx_hash),
    }
}
