// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::gateway::{OWNER_KEY_ENV, RELAYER_KEY_ENV};
use crate::helpers::context::{gateway_address, gateway_artifact, provider_config, KeyArgs};
use alloy::primitives::Address;
use anyhow::Result;
use fhegw_config::AppConfig;
use fhegw_evm::{parse_address, Identity, RelayerAuthorization, RelayerAuthorizer};
use serde_json::json;

/// An explicit relayer address, otherwise the account behind the relayer key
pub fn relayer_address(relayer: Option<&str>) -> Result<Address> {
    match relayer {
        Some(address) => Ok(parse_address(address)?),
        None => Ok(Identity::from_env(RELAYER_KEY_ENV)?.address()),
    }
}

pub async fn authorize(
    config: &AppConfig,
    owner: &Identity,
    gateway: Address,
    relayer: Address,
) -> Result<RelayerAuthorization> {
    let provider = provider_config(config)?
        .create_signer_provider(owner)
        .await?;
    let authorizer =
        RelayerAuthorizer::new(provider, &gateway_artifact(config)?, config.confirmation_timeout())?;
    Ok(authorizer.add_relayer(gateway, relayer).await?)
}

pub async fn execute(
    config: &AppConfig,
    relayer: Option<&str>,
    gateway: Option<&str>,
    keys: &KeyArgs,
) -> Result<()> {
    let gateway = gateway_address(config, gateway)?;
    let relayer = relayer_address(relayer)?;
    let owner = keys.identity(OWNER_KEY_ENV)?;

    let authorization = authorize(config, &owner, gateway, relayer).await?;
    println!("{}", serde_json::to_string_pretty(&summary(&authorization))?);
    Ok(())
}

pub fn summary(authorization: &RelayerAuthorization) -> serde_json::Value {
    json!({
        "gateway": authorization.gateway.to_checksum(None),
        "relayer": authorization.relayer.to_checksum(None),
        "owner": authorization.owner.to_checksum(None),
        "tx_hash": authorization.tx_hash.to_string(),
        "block_number": authorization.block_number,
    })
}
