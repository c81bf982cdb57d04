// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::context::{backend, provider_config, token_address, token_artifact};
use anyhow::Result;
use fhegw_config::AppConfig;
use fhegw_evm::{ConfidentialTokenClient, TokenRead};
use serde_json::json;

pub async fn execute(config: &AppConfig, token: Option<&str>) -> Result<()> {
    let address = token_address(config, token)?;
    let provider = provider_config(config)?.create_readonly_provider().await?;
    let client = ConfidentialTokenClient::new(
        provider,
        address,
        &token_artifact(config)?,
        backend(config)?,
        config.confirmation_timeout(),
    )?;

    let details = client.details().await?;
    let output = json!({
        "token": address.to_checksum(None),
        "name": details.name,
        "symbol": details.symbol,
        "total_supply": details.total_supply,
        "owner": details.owner.to_checksum(None),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
