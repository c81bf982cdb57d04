// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::context::{gateway_address, gateway_artifact, provider_config};
use anyhow::Result;
use fhegw_config::AppConfig;
use fhegw_evm::{parse_address, RelayerAuthorizer};

pub async fn execute(config: &AppConfig, account: &str, gateway: Option<&str>) -> Result<()> {
    let gateway = gateway_address(config, gateway)?;
    let account = parse_address(account)?;
    let provider = provider_config(config)?.create_readonly_provider().await?;
    let authorizer =
        RelayerAuthorizer::new(provider, &gateway_artifact(config)?, config.confirmation_timeout())?;

    println!("{}", authorizer.is_relayer(gateway, account).await?);
    Ok(())
}
