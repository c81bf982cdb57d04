// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::gateway::OWNER_KEY_ENV;
use crate::helpers::context::{predeploy, KeyArgs};
use crate::{gateway_add_relayer, gateway_deploy};
use anyhow::Result;
use fhegw_config::AppConfig;
use serde_json::json;
use tracing::{info, warn};

/// Deploy, then authorize the relayer on the address the deployment persisted
pub async fn execute(
    config: &AppConfig,
    nonce: u64,
    kms_verifier: Option<&str>,
    relayer: Option<&str>,
    keys: &KeyArgs,
) -> Result<()> {
    // resolve the relayer first so a missing key fails before anything is sent
    let relayer = gateway_add_relayer::relayer_address(relayer)?;
    let owner = keys.identity(OWNER_KEY_ENV)?;

    let deployment = gateway_deploy::deploy(config, &owner, nonce, kms_verifier).await?;

    let gateway = match predeploy(config).read_predeployed_address() {
        Ok(address) => address,
        Err(e) => {
            warn!("Could not read the persisted gateway address ({e}), using the deployed address");
            deployment.address
        }
    };
    info!(gateway = %gateway, relayer = %relayer, "authorizing relayer");

    let authorization = gateway_add_relayer::authorize(config, &owner, gateway, relayer).await?;

    let output = json!({
        "deployment": gateway_deploy::summary(&deployment),
        "relayer": gateway_add_relayer::summary(&authorization),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
