// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::gateway::OWNER_KEY_ENV;
use crate::helpers::context::{
    gateway_artifact, kms_verifier_address, predeploy, provider_config, KeyArgs,
};
use anyhow::Result;
use fhegw_config::AppConfig;
use fhegw_evm::{DeploymentCoordinator, GatewayConstructorArgs, GatewayDeployment, Identity};
use serde_json::json;

pub async fn deploy(
    config: &AppConfig,
    owner: &Identity,
    nonce: u64,
    kms_verifier: Option<&str>,
) -> Result<GatewayDeployment> {
    let kms_verifier = kms_verifier_address(config, kms_verifier)?;
    let provider = provider_config(config)?
        .create_signer_provider(owner)
        .await?;
    let coordinator = DeploymentCoordinator::new(
        provider,
        gateway_artifact(config)?,
        predeploy(config),
        config.confirmation_timeout(),
    )?;

    let deployment = coordinator
        .deploy_gateway(
            GatewayConstructorArgs {
                owner: owner.address(),
                kms_verifier,
            },
            nonce,
        )
        .await?;
    Ok(deployment)
}

pub async fn execute(
    config: &AppConfig,
    nonce: u64,
    kms_verifier: Option<&str>,
    keys: &KeyArgs,
) -> Result<()> {
    let owner = keys.identity(OWNER_KEY_ENV)?;
    let deployment = deploy(config, &owner, nonce, kms_verifier).await?;
    println!("{}", serde_json::to_string_pretty(&summary(&deployment))?);
    Ok(())
}

pub fn summary(deployment: &GatewayDeployment) -> serde_json::Value {
    json!({
        "gateway": deployment.address.to_checksum(None),
        "deployer": deployment.predicted.deployer.to_checksum(None),
        "nonce": deployment.predicted.nonce,
        "tx_hash": deployment.tx_hash.to_string(),
        "block_number": deployment.block_number,
        "persisted": deployment
            .persisted
            .written
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>(),
        "not_persisted": deployment
            .persisted
            .failed
            .iter()
            .map(|err| err.to_string())
            .collect::<Vec<_>>(),
    })
}
