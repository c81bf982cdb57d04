// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Token scenarios against a live confidential network. They only run when every
//! `FHEGW_E2E_*` variable is set.

use anyhow::Result;
use fhegw_config::{RpcAuth, RpcUrl};
use fhegw_evm::{
    parse_address, ConfidentialTokenClient, ContractArtifact, Identity, ProviderConfig,
    ReencryptionService, TokenRead, TokenWrite,
};
use fhegw_fhe::{ConfidentialBackend, HttpGateway};
use fhegw_test_helpers::{add_tracing, E2eEnv};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use zeroize::Zeroizing;

const TIMEOUT: Duration = Duration::from_secs(120);

struct Network {
    env: E2eEnv,
    config: ProviderConfig,
    backend: Arc<dyn ConfidentialBackend>,
    artifact: ContractArtifact,
}

impl Network {
    fn connect() -> Result<Option<Self>> {
        let Some(env) = E2eEnv::from_env() else {
            return Ok(None);
        };
        let config = ProviderConfig::new(RpcUrl::from_url(&env.rpc_url)?, RpcAuth::None);
        let backend: Arc<dyn ConfidentialBackend> =
            Arc::new(HttpGateway::new(Url::parse(&env.gateway_url)?));
        let artifact = ContractArtifact::load(Path::new(&env.artifacts_dir), "EncryptedERC20")?;
        Ok(Some(Self {
            env,
            config,
            backend,
            artifact,
        }))
    }

    fn identity(&self, key: &str) -> Result<Identity> {
        Ok(Identity::from_secret(Zeroizing::new(key.to_string()))?)
    }

    async fn balance(&self, user: &Identity) -> Result<u64> {
        let provider = self.config.create_readonly_provider().await?;
        let service = ReencryptionService::new(
            self.backend.clone(),
            user.clone(),
            parse_address(&self.env.token)?,
            provider.chain_id(),
        );
        Ok(service.reencrypt_balance(provider.provider()).await?)
    }
}

#[tokio::test]
async fn mint_then_reencrypt_balance() -> Result<()> {
    let Some(network) = Network::connect()? else {
        println!("skipping: FHEGW_E2E_* not set");
        return Ok(());
    };
    let _guard = add_tracing();
    let alice = network.identity(&network.env.alice_key)?;
    let provider = network.config.create_signer_provider(&alice).await?;
    let token = ConfidentialTokenClient::new(
        provider,
        parse_address(&network.env.token)?,
        &network.artifact,
        network.backend.clone(),
        TIMEOUT,
    )?;

    let before = network.balance(&alice).await?;
    token.mint(1000).await?;
    assert_eq!(network.balance(&alice).await?, before + 1000);
    Ok(())
}

#[tokio::test]
async fn transfer_moves_exact_amount() -> Result<()> {
    let Some(network) = Network::connect()? else {
        println!("skipping: FHEGW_E2E_* not set");
        return Ok(());
    };
    let alice = network.identity(&network.env.alice_key)?;
    let bob = network.identity(&network.env.bob_key)?;
    let provider = network.config.create_signer_provider(&alice).await?;
    let token = ConfidentialTokenClient::new(
        provider,
        parse_address(&network.env.token)?,
        &network.artifact,
        network.backend.clone(),
        TIMEOUT,
    )?;

    if network.balance(&alice).await? < 1337 {
        token.mint(1337).await?;
    }
    let alice_before = network.balance(&alice).await?;
    let bob_before = network.balance(&bob).await?;

    token.transfer(bob.address(), 1337).await?;

    assert_eq!(network.balance(&alice).await?, alice_before - 1337);
    assert_eq!(network.balance(&bob).await?, bob_before + 1337);

    let details = token.details().await?;
    assert!(!details.symbol.is_empty());
    Ok(())
}
