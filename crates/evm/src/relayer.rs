// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::artifacts::ContractArtifact;
use crate::confirm::{classify_send_error, confirm_success};
use crate::gateway_sol::{GatewayContract, GATEWAY_RELAYER_FUNCTIONS};
use crate::provider::EthProvider;
use crate::{GatewayError, Result};
use alloy::{
    network::ReceiptResponse,
    primitives::{Address, TxHash},
    providers::{Provider, WalletProvider},
};
use std::time::Duration;
use tracing::{info, instrument};

/// A mined relayer grant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayerAuthorization {
    pub gateway: Address,
    pub relayer: Address,
    pub owner: Address,
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

pub struct RelayerAuthorizer<P> {
    provider: EthProvider<P>,
    confirmation_timeout: Duration,
}

impl<P: Provider + Clone> RelayerAuthorizer<P> {
    /// The artifact must expose the relayer entry points
    pub fn new(
        provider: EthProvider<P>,
        artifact: &ContractArtifact,
        confirmation_timeout: Duration,
    ) -> Result<Self> {
        artifact.require_functions(GATEWAY_RELAYER_FUNCTIONS)?;
        Ok(Self {
            provider,
            confirmation_timeout,
        })
    }

    pub async fn is_relayer(&self, gateway: Address, account: Address) -> Result<bool> {
        self.ensure_contract(gateway).await?;
        GatewayContract::new(gateway, self.provider.provider())
            .isRelayer(account)
            .call()
            .await
            .map_err(GatewayError::provider)
    }

    async fn ensure_contract(&self, gateway: Address) -> Result<()> {
        if !self.provider.has_code(gateway).await? {
            return Err(GatewayError::NotAContract(gateway));
        }
        Ok(())
    }
}

impl<P: Provider + WalletProvider + Clone> RelayerAuthorizer<P> {
    /// Register `relayer` on the gateway. Only the gateway owner succeeds; anything
    /// else surfaces as `CallReverted` or `TransactionReverted`.
    #[instrument(skip_all, fields(gateway = %gateway, relayer = %relayer))]
    pub async fn add_relayer(
        &self,
        gateway: Address,
        relayer: Address,
    ) -> Result<RelayerAuthorization> {
        // nothing is sent to an address without code
        self.ensure_contract(gateway).await?;

        let pending = GatewayContract::new(gateway, self.provider.provider())
            .addRelayer(relayer)
            .send()
            .await
            .map_err(classify_send_error)?;
        let receipt = confirm_success(pending, self.confirmation_timeout).await?;

        let authorization = RelayerAuthorization {
            gateway,
            relayer,
            owner: self.provider.signer_address(),
            tx_hash: ReceiptResponse::transaction_hash(&receipt),
            block_number: receipt.block_number,
        };
        info!(tx = %authorization.tx_hash, "relayer authorized");
        Ok(authorization)
    }
}
