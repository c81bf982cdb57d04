// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::artifacts::ContractArtifact;
use crate::confirm::{classify_send_error, confirm_success};
use crate::provider::EthProvider;
use crate::token_sol::{EncryptedERC20, TOKEN_FUNCTIONS};
use crate::{GatewayError, Result};
use alloy::{
    network::{Ethereum, ReceiptResponse},
    primitives::{Address, TxHash, U256},
    providers::{PendingTransactionBuilder, Provider, WalletProvider},
};
use async_trait::async_trait;
use fhegw_fhe::{ConfidentialBackend, EncryptedInputBuilder, EncryptedInputs};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTx {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDetails {
    pub name: String,
    pub symbol: String,
    pub total_supply: u64,
    pub owner: Address,
}

/// Read-only token queries
#[async_trait]
pub trait TokenRead {
    /// Ciphertext handle of `owner`'s encrypted balance
    async fn balance_handle(&self, owner: Address) -> Result<U256>;

    async fn details(&self) -> Result<TokenDetails>;

    /// Plaintext balance the gateway last published for `owner`
    async fn decrypted_balance(&self, owner: Address) -> Result<u64>;
}

#[async_trait]
pub trait TokenWrite {
    async fn mint(&self, amount: u64) -> Result<TokenTx>;

    async fn transfer(&self, to: Address, amount: u64) -> Result<TokenTx>;

    async fn approve(&self, spender: Address, amount: u64) -> Result<TokenTx>;

    /// Ask the gateway to decrypt `owner`'s balance and publish it on the token
    async fn request_decrypted_balance(&self, owner: Address) -> Result<TokenTx>;
}

/// Client for a confidential ERC-20 style token
#[derive(Clone)]
pub struct ConfidentialTokenClient<P> {
    provider: EthProvider<P>,
    address: Address,
    backend: Arc<dyn ConfidentialBackend>,
    confirmation_timeout: Duration,
}

impl<P: Provider + Clone> ConfidentialTokenClient<P> {
    pub fn new(
        provider: EthProvider<P>,
        address: Address,
        artifact: &ContractArtifact,
        backend: Arc<dyn ConfidentialBackend>,
        confirmation_timeout: Duration,
    ) -> Result<Self> {
        artifact.require_functions(TOKEN_FUNCTIONS)?;
        Ok(Self {
            provider,
            address,
            backend,
            confirmation_timeout,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn chain_id(&self) -> u64 {
        self.provider.chain_id()
    }

    fn contract(&self) -> EncryptedERC20::EncryptedERC20Instance<&P> {
        EncryptedERC20::new(self.address, self.provider.provider())
    }

    async fn confirm(&self, pending: PendingTransactionBuilder<Ethereum>) -> Result<TokenTx> {
        let receipt = confirm_success(pending, self.confirmation_timeout).await?;
        Ok(TokenTx {
            tx_hash: ReceiptResponse::transaction_hash(&receipt),
            block_number: receipt.block_number,
        })
    }
}

impl<P: Provider + WalletProvider + Clone> ConfidentialTokenClient<P> {
    /// A fresh encrypted amount bound to this token and the signing account
    async fn encrypt_amount(&self, amount: u64) -> Result<EncryptedInputs> {
        EncryptedInputBuilder::new(
            self.address,
            self.provider.signer_address(),
            self.provider.chain_id(),
        )
        .add64(amount)
        .encrypt(self.backend.as_ref())
        .await
        .map_err(GatewayError::token)
    }

    /// Request the gateway decryption and read the published value once it settled
    pub async fn decrypt_balance_via_gateway(
        &self,
        owner: Address,
        settle: Duration,
    ) -> Result<u64> {
        let request = self.request_decrypted_balance(owner).await?;
        debug!(tx = %request.tx_hash, ?settle, "waiting for the gateway callback");
        tokio::time::sleep(settle).await;
        self.decrypted_balance(owner).await
    }
}

#[async_trait]
impl<P> TokenRead for ConfidentialTokenClient<P>
where
    P: Provider + Clone + Send + Sync,
{
    async fn balance_handle(&self, owner: Address) -> Result<U256> {
        self.contract()
            .balanceOf(owner)
            .call()
            .await
            .map_err(GatewayError::token)
    }

    async fn details(&self) -> Result<TokenDetails> {
        let contract = self.contract();
        Ok(TokenDetails {
            name: contract.name().call().await.map_err(GatewayError::token)?,
            symbol: contract.symbol().call().await.map_err(GatewayError::token)?,
            total_supply: contract
                .totalSupply()
                .call()
                .await
                .map_err(GatewayError::token)?,
            owner: contract.getOwner().call().await.map_err(GatewayError::token)?,
        })
    }

    async fn decrypted_balance(&self, owner: Address) -> Result<u64> {
        self.contract()
            .decryptedBalanceOf(owner)
            .call()
            .await
            .map_err(GatewayError::token)
    }
}

#[async_trait]
impl<P> TokenWrite for ConfidentialTokenClient<P>
where
    P: Provider + WalletProvider + Clone + Send + Sync,
{
    #[instrument(skip_all, fields(token = %self.address, amount = amount))]
    async fn mint(&self, amount: u64) -> Result<TokenTx> {
        let pending = self
            .contract()
            .mint(amount)
            .send()
            .await
            .map_err(classify_send_error)?;
        let tx = self.confirm(pending).await?;
        info!(tx = %tx.tx_hash, "minted");
        Ok(tx)
    }

    #[instrument(skip_all, fields(token = %self.address, to = %to))]
    async fn transfer(&self, to: Address, amount: u64) -> Result<TokenTx> {
        let inputs = self.encrypt_amount(amount).await?;
        let pending = self
            .contract()
            .transfer(to, inputs.handles[0], inputs.input_proof)
            .send()
            .await
            .map_err(classify_send_error)?;
        let tx = self.confirm(pending).await?;
        info!(tx = %tx.tx_hash, "transferred");
        Ok(tx)
    }

    #[instrument(skip_all, fields(token = %self.address, spender = %spender))]
    async fn approve(&self, spender: Address, amount: u64) -> Result<TokenTx> {
        let inputs = self.encrypt_amount(amount).await?;
        let pending = self
            .contract()
            .approve(spender, inputs.handles[0], inputs.input_proof)
            .send()
            .await
            .map_err(classify_send_error)?;
        let tx = self.confirm(pending).await?;
        info!(tx = %tx.tx_hash, "approved");
        Ok(tx)
    }

    async fn request_decrypted_balance(&self, owner: Address) -> Result<TokenTx> {
        let pending = self
            .contract()
            .requestDecryptedBalanceOf(owner)
            .send()
            .await
            .map_err(classify_send_error)?;
        self.confirm(pending).await
    }
}
