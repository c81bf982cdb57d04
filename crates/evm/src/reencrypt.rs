// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! User side re-encryption. A one-shot BFV keypair is generated per request, its
//! public key is signed as EIP-712 `Reencrypt { publicKey }` by the balance holder,
//! the backend re-encrypts the handle's value under that key and the result is
//! decrypted locally. The keypair never outlives the call.

use crate::identity::Identity;
use crate::token_sol::EncryptedERC20;
use crate::{GatewayError, Result};
use alloy::{
    primitives::{Address, Bytes, U256},
    providers::Provider,
    signers::Signer,
};
use fhegw_fhe::{reencrypt_signing_hash, ConfidentialBackend, EphemeralKeypair, ReencryptRequest};
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct ReencryptionService {
    backend: Arc<dyn ConfidentialBackend>,
    identity: Identity,
    contract: Address,
    chain_id: u64,
}

impl ReencryptionService {
    pub fn new(
        backend: Arc<dyn ConfidentialBackend>,
        identity: Identity,
        contract: Address,
        chain_id: u64,
    ) -> Self {
        Self {
            backend,
            identity,
            contract,
            chain_id,
        }
    }

    pub fn user(&self) -> Address {
        self.identity.address()
    }

    /// Recover the plaintext behind `handle`
    #[instrument(skip_all, fields(user = %self.identity.address(), contract = %self.contract))]
    pub async fn reencrypt_handle(&self, handle: U256) -> Result<u64> {
        let keypair = EphemeralKeypair::generate().map_err(GatewayError::reencryption)?;
        let public_key = keypair.public_key_bytes();

        let hash = reencrypt_signing_hash(&public_key, self.chain_id, self.contract);
        let signature = self
            .identity
            .signer()
            .sign_hash(&hash)
            .await
            .map_err(GatewayError::reencryption)?;

        let request = ReencryptRequest {
            handle,
            public_key,
            signature: Bytes::from(signature.as_bytes().to_vec()),
            contract_address: self.contract,
            user_address: self.identity.address(),
            chain_id: self.chain_id,
        };

        let ciphertext = self
            .backend
            .reencrypt(&request)
            .await
            .map_err(GatewayError::reencryption)?;
        debug!(bytes = ciphertext.len(), "received re-encrypted value");

        keypair
            .decrypt_u64(&ciphertext)
            .map_err(GatewayError::reencryption)
    }

    /// Read the caller's balance handle from the token and recover its value.
    /// An account that never held tokens has a zero handle and a zero balance.
    pub async fn reencrypt_balance<P: Provider>(&self, provider: &P) -> Result<u64> {
        let handle = EncryptedERC20::new(self.contract, provider)
            .balanceOf(self.identity.address())
            .call()
            .await
            .map_err(GatewayError::reencryption)?;

        if handle.is_zero() {
            debug!("balance was never initialized");
            return Ok(0);
        }
        self.reencrypt_handle(handle).await
    }
}
