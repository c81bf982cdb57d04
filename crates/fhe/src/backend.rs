// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::handle::InputBinding;
use crate::Result;
use alloy_primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Ciphertexts and their handles awaiting a coprocessor attestation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputAttestationRequest {
    pub contract_address: Address,
    pub user_address: Address,
    pub chain_id: u64,
    pub ciphertexts: Vec<Bytes>,
    pub handles: Vec<B256>,
}

impl InputAttestationRequest {
    pub fn binding(&self) -> InputBinding {
        InputBinding::new(self.contract_address, self.user_address, self.chain_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputAttestation {
    /// 65 byte signatures over the attestation digest
    pub signatures: Vec<Bytes>,
}

/// A balance holder's signed request to have a ciphertext re-encrypted to their one-shot key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReencryptRequest {
    pub handle: U256,
    /// Serialized ephemeral public key
    pub public_key: Bytes,
    /// EIP-712 signature over `Reencrypt { publicKey }`
    pub signature: Bytes,
    pub contract_address: Address,
    pub user_address: Address,
    pub chain_id: u64,
}

/// The confidential computation service a gateway client talks to.
#[async_trait]
pub trait ConfidentialBackend: Send + Sync {
    /// Serialized BFV public key inputs are encrypted under
    async fn network_public_key(&self) -> Result<Bytes>;

    /// Verify freshly encrypted inputs and sign off on their handles
    async fn attest_inputs(&self, request: &InputAttestationRequest) -> Result<InputAttestation>;

    /// Re-encrypt the value behind `request.handle` under `request.public_key`.
    /// Returns the serialized ciphertext.
    async fn reencrypt(&self, request: &ReencryptRequest) -> Result<Bytes>;
}
