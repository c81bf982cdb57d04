// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Encrypted inputs for contract calls.
//!
//! Each value is encrypted under the network key and referenced by a handle. The
//! handles travel together with an input proof the contract checks against the
//! coprocessor signers:
//!
//! `num handles (1) | num signers (1) | handles (32 each) | signatures (65 each)`

use crate::backend::{ConfidentialBackend, InputAttestationRequest};
use crate::handle::{compute_handle, FheType, InputBinding};
use crate::keys::BfvPublicKey;
use crate::{FheError, Result};
use alloy_primitives::{keccak256, Address, Bytes, B256};
use tracing::debug;

pub const SIGNATURE_LEN: usize = 65;
pub const MAX_INPUTS: usize = u8::MAX as usize;

/// What the coprocessor signs for a batch of handles
pub fn attestation_digest(handles: &[B256], binding: &InputBinding) -> B256 {
    let mut preimage = Vec::with_capacity(handles.len() * 32 + 72);
    for handle in handles {
        preimage.extend_from_slice(handle.as_slice());
    }
    preimage.extend_from_slice(&binding.packed());
    keccak256(preimage)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputProof {
    pub handles: Vec<B256>,
    pub signatures: Vec<Bytes>,
}

impl InputProof {
    pub fn encode(&self) -> Result<Bytes> {
        if self.handles.len() > MAX_INPUTS {
            return Err(FheError::TooManyInputs(self.handles.len()));
        }
        if self.signatures.len() > u8::MAX as usize {
            return Err(FheError::MalformedProof(format!(
                "{} signatures do not fit the proof header",
                self.signatures.len()
            )));
        }

        let mut out = Vec::with_capacity(
            2 + self.handles.len() * 32 + self.signatures.len() * SIGNATURE_LEN,
        );
        out.push(self.handles.len() as u8);
        out.push(self.signatures.len() as u8);
        for handle in &self.handles {
            out.extend_from_slice(handle.as_slice());
        }
        for signature in &self.signatures {
            if signature.len() != SIGNATURE_LEN {
                return Err(FheError::MalformedProof(format!(
                    "signature is {} bytes, expected {SIGNATURE_LEN}",
                    signature.len()
                )));
            }
            out.extend_from_slice(signature);
        }
        Ok(Bytes::from(out))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let [num_handles, num_signers, body @ ..] = bytes else {
            return Err(FheError::MalformedProof("missing header".to_string()));
        };
        let num_handles = *num_handles as usize;
        let num_signers = *num_signers as usize;

        let expected = num_handles * 32 + num_signers * SIGNATURE_LEN;
        if body.len() != expected {
            return Err(FheError::MalformedProof(format!(
                "body is {} bytes, expected {expected}",
                body.len()
            )));
        }

        let (handle_bytes, signature_bytes) = body.split_at(num_handles * 32);
        let handles = handle_bytes.chunks_exact(32).map(B256::from_slice).collect();
        let signatures = signature_bytes
            .chunks_exact(SIGNATURE_LEN)
            .map(Bytes::copy_from_slice)
            .collect();

        Ok(Self {
            handles,
            signatures,
        })
    }
}

/// Handles plus the proof to pass alongside them in a contract call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedInputs {
    pub handles: Vec<B256>,
    pub input_proof: Bytes,
}

/// Collects plaintext values bound to one contract and caller
#[derive(Debug, Clone)]
pub struct EncryptedInputBuilder {
    binding: InputBinding,
    values: Vec<u64>,
}

impl EncryptedInputBuilder {
    pub fn new(contract: Address, user: Address, chain_id: u64) -> Self {
        Self {
            binding: InputBinding::new(contract, user, chain_id),
            values: vec![],
        }
    }

    pub fn add64(mut self, value: u64) -> Self {
        self.values.push(value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Encrypt every value under the network key and collect an attestation for the batch
    pub async fn encrypt<B: ConfidentialBackend + ?Sized>(
        self,
        backend: &B,
    ) -> Result<EncryptedInputs> {
        if self.values.is_empty() {
            return Err(FheError::EmptyInput);
        }
        if self.values.len() > MAX_INPUTS {
            return Err(FheError::TooManyInputs(self.values.len()));
        }

        let network_key = BfvPublicKey::from_bytes(&backend.network_public_key().await?)?;

        let mut ciphertexts = Vec::with_capacity(self.values.len());
        let mut handles = Vec::with_capacity(self.values.len());
        for (index, value) in self.values.iter().enumerate() {
            let ct = network_key.encrypt_u64(*value)?;
            handles.push(compute_handle(
                &ct,
                index as u8,
                &self.binding,
                FheType::Uint64,
            ));
            ciphertexts.push(Bytes::from(ct));
        }

        let request = InputAttestationRequest {
            contract_address: self.binding.contract,
            user_address: self.binding.user,
            chain_id: self.binding.chain_id,
            ciphertexts,
            handles: handles.clone(),
        };
        let attestation = backend.attest_inputs(&request).await?;
        debug!(
            handles = handles.len(),
            signers = attestation.signatures.len(),
            "encrypted input attested"
        );

        let input_proof = InputProof {
            handles: handles.clone(),
            signatures: attestation.signatures,
        }
        .encode()?;

        Ok(EncryptedInputs {
            handles,
            input_proof,
        })
    }
}
