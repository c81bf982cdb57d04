// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::{
    primitives::{Address, Bytes, Signature, B256, U256},
    signers::{local::PrivateKeySigner, SignerSync},
};
use async_trait::async_trait;
use fhegw_fhe::{
    attestation_digest, compute_handle, reencrypt_signing_hash, BfvKeypair, BfvPublicKey,
    ConfidentialBackend, FheError, FheType, InputAttestation, InputAttestationRequest,
    InputBinding, InputProof, ReencryptRequest, Result,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StoredValue {
    value: u64,
    owner: Address,
    contract: Address,
}

/// In-process stand-in for the coprocessor and gateway.
///
/// Holds the network key, attests inputs with its own signer and answers
/// re-encryption requests for values it knows about. Values reach it either as
/// attested inputs or through [`LocalBackend::set_value`].
pub struct LocalBackend {
    network: BfvKeypair,
    coprocessor: PrivateKeySigner,
    values: Mutex<HashMap<U256, StoredValue>>,
    next_handle: Mutex<u64>,
    attested: Mutex<Vec<InputBinding>>,
    reencryptions: AtomicUsize,
}

impl LocalBackend {
    pub fn new() -> Result<Self> {
        Ok(Self {
            network: BfvKeypair::generate()?,
            coprocessor: PrivateKeySigner::random(),
            values: Mutex::new(HashMap::new()),
            next_handle: Mutex::new(1),
            attested: Mutex::new(vec![]),
            reencryptions: AtomicUsize::new(0),
        })
    }

    pub fn coprocessor_address(&self) -> Address {
        self.coprocessor.address()
    }

    /// Record `value` as `owner`'s plaintext on `contract`, returning its handle
    pub fn set_value(&self, contract: Address, owner: Address, value: u64) -> U256 {
        let mut next = self.next_handle.lock().unwrap();
        let handle = U256::from(*next);
        *next += 1;
        self.values.lock().unwrap().insert(
            handle,
            StoredValue {
                value,
                owner,
                contract,
            },
        );
        handle
    }

    /// Plaintext behind a handle, if known
    pub fn value_of(&self, handle: U256) -> Option<u64> {
        self.values.lock().unwrap().get(&handle).map(|v| v.value)
    }

    /// Bindings of every input attestation request received, oldest first
    pub fn attested_bindings(&self) -> Vec<InputBinding> {
        self.attested.lock().unwrap().clone()
    }

    /// Number of re-encryption requests received
    pub fn reencryption_count(&self) -> usize {
        self.reencryptions.load(Ordering::SeqCst)
    }

    /// Check an input proof the way a consuming contract would
    pub fn verify_input_proof(&self, proof: &[u8], binding: &InputBinding) -> Result<Vec<B256>> {
        let proof = InputProof::decode(proof)?;
        let digest = attestation_digest(&proof.handles, binding);

        let signed_by_coprocessor = proof.signatures.iter().any(|signature| {
            Signature::from_raw(signature)
                .ok()
                .and_then(|s| s.recover_address_from_prehash(&digest).ok())
                == Some(self.coprocessor.address())
        });
        if !signed_by_coprocessor {
            return Err(FheError::Rejected(
                "input proof is not signed by the coprocessor".to_string(),
            ));
        }
        Ok(proof.handles)
    }
}

#[async_trait]
impl ConfidentialBackend for LocalBackend {
    async fn network_public_key(&self) -> Result<Bytes> {
        Ok(self.network.public_key_bytes())
    }

    async fn attest_inputs(&self, request: &InputAttestationRequest) -> Result<InputAttestation> {
        if request.ciphertexts.len() != request.handles.len() {
            return Err(FheError::Rejected(
                "ciphertext and handle counts differ".to_string(),
            ));
        }

        let binding = request.binding();
        self.attested.lock().unwrap().push(binding);
        let mut values = vec![];
        for (index, (ciphertext, handle)) in
            request.ciphertexts.iter().zip(&request.handles).enumerate()
        {
            let expected = compute_handle(ciphertext, index as u8, &binding, FheType::Uint64);
            if expected != *handle {
                return Err(FheError::Rejected(format!(
                    "handle {index} does not match its ciphertext"
                )));
            }
            let value = self
                .network
                .decrypt_u64(ciphertext)
                .map_err(|e| FheError::Rejected(format!("ciphertext {index}: {e}")))?;
            values.push((U256::from_be_bytes(handle.0), value));
        }

        let mut store = self.values.lock().unwrap();
        for (handle, value) in values {
            store.insert(
                handle,
                StoredValue {
                    value,
                    owner: binding.user,
                    contract: binding.contract,
                },
            );
        }

        let digest = attestation_digest(&request.handles, &binding);
        let signature = self
            .coprocessor
            .sign_hash_sync(&digest)
            .map_err(|e| FheError::Backend(e.to_string()))?;
        debug!(handles = request.handles.len(), "attested inputs");

        Ok(InputAttestation {
            signatures: vec![Bytes::from(signature.as_bytes().to_vec())],
        })
    }

    async fn reencrypt(&self, request: &ReencryptRequest) -> Result<Bytes> {
        self.reencryptions.fetch_add(1, Ordering::SeqCst);
        let hash = reencrypt_signing_hash(
            &request.public_key,
            request.chain_id,
            request.contract_address,
        );
        let signer = Signature::from_raw(&request.signature)
            .and_then(|s| s.recover_address_from_prehash(&hash))
            .map_err(|e| FheError::Rejected(format!("invalid signature: {e}")))?;
        if signer != request.user_address {
            return Err(FheError::Rejected(format!(
                "signature belongs to {signer}, not {}",
                request.user_address
            )));
        }

        let stored = self
            .values
            .lock()
            .unwrap()
            .get(&request.handle)
            .copied()
            .ok_or_else(|| FheError::Rejected(format!("unknown handle {}", request.handle)))?;
        if stored.owner != request.user_address || stored.contract != request.contract_address {
            return Err(FheError::Rejected(
                "handle is not owned by the requester".to_string(),
            ));
        }

        let key = BfvPublicKey::from_bytes(&request.public_key)?;
        Ok(Bytes::from(key.encrypt_u64(stored.value)?))
    }
}
