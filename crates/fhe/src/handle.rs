// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Ciphertext handles: the opaque 32 byte references contracts receive in place of values.
//!
//! Layout: `hash[0..29] | index | fhe type | version` where `hash` commits to the
//! ciphertext and to the `(contract, user, chain)` the input is bound to.

use alloy_primitives::{keccak256, Address, B256};
use serde::{Deserialize, Serialize};

pub const HANDLE_VERSION: u8 = 0;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FheType {
    Bool = 0,
    Uint4 = 1,
    Uint8 = 2,
    Uint16 = 3,
    Uint32 = 4,
    Uint64 = 5,
}

/// The contract and caller an encrypted input may be consumed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputBinding {
    pub contract: Address,
    pub user: Address,
    pub chain_id: u64,
}

impl InputBinding {
    pub fn new(contract: Address, user: Address, chain_id: u64) -> Self {
        Self {
            contract,
            user,
            chain_id,
        }
    }

    /// `contract | user | chain id (32 byte big endian)`
    pub fn packed(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(20 + 20 + 32);
        out.extend_from_slice(self.contract.as_slice());
        out.extend_from_slice(self.user.as_slice());
        out.extend_from_slice(&[0u8; 24]);
        out.extend_from_slice(&self.chain_id.to_be_bytes());
        out
    }
}

pub fn compute_handle(
    ciphertext: &[u8],
    index: u8,
    binding: &InputBinding,
    fhe_type: FheType,
) -> B256 {
    let ciphertext_hash = keccak256(ciphertext);

    let mut preimage = Vec::with_capacity(32 + 1 + 72);
    preimage.extend_from_slice(ciphertext_hash.as_slice());
    preimage.push(index);
    preimage.extend_from_slice(&binding.packed());
    let digest = keccak256(&preimage);

    let mut handle = [0u8; 32];
    handle[..29].copy_from_slice(&digest[..29]);
    handle[29] = index;
    handle[30] = fhe_type as u8;
    handle[31] = HANDLE_VERSION;
    B256::from(handle)
}

pub fn handle_index(handle: &B256) -> u8 {
    handle[29]
}

pub fn handle_type(handle: &B256) -> u8 {
    handle[30]
}
