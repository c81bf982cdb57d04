// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

pub mod backend;
pub mod eip712;
pub mod encoding;
mod error;
pub mod gateway;
pub mod handle;
pub mod input;
pub mod keys;
pub mod params;

pub use backend::{ConfidentialBackend, InputAttestation, InputAttestationRequest, ReencryptRequest};
pub use eip712::{reencrypt_domain, reencrypt_signing_hash, Reencrypt};
pub use error::{FheError, Result};
pub use gateway::HttpGateway;
pub use input::attestation_digest;
pub use handle::{compute_handle, FheType, InputBinding};
pub use input::{EncryptedInputBuilder, EncryptedInputs, InputProof};
pub use keys::{BfvKeypair, BfvPublicKey, EphemeralKeypair};
