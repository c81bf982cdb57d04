// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::{Address, TxHash};
use fhegw_fhe::FheError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum GatewayError {
    #[error("Invalid address format: {0}")]
    InvalidAddressFormat(String),

    #[error("No contract code deployed at {0}")]
    NotAContract(Address),

    #[error("Deployment failed: {0}")]
    Deployment(String),

    #[error("Transaction {tx_hash} reverted")]
    TransactionReverted { tx_hash: TxHash },

    #[error("Call reverted before it was sent: {0}")]
    CallReverted(String),

    #[error("Could not load contract artifact {path}: {reason}")]
    AbiLoad { path: PathBuf, reason: String },

    #[error("Could not read env artifact {path}: {reason}")]
    EnvArtifact { path: PathBuf, reason: String },

    #[error("Re-encryption failed: {0}")]
    Reencryption(String),

    #[error("Could not write {path}: {reason}")]
    FileWrite { path: PathBuf, reason: String },

    #[error("Deployed address {actual} does not match predicted address {predicted}")]
    AddressMismatch { predicted: Address, actual: Address },

    #[error("Transaction {tx_hash} was not confirmed within {waited:?}")]
    Timeout { tx_hash: TxHash, waited: Duration },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Token operation failed: {0}")]
    Token(String),

    #[error("Invalid identity: {0}")]
    Identity(String),
}

impl GatewayError {
    pub fn provider(err: impl ToString) -> Self {
        GatewayError::Provider(err.to_string())
    }

    pub fn token(err: impl ToString) -> Self {
        GatewayError::Token(err.to_string())
    }

    pub fn reencryption(err: impl ToString) -> Self {
        GatewayError::Reencryption(err.to_string())
    }
}

impl From<FheError> for GatewayError {
    fn from(value: FheError) -> Self {
        GatewayError::Token(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
