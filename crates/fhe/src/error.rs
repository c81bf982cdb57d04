// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum FheError {
    #[error("BFV parameters could not be built: {0}")]
    Params(String),

    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    #[error("Encryption failed: {0}")]
    Encrypt(String),

    #[error("Decryption failed: {0}")]
    Decrypt(String),

    #[error("Plaintext was not encoded correctly")]
    BadEncoding,

    #[error("Encrypted input has no values")]
    EmptyInput,

    #[error("Encrypted input holds {0} values, at most 255 are supported")]
    TooManyInputs(usize),

    #[error("Malformed input proof: {0}")]
    MalformedProof(String),

    #[error("Backend rejected the request: {0}")]
    Rejected(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, FheError>;
