// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{GatewayError, Result};
use alloy::{network::EthereumWallet, primitives::Address, signers::local::PrivateKeySigner};
use std::{env, fmt};
use zeroize::Zeroizing;

/// A chain account able to sign transactions and typed data.
#[derive(Clone)]
pub struct Identity {
    signer: PrivateKeySigner,
}

impl Identity {
    pub fn from_signer(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }

    /// Build from a hex private key. The caller's copy of the secret is wiped on drop.
    pub fn from_secret(secret: Zeroizing<String>) -> Result<Self> {
        let signer: PrivateKeySigner = secret
            .trim()
            .parse()
            .map_err(|_| GatewayError::Identity("malformed private key".to_string()))?;
        Ok(Self { signer })
    }

    /// Read the private key from `var` and remove it from the process environment.
    /// Same threading precondition as [`take_env_secret`].
    pub fn from_env(var: &str) -> Result<Self> {
        let secret = take_env_secret(var)
            .ok_or_else(|| GatewayError::Identity(format!("{var} is not set")))?;
        Self::from_secret(secret)
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    pub fn wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}

/// Move the secret held in `var` out of the process environment.
///
/// Removing a variable races with concurrent environment reads. Call this before
/// an async runtime or any other thread is started.
pub fn take_env_secret(var: &str) -> Option<Zeroizing<String>> {
    let secret = Zeroizing::new(env::var(var).ok()?);
    env::remove_var(var);
    Some(secret)
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
