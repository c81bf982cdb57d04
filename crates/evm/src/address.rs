// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Contract address derivation for plain `CREATE` deployments:
//! `keccak256(rlp([sender, nonce]))[12..]`.

use crate::{GatewayError, Result};
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PredictedAddress {
    pub deployer: Address,
    pub nonce: u64,
    pub address: Address,
}

impl fmt::Display for PredictedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} nonce {})", self.address, self.deployer, self.nonce)
    }
}

/// Parse a 20 byte hex address with or without the `0x` prefix.
/// Mixed case input is accepted without enforcing the checksum.
pub fn parse_address(value: &str) -> Result<Address> {
    Address::from_str(value.trim())
        .map_err(|_| GatewayError::InvalidAddressFormat(value.to_string()))
}

pub fn predict_from(deployer: Address, nonce: u64) -> PredictedAddress {
    PredictedAddress {
        deployer,
        nonce,
        address: deployer.create(nonce),
    }
}

pub fn predict_create_address(sender: &str, nonce: u64) -> Result<Address> {
    Ok(predict_from(parse_address(sender)?, nonce).address)
}
