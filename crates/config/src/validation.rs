// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::str::FromStr;

use alloy_primitives::Address;
use anyhow::{anyhow, Result};

/// Parse a 20 byte hex address. Checksums are not enforced.
pub fn parse_address(label: &str, value: &str) -> Result<Address> {
    Address::from_str(value.trim()).map_err(|e| anyhow!("{label}: '{value}' is not an address: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        assert!(parse_address("x", "0x5FbDB2315678afecb367f032d93F642f64180aa3").is_ok());
        assert!(parse_address("x", "5fbdb2315678afecb367f032d93f642f64180aa3").is_ok());
        let err = parse_address("contracts.token", "0x1234").unwrap_err();
        assert!(err.to_string().starts_with("contracts.token"));
    }
}
