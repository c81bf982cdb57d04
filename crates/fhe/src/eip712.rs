// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{sol, Eip712Domain, SolStruct};
use std::borrow::Cow;

pub const REENCRYPT_DOMAIN_NAME: &str = "Authorization token";
pub const REENCRYPT_DOMAIN_VERSION: &str = "1";

sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct Reencrypt {
        bytes publicKey;
    }
}

/// Domain binding a re-encryption authorization to one contract on one chain
pub fn reencrypt_domain(chain_id: u64, contract: Address) -> Eip712Domain {
    Eip712Domain::new(
        Some(Cow::Borrowed(REENCRYPT_DOMAIN_NAME)),
        Some(Cow::Borrowed(REENCRYPT_DOMAIN_VERSION)),
        Some(U256::from(chain_id)),
        Some(contract),
        None,
    )
}

pub fn reencrypt_signing_hash(public_key: &Bytes, chain_id: u64, contract: Address) -> B256 {
    let payload = Reencrypt {
        publicKey: public_key.clone(),
    };
    payload.eip712_signing_hash(&reencrypt_domain(chain_id, contract))
}
