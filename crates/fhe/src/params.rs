// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! BFV parameters shared by the network key and ephemeral re-encryption keys.

use crate::{FheError, Result};
use fhe::bfv::{BfvParameters, BfvParametersBuilder};
use std::sync::Arc;

pub const DEGREE: usize = 2048;
pub const PLAINTEXT_MODULUS: u64 = 1032193;
pub const MODULI: [u64; 1] = [0x3FFFFFFF000001];

pub fn build_params() -> Result<Arc<BfvParameters>> {
    BfvParametersBuilder::new()
        .set_degree(DEGREE)
        .set_plaintext_modulus(PLAINTEXT_MODULUS)
        .set_moduli(&MODULI)
        .build_arc()
        .map_err(|e| FheError::Params(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_params() {
        let params = build_params().unwrap();
        assert_eq!(params.degree(), DEGREE);
        assert_eq!(params.plaintext(), PLAINTEXT_MODULUS);
    }
}
