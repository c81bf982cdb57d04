// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! A u64 does not fit under the plaintext modulus so it travels as four
//! little endian 16 bit limbs in the leading polynomial coefficients.

use crate::params::PLAINTEXT_MODULUS;
use crate::{FheError, Result};

pub const LIMB_BITS: u32 = 16;
pub const LIMBS_PER_U64: usize = 4;
const LIMB_MASK: u64 = (1 << LIMB_BITS) - 1;

// every limb must survive reduction mod t
const _: () = assert!(LIMB_MASK < PLAINTEXT_MODULUS);

pub fn u64_to_limbs(value: u64) -> Vec<u64> {
    (0..LIMBS_PER_U64)
        .map(|i| (value >> (i as u32 * LIMB_BITS)) & LIMB_MASK)
        .collect()
}

/// Recombine decoded coefficients. Anything past the limbs must be zero.
pub fn limbs_to_u64(coefficients: &[u64]) -> Result<u64> {
    if coefficients.len() < LIMBS_PER_U64 {
        return Err(FheError::BadEncoding);
    }

    let (limbs, rest) = coefficients.split_at(LIMBS_PER_U64);
    if rest.iter().any(|c| *c != 0) {
        return Err(FheError::BadEncoding);
    }

    limbs.iter().enumerate().try_fold(0u64, |acc, (i, limb)| {
        if *limb > LIMB_MASK {
            return Err(FheError::BadEncoding);
        }
        Ok(acc | (*limb << (i as u32 * LIMB_BITS)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limbs() {
        assert_eq!(u64_to_limbs(1337), vec![1337, 0, 0, 0]);
        assert_eq!(u64_to_limbs(u64::MAX), vec![0xffff; 4]);
        assert_eq!(u64_to_limbs(0x0001_0002_0003_0004), vec![4, 3, 2, 1]);

        for value in [0, 1, 1000, 65536, 0xdead_beef_cafe_f00d, u64::MAX] {
            let mut coefficients = u64_to_limbs(value);
            coefficients.resize(2048, 0);
            assert_eq!(limbs_to_u64(&coefficients).unwrap(), value);
        }
    }

    #[test]
    fn test_rejects_bad_limbs() {
        assert!(limbs_to_u64(&[1, 2]).is_err());
        assert!(limbs_to_u64(&[0x10000, 0, 0, 0]).is_err());
        assert!(limbs_to_u64(&[1, 0, 0, 0, 9]).is_err());
    }
}
