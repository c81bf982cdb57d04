// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Hand assembled contracts for chain tests that must not depend on a solidity build.

use alloy::primitives::{keccak256, Address, Bytes};

/// Deploys a one byte runtime (`STOP`). Appended constructor args are ignored.
pub const NOOP_DEPLOY_BYTECODE: &[u8] = &[
    0x60, 0x01, // PUSH1 0x01 (runtime size)
    0x60, 0x0c, // PUSH1 0x0c (offset of runtime in init code)
    0x60, 0x00, // PUSH1 0x00 (memory destination)
    0x39, //       CODECOPY
    0x60, 0x01, // PUSH1 0x01 (return size)
    0x60, 0x00, // PUSH1 0x00 (return offset)
    0xf3, //       RETURN
    0x00, //       -- runtime: STOP --
];

fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Minimal relayer registry:
/// - `addRelayer(address)` reverts unless called by `owner`, then sets `slot[address] = 1`
/// - `isRelayer(address)` returns `slot[address]`
/// - anything else reverts
pub fn relayer_registry_runtime(owner: Address) -> Vec<u8> {
    let mut code = vec![
        0x60, 0x00, // PUSH1 0
        0x35, //       CALLDATALOAD
        0x60, 0xe0, // PUSH1 0xe0
        0x1c, //       SHR
        0x80, //       DUP1
        0x63, //       PUSH4 addRelayer
    ];
    code.extend(selector("addRelayer(address)"));
    code.extend([
        0x14, //       EQ
        0x60, 0x1e, // PUSH1 add
        0x57, //       JUMPI
        0x80, //       DUP1
        0x63, //       PUSH4 isRelayer
    ]);
    code.extend(selector("isRelayer(address)"));
    code.extend([
        0x14, //       EQ
        0x60, 0x45, // PUSH1 is
        0x57, //       JUMPI
        0x60, 0x00, // PUSH1 0
        0x80, //       DUP1
        0xfd, //       REVERT
        0x5b, //       add: JUMPDEST (0x1e)
        0x33, //       CALLER
        0x73, //       PUSH20 owner
    ]);
    code.extend(owner.as_slice());
    code.extend([
        0x14, //       EQ
        0x60, 0x3d, // PUSH1 ok
        0x57, //       JUMPI
        0x60, 0x00, // PUSH1 0
        0x80, //       DUP1
        0xfd, //       REVERT
        0x5b, //       ok: JUMPDEST (0x3d)
        0x60, 0x01, // PUSH1 1
        0x60, 0x04, // PUSH1 4
        0x35, //       CALLDATALOAD
        0x55, //       SSTORE
        0x00, //       STOP
        0x5b, //       is: JUMPDEST (0x45)
        0x60, 0x04, // PUSH1 4
        0x35, //       CALLDATALOAD
        0x54, //       SLOAD
        0x60, 0x00, // PUSH1 0
        0x52, //       MSTORE
        0x60, 0x20, // PUSH1 0x20
        0x60, 0x00, // PUSH1 0
        0xf3, //       RETURN
    ]);
    code
}

/// Value `decryptedBalanceOf` reports once a decryption was requested from the token fixture
pub const TOKEN_FIXTURE_DECRYPTED_BALANCE: u8 = 42;

/// Minimal confidential token:
/// - `mint(uint64)` reverts unless called by `owner`
/// - `transfer(address,bytes32,bytes)` records the encrypted amount handle as the
///   caller's balance handle and returns true
/// - `approve(address,bytes32,bytes)` returns true
/// - `balanceOf(address)` returns the recorded handle, zero for unknown accounts
/// - `requestDecryptedBalanceOf(address)` publishes [`TOKEN_FIXTURE_DECRYPTED_BALANCE`]
/// - `decryptedBalanceOf(address)` returns the published value
/// - anything else reverts
pub fn confidential_token_runtime(owner: Address) -> Vec<u8> {
    let mut code = vec![
        0x60, 0x00, // PUSH1 0
        0x35, //       CALLDATALOAD
        0x60, 0xe0, // PUSH1 0xe0
        0x1c, //       SHR
    ];
    for (signature, target) in [
        ("mint(uint64)", 0x46),
        ("transfer(address,bytes32,bytes)", 0x67),
        ("approve(address,bytes32,bytes)", 0x6d),
        ("balanceOf(address)", 0x79),
        ("requestDecryptedBalanceOf(address)", 0x81),
        ("decryptedBalanceOf(address)", 0x88),
    ] {
        code.extend([0x80, 0x63]); // DUP1, PUSH4 selector
        code.extend(selector(signature));
        code.extend([
            0x14, //         EQ
            0x60, target, // PUSH1 target
            0x57, //         JUMPI
        ]);
    }
    code.extend([
        0x60, 0x00, // PUSH1 0
        0x80, //       DUP1
        0xfd, //       REVERT
        0x5b, //       mint: JUMPDEST (0x46)
        0x33, //       CALLER
        0x73, //       PUSH20 owner
    ]);
    code.extend(owner.as_slice());
    code.extend([
        0x14, //       EQ
        0x60, 0x65, // PUSH1 minted
        0x57, //       JUMPI
        0x60, 0x00, // PUSH1 0
        0x80, //       DUP1
        0xfd, //       REVERT
        0x5b, //       minted: JUMPDEST (0x65)
        0x00, //       STOP
        0x5b, //       transfer: JUMPDEST (0x67)
        0x60, 0x24, // PUSH1 0x24
        0x35, //       CALLDATALOAD
        0x33, //       CALLER
        0x55, //       SSTORE
        0x5b, //       true: JUMPDEST (0x6d)
        0x60, 0x01, // PUSH1 1
        0x5b, //       word: JUMPDEST (0x70)
        0x60, 0x00, // PUSH1 0
        0x52, //       MSTORE
        0x60, 0x20, // PUSH1 0x20
        0x60, 0x00, // PUSH1 0
        0xf3, //       RETURN
        0x5b, //       balanceOf: JUMPDEST (0x79)
        0x60, 0x04, // PUSH1 4
        0x35, //       CALLDATALOAD
        0x54, //       SLOAD
        0x60, 0x70, // PUSH1 word
        0x56, //       JUMP
        0x5b, //       request: JUMPDEST (0x81)
        0x60,
        TOKEN_FIXTURE_DECRYPTED_BALANCE, // PUSH1 value
        0x60, 0x00, // PUSH1 0
        0x55, //       SSTORE
        0x00, //       STOP
        0x5b, //       decrypted: JUMPDEST (0x88)
        0x60, 0x00, // PUSH1 0
        0x54, //       SLOAD
        0x60, 0x70, // PUSH1 word
        0x56, //       JUMP
    ]);
    code
}

pub fn confidential_token_deploy_code(owner: Address) -> Bytes {
    deploy_code_for(&confidential_token_runtime(owner))
}

/// Init code returning `runtime`. Anything appended after it is ignored.
pub fn deploy_code_for(runtime: &[u8]) -> Bytes {
    let len = u8::try_from(runtime.len()).expect("runtime fits a PUSH1");
    let mut code = vec![
        0x60, len, //  PUSH1 runtime size
        0x60, 0x0c, // PUSH1 0x0c
        0x60, 0x00, // PUSH1 0
        0x39, //       CODECOPY
        0x60, len, //  PUSH1 runtime size
        0x60, 0x00, // PUSH1 0
        0xf3, //       RETURN
    ];
    code.extend_from_slice(runtime);
    Bytes::from(code)
}

pub fn relayer_registry_deploy_code(owner: Address) -> Bytes {
    deploy_code_for(&relayer_registry_runtime(owner))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_targets() {
        let code = relayer_registry_runtime(Address::ZERO);
        assert_eq!(code.len(), 0x52);
        for target in [0x1e, 0x3d, 0x45] {
            assert_eq!(code[target], 0x5b, "no JUMPDEST at {target:#x}");
        }
    }

    #[test]
    fn test_token_jump_targets() {
        let code = confidential_token_runtime(Address::ZERO);
        assert_eq!(code.len(), 0x8f);
        for target in [0x46, 0x65, 0x67, 0x6d, 0x70, 0x79, 0x81, 0x88] {
            assert_eq!(code[target], 0x5b, "no JUMPDEST at {target:#x}");
        }
    }

    #[test]
    fn test_deploy_code_wraps_runtime() {
        let runtime = relayer_registry_runtime(Address::ZERO);
        let code = deploy_code_for(&runtime);
        assert_eq!(&code[12..], runtime.as_slice());
        assert_eq!(
            deploy_code_for(&[0x00]).to_vec(),
            NOOP_DEPLOY_BYTECODE.to_vec()
        );
    }
}
