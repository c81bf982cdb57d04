// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::sol;

sol! {
    #[derive(Debug)]
    #[sol(rpc)]
    contract EncryptedERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function totalSupply() external view returns (uint64);
        function getOwner() external view returns (address);
        function mint(uint64 mintedAmount) external;
        function transfer(address to, bytes32 encryptedAmount, bytes calldata inputProof) external returns (bool);
        function approve(address spender, bytes32 encryptedAmount, bytes calldata inputProof) external returns (bool);
        function balanceOf(address wallet) external view returns (uint256);
        function requestDecryptedBalanceOf(address wallet) external;
        function decryptedBalanceOf(address wallet) external view returns (uint64);
    }
}

pub const TOKEN_FUNCTIONS: &[&str] = &[
    "name",
    "symbol",
    "totalSupply",
    "getOwner",
    "mint",
    "transfer",
    "approve",
    "balanceOf",
    "requestDecryptedBalanceOf",
    "decryptedBalanceOf",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContractArtifact;
    use fhegw_test_helpers::{token_abi, write_artifact};
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn test_artifact_without_decryption_is_rejected() -> crate::Result<()> {
        let dir = tempdir().unwrap();
        write_artifact(dir.path(), "EncryptedERC20", token_abi(), None);
        ContractArtifact::load(dir.path(), "EncryptedERC20")?
            .require_functions(TOKEN_FUNCTIONS)?;

        let Value::Array(functions) = token_abi() else {
            panic!("token abi is an array");
        };
        let without_decryption: Vec<Value> = functions
            .into_iter()
            .filter(|f| {
                !matches!(
                    f["name"].as_str(),
                    Some("requestDecryptedBalanceOf" | "decryptedBalanceOf")
                )
            })
            .collect();
        write_artifact(dir.path(), "Legacy", Value::Array(without_decryption), None);
        let err = ContractArtifact::load(dir.path(), "Legacy")?
            .require_functions(TOKEN_FUNCTIONS)
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("missing functions: requestDecryptedBalanceOf, decryptedBalanceOf"));
        Ok(())
    }
}
