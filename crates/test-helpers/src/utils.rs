// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::{hex, Bytes};
use serde_json::{json, Value};
use std::{fs, path::Path};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::{fmt, EnvFilter};

/// Scoped test logging
pub fn add_tracing() -> DefaultGuard {
    tracing::subscriber::set_default(
        fmt()
            .with_env_filter(EnvFilter::new("info"))
            .with_test_writer()
            .finish(),
    )
}

/// Write `<dir>/<name>.json` in the hardhat `{ abi, bytecode }` shape
pub fn write_artifact(dir: &Path, name: &str, abi: Value, bytecode: Option<&Bytes>) {
    let artifact = json!({
        "contractName": name,
        "abi": abi,
        "bytecode": format!("0x{}", bytecode.map(hex::encode).unwrap_or_default()),
    });
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(format!("{name}.json")), artifact.to_string()).unwrap();
}

fn function(name: &str, inputs: Value, outputs: Value, mutability: &str) -> Value {
    json!({
        "type": "function",
        "name": name,
        "inputs": inputs,
        "outputs": outputs,
        "stateMutability": mutability,
    })
}

fn param(name: &str, ty: &str) -> Value {
    json!({ "name": name, "type": ty, "internalType": ty })
}

pub fn gateway_abi() -> Value {
    json!([
        {
            "type": "constructor",
            "inputs": [param("_gatewayOwner", "address"), param("_kmsVerifier", "address")],
            "stateMutability": "nonpayable"
        },
        function("addRelayer", json!([param("relayerAddress", "address")]), json!([]), "nonpayable"),
        function("isRelayer", json!([param("account", "address")]), json!([param("", "bool")]), "view"),
        function("owner", json!([]), json!([param("", "address")]), "view"),
    ])
}

pub fn token_abi() -> Value {
    json!([
        function("name", json!([]), json!([param("", "string")]), "view"),
        function("symbol", json!([]), json!([param("", "string")]), "view"),
        function("totalSupply", json!([]), json!([param("", "uint64")]), "view"),
        function("getOwner", json!([]), json!([param("", "address")]), "view"),
        function("mint", json!([param("mintedAmount", "uint64")]), json!([]), "nonpayable"),
        function(
            "transfer",
            json!([param("to", "address"), param("encryptedAmount", "bytes32"), param("inputProof", "bytes")]),
            json!([param("", "bool")]),
            "nonpayable"
        ),
        function(
            "approve",
            json!([param("spender", "address"), param("encryptedAmount", "bytes32"), param("inputProof", "bytes")]),
            json!([param("", "bool")]),
            "nonpayable"
        ),
        function("balanceOf", json!([param("wallet", "address")]), json!([param("", "uint256")]), "view"),
        function("requestDecryptedBalanceOf", json!([param("wallet", "address")]), json!([]), "nonpayable"),
        function("decryptedBalanceOf", json!([param("wallet", "address")]), json!([param("", "uint64")]), "view"),
    ])
}
