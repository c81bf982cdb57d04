// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Compiled contract artifacts read from `<dir>/<name>.json`.
//!
//! Accepted shapes:
//! - a bare ABI array
//! - `{ "abi": [..], "bytecode": "0x.." }` (hardhat, `bytecode` may also be `{ "object": .. }`)
//! - solc standard json output with `evm.bytecode.object`

use crate::{GatewayError, Result};
use alloy::{json_abi::JsonAbi, primitives::Bytes};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ContractArtifact {
    pub name: String,
    pub path: PathBuf,
    pub abi: JsonAbi,
    pub bytecode: Option<Bytes>,
}

impl ContractArtifact {
    pub fn load(dir: &Path, name: &str) -> Result<Self> {
        let path = dir.join(format!("{name}.json"));
        debug!(path = %path.display(), "loading contract artifact");

        let raw = std::fs::read_to_string(&path).map_err(|e| abi_error(&path, e))?;
        let json: Value = serde_json::from_str(&raw).map_err(|e| abi_error(&path, e))?;

        let (abi_value, bytecode_value) = match &json {
            Value::Array(_) => (&json, None),
            Value::Object(map) => {
                let abi = map
                    .get("abi")
                    .ok_or_else(|| abi_error(&path, "artifact has no `abi` field"))?;
                let bytecode = map
                    .get("bytecode")
                    .or_else(|| json.pointer("/evm/bytecode/object"));
                (abi, bytecode)
            }
            _ => return Err(abi_error(&path, "expected a JSON array or object")),
        };

        let abi: JsonAbi =
            serde_json::from_value(abi_value.clone()).map_err(|e| abi_error(&path, e))?;
        let bytecode = match bytecode_value {
            Some(value) => parse_bytecode(value).map_err(|e| abi_error(&path, e))?,
            None => None,
        };

        Ok(Self {
            name: name.to_string(),
            path,
            abi,
            bytecode,
        })
    }

    /// Fail unless the ABI exposes every named function
    pub fn require_functions(&self, names: &[&str]) -> Result<()> {
        let missing: Vec<&str> = names
            .iter()
            .copied()
            .filter(|name| !self.abi.functions.contains_key(*name))
            .collect();

        if !missing.is_empty() {
            return Err(abi_error(
                &self.path,
                format!("missing functions: {}", missing.join(", ")),
            ));
        }
        Ok(())
    }

    pub fn deploy_bytecode(&self) -> Result<&Bytes> {
        self.bytecode
            .as_ref()
            .ok_or_else(|| abi_error(&self.path, "artifact has no deployable bytecode"))
    }
}

fn parse_bytecode(value: &Value) -> std::result::Result<Option<Bytes>, String> {
    let hex_str = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => match map.get("object") {
            Some(Value::String(s)) => s.as_str(),
            _ => return Err("bytecode object has no `object` string".to_string()),
        },
        Value::Null => return Ok(None),
        _ => return Err("bytecode must be a hex string".to_string()),
    };

    let clean = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    if clean.is_empty() {
        // interfaces and abstract contracts compile to empty bytecode
        return Ok(None);
    }
    hex::decode(clean)
        .map(|bytes| Some(Bytes::from(bytes)))
        .map_err(|e| format!("bytecode is not valid hex: {e}"))
}

fn abi_error(path: &Path, reason: impl ToString) -> GatewayError {
    GatewayError::AbiLoad {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Read `key` from a dotenv file. Later assignments of the same key win.
pub fn read_env_value(path: &Path, key: &str) -> Result<Option<String>> {
    let env_error = |reason: dotenvy::Error| GatewayError::EnvArtifact {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let mut found = None;
    for item in dotenvy::from_path_iter(path).map_err(env_error)? {
        let (name, value) = item.map_err(env_error)?;
        if name == key {
            found = Some(value);
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn abi() -> Value {
        json!([
            {
                "type": "function",
                "name": "addRelayer",
                "inputs": [{ "name": "relayerAddress", "type": "address", "internalType": "address" }],
                "outputs": [],
                "stateMutability": "nonpayable"
            }
        ])
    }

    fn write(dir: &Path, name: &str, value: Value) {
        std::fs::write(dir.join(format!("{name}.json")), value.to_string()).unwrap();
    }

    #[test]
    fn test_artifact_shapes() -> Result<()> {
        let dir = tempdir().unwrap();
        write(dir.path(), "Bare", abi());
        write(
            dir.path(),
            "Hardhat",
            json!({ "abi": abi(), "bytecode": "0x6001600c60003960016000f300" }),
        );
        write(
            dir.path(),
            "Foundry",
            json!({ "abi": abi(), "bytecode": { "object": "0x00" } }),
        );
        write(
            dir.path(),
            "Solc",
            json!({ "abi": abi(), "evm": { "bytecode": { "object": "6000" } } }),
        );

        let bare = ContractArtifact::load(dir.path(), "Bare")?;
        assert!(bare.bytecode.is_none());
        bare.require_functions(&["addRelayer"])?;
        assert!(bare.deploy_bytecode().is_err());

        let hardhat = ContractArtifact::load(dir.path(), "Hardhat")?;
        assert_eq!(hardhat.deploy_bytecode()?.len(), 13);

        let foundry = ContractArtifact::load(dir.path(), "Foundry")?;
        assert_eq!(foundry.deploy_bytecode()?.to_vec(), vec![0x00u8]);

        let solc = ContractArtifact::load(dir.path(), "Solc")?;
        assert_eq!(solc.deploy_bytecode()?.to_vec(), vec![0x60u8, 0x00]);
        Ok(())
    }

    #[test]
    fn test_load_failures_are_returned() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("Broken.json"), "{ not json").unwrap();
        write(dir.path(), "NoAbi", json!({ "bytecode": "0x00" }));
        write(dir.path(), "BadHex", json!({ "abi": abi(), "bytecode": "0xzz" }));

        for name in ["Missing", "Broken", "NoAbi", "BadHex"] {
            let err = ContractArtifact::load(dir.path(), name).unwrap_err();
            match err {
                GatewayError::AbiLoad { path, .. } => {
                    assert!(path.ends_with(format!("{name}.json")))
                }
                other => panic!("unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn test_require_functions_lists_missing() -> Result<()> {
        let dir = tempdir().unwrap();
        write(dir.path(), "Gateway", abi());
        let artifact = ContractArtifact::load(dir.path(), "Gateway")?;
        let err = artifact
            .require_functions(&["addRelayer", "isRelayer"])
            .unwrap_err();
        assert!(err.to_string().contains("isRelayer"));
        Ok(())
    }

    #[test]
    fn test_read_env_value() -> Result<()> {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env.kmsverifier");
        std::fs::write(
            &path,
            "# generated\n\nOTHER=1\nexport KMS_VERIFIER_CONTRACT_ADDRESS=\"0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0\"\n",
        )
        .unwrap();

        assert_eq!(
            read_env_value(&path, "KMS_VERIFIER_CONTRACT_ADDRESS")?.as_deref(),
            Some("0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0")
        );
        assert_eq!(read_env_value(&path, "OTHER")?.as_deref(), Some("1"));
        assert_eq!(read_env_value(&path, "MISSING")?, None);
        Ok(())
    }

    #[test]
    fn test_read_env_value_inline_comment() -> Result<()> {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env.kmsverifier");
        std::fs::write(
            &path,
            "KMS_VERIFIER_CONTRACT_ADDRESS=0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0 # deployed by setup\n",
        )
        .unwrap();

        let value = read_env_value(&path, "KMS_VERIFIER_CONTRACT_ADDRESS")?.unwrap();
        assert_eq!(value, "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0");
        assert!(crate::parse_address(&value).is_ok());
        Ok(())
    }

    #[test]
    fn test_read_env_value_quoting() -> Result<()> {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            concat!(
                "SINGLE='0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512'\n",
                "HASH=\"value # not a comment\"\n",
                "ESCAPED=\"say \\\"hi\\\"\"\n",
                "REPEATED=first\n",
                "REPEATED=second\n",
            ),
        )
        .unwrap();

        assert_eq!(
            read_env_value(&path, "SINGLE")?.as_deref(),
            Some("0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512")
        );
        assert_eq!(
            read_env_value(&path, "HASH")?.as_deref(),
            Some("value # not a comment")
        );
        assert_eq!(read_env_value(&path, "ESCAPED")?.as_deref(), Some("say \"hi\""));
        assert_eq!(read_env_value(&path, "REPEATED")?.as_deref(), Some("second"));
        Ok(())
    }

    #[test]
    fn test_read_env_value_missing_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join(".env.gateway");
        match read_env_value(&missing, "OTHER").unwrap_err() {
            GatewayError::EnvArtifact { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
