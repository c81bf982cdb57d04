// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the gateway constructor finds the KMS verifier address.
#[derive(Debug, Clone, Hash, Eq, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum KmsVerifier {
    /// The verifier address given directly
    Address(String),
    /// A dotenv style artifact written by the verifier deployment
    EnvFile {
        env_file: PathBuf,
        #[serde(default = "default_kms_verifier_key")]
        key: String,
    },
}

pub const KMS_VERIFIER_ENV_KEY: &str = "KMS_VERIFIER_CONTRACT_ADDRESS";

fn default_kms_verifier_key() -> String {
    KMS_VERIFIER_ENV_KEY.to_string()
}

impl Default for KmsVerifier {
    fn default() -> Self {
        KmsVerifier::EnvFile {
            env_file: PathBuf::from("node_modules/fhevm/lib/.env.kmsverifier"),
            key: default_kms_verifier_key(),
        }
    }
}

#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractAddresses {
    pub kms_verifier: KmsVerifier,
    /// Deployed gateway. When absent the predeploy env artifact is consulted.
    pub gateway: Option<String>,
    pub token: Option<String>,
}

impl ContractAddresses {
    /// All directly configured addresses, labelled for validation messages
    pub fn configured(&self) -> Vec<(&'static str, &String)> {
        let mut out = vec![];
        if let KmsVerifier::Address(address) = &self.kms_verifier {
            out.push(("contracts.kms_verifier", address));
        }
        if let Some(address) = &self.gateway {
            out.push(("contracts.gateway", address));
        }
        if let Some(address) = &self.token {
            out.push(("contracts.token", address));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kms_verifier_shapes() {
        let direct: KmsVerifier =
            serde_yaml::from_str("\"0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0\"").unwrap();
        assert_eq!(
            direct,
            KmsVerifier::Address("0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0".to_string())
        );

        let from_file: KmsVerifier = serde_yaml::from_str("env_file: ./lib/.env.kms").unwrap();
        assert_eq!(
            from_file,
            KmsVerifier::EnvFile {
                env_file: PathBuf::from("./lib/.env.kms"),
                key: KMS_VERIFIER_ENV_KEY.to_string()
            }
        );
    }

    #[test]
    fn test_configured_lists_only_present_addresses() {
        let contracts = ContractAddresses {
            token: Some("0x01".to_string()),
            ..Default::default()
        };
        let labels: Vec<_> = contracts.configured().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["contracts.token"]);
    }
}
