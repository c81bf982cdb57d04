// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::env;
use std::path::Path;
use tokio::process::Command;

/// Whether tests that spawn anvil can run. Callers skip gracefully when not.
pub async fn find_anvil() -> bool {
    if let Ok(output) = Command::new("which").arg("anvil").output().await {
        if output.status.success() {
            return true;
        }
    }
    if let Ok(home) = env::var("HOME") {
        let path = format!("{}/.foundry/bin/anvil", home);
        if Path::new(&path).exists() {
            return true;
        }
    }
    false
}

/// Connection details for the env gated end to end suite
#[derive(Debug, Clone)]
pub struct E2eEnv {
    pub rpc_url: String,
    pub gateway_url: String,
    pub token: String,
    pub artifacts_dir: String,
    pub alice_key: String,
    pub bob_key: String,
}

impl E2eEnv {
    /// `None` unless every `FHEGW_E2E_*` variable is present
    pub fn from_env() -> Option<Self> {
        let read = |name: &str| env::var(format!("FHEGW_E2E_{name}")).ok();
        Some(Self {
            rpc_url: read("RPC_URL")?,
            gateway_url: read("GATEWAY_URL")?,
            token: read("TOKEN")?,
            artifacts_dir: read("ARTIFACTS_DIR")?,
            alice_key: read("ALICE_KEY")?,
            bob_key: read("BOB_KEY")?,
        })
    }
}
