// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::context::KeyArgs;
use crate::token::{signer_client, USER_KEY_ENV};
use anyhow::Result;
use fhegw_config::AppConfig;
use std::time::Duration;

pub async fn execute(
    config: &AppConfig,
    token: Option<&str>,
    settle_secs: u64,
    keys: &KeyArgs,
) -> Result<()> {
    let identity = keys.identity(USER_KEY_ENV)?;
    let client = signer_client(config, token, &identity).await?;
    let balance = client
        .decrypt_balance_via_gateway(identity.address(), Duration::from_secs(settle_secs))
        .await?;
    println!("{balance}");
    Ok(())
}
