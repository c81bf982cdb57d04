// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::context::KeyArgs;
use crate::token::{print_tx, signer_client, USER_KEY_ENV};
use anyhow::Result;
use fhegw_config::AppConfig;
use fhegw_evm::TokenWrite;

pub async fn execute(
    config: &AppConfig,
    token: Option<&str>,
    amount: u64,
    keys: &KeyArgs,
) -> Result<()> {
    let identity = keys.identity(USER_KEY_ENV)?;
    let client = signer_client(config, token, &identity).await?;
    print_tx(&client.mint(amount).await?);
    Ok(())
}
