// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::context::{backend, provider_config, token_address, KeyArgs};
use crate::token::USER_KEY_ENV;
use anyhow::Result;
use fhegw_config::AppConfig;
use fhegw_evm::ReencryptionService;

pub async fn execute(config: &AppConfig, token: Option<&str>, keys: &KeyArgs) -> Result<()> {
    let token = token_address(config, token)?;
    let identity = keys.identity(USER_KEY_ENV)?;
    let provider = provider_config(config)?.create_readonly_provider().await?;

    let service = ReencryptionService::new(backend(config)?, identity, token, provider.chain_id());
    let balance = service.reencrypt_balance(provider.provider()).await?;
    println!("{balance}");
    Ok(())
}
