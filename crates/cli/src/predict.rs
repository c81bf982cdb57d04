// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::Result;
use fhegw_evm::{parse_address, predict_from};
use tracing::info;

pub fn execute(deployer: &str, nonce: u64) -> Result<()> {
    let predicted = predict_from(parse_address(deployer)?, nonce);
    info!("{}", predicted);
    println!("{}", predicted.address.to_checksum(None));
    Ok(())
}
