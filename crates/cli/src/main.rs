// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use clap::Parser;
use cli::Cli;

mod cli;
mod gateway;
mod gateway_add_relayer;
mod gateway_deploy;
mod gateway_is_relayer;
mod gateway_launch;
pub mod helpers;
mod predict;
mod token;
mod token_approve;
mod token_balance;
mod token_decrypt;
mod token_details;
mod token_mint;
mod token_transfer;

pub fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

/// Keys leave the environment while the process is still single threaded
fn run(mut cli: Cli) -> anyhow::Result<()> {
    cli.preload_keys()?;
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(cli.execute())
}
