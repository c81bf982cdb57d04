// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::gateway::{self, GatewayCommands};
use crate::helpers::telemetry::setup_simple_tracing;
use crate::predict;
use crate::token::{self, TokenCommands};
use anyhow::Result;
use clap::{command, ArgAction, Parser, Subcommand};
use fhegw_config::load_config::CliOverrides;
use fhegw_config::{load_config, AppConfig};
use tracing::{info, instrument, Level};

#[derive(Parser, Debug)]
#[command(name = "fhegw")]
#[command(about = "Deploy the confidential computation gateway and work with confidential tokens", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,

    /// Indicate error levels by adding additional `-v` arguments. Eg. `fhegw -vvv` will give you
    /// trace level output
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true
    )]
    pub verbose: u8,

    /// Silence all output. This argument cannot be used alongside `-v`
    #[arg(
        short,
        long,
        action = ArgAction::SetTrue,
        conflicts_with = "verbose",
        global = true
    )]
    quiet: bool,

    /// Override the configured JSON-RPC endpoint
    #[arg(long = "rpc-url", global = true)]
    pub rpc_url: Option<String>,

    /// Override the configured gateway service endpoint
    #[arg(long = "gateway-url", global = true)]
    pub gateway_url: Option<String>,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else {
            match self.verbose {
                0 => Level::WARN,  //
                1 => Level::INFO,  // -v
                2 => Level::DEBUG, // -vv
                _ => Level::TRACE, // -vvv
            }
        }
    }

    /// Move signing keys out of the environment. Runs before the async runtime exists.
    pub fn preload_keys(&mut self) -> Result<()> {
        match &mut self.command {
            Commands::Predict { .. } => {}
            Commands::Gateway { command } => command.preload_keys()?,
            Commands::Token { command } => command.preload_keys(),
        }
        Ok(())
    }

    #[instrument(skip_all)]
    pub async fn execute(self) -> Result<()> {
        setup_simple_tracing(self.log_level());
        self.run().await
    }

    /// Dispatch the command. Only chain commands read the config.
    pub async fn run(self) -> Result<()> {
        let overrides = self.overrides();
        let Cli {
            config: config_file,
            command,
            ..
        } = self;
        let config = || -> Result<AppConfig> {
            let config = load_config(config_file.as_deref(), overrides.clone())?;
            info!("Config loaded from: {:?}", config.config_file);
            Ok(config)
        };

        match command {
            Commands::Predict { deployer, nonce } => predict::execute(&deployer, nonce)?,
            Commands::Gateway { command } => gateway::execute(command, &config()?).await?,
            Commands::Token { command } => token::execute(command, &config()?).await?,
        }

        Ok(())
    }

    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            rpc_url: self.rpc_url.clone(),
            gateway_url: self.gateway_url.clone(),
            config_file: None,
        }
    }

    pub fn load_config(&self) -> Result<AppConfig> {
        load_config(self.config.as_deref(), self.overrides())
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the address a contract created by `deployer` at `nonce` lands on
    Predict {
        /// Deploying account, 0x prefixed or bare hex
        #[arg(long)]
        deployer: String,

        /// Account nonce of the deployment transaction
        #[arg(long, default_value_t = 0)]
        nonce: u64,
    },

    /// Gateway contract deployment and relayer management
    Gateway {
        #[command(subcommand)]
        command: GatewayCommands,
    },

    /// Confidential token operations
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        let cli = Cli::parse_from(["fhegw", "predict", "--deployer", "0x01"]);
        assert_eq!(cli.log_level(), Level::WARN);

        let cli = Cli::parse_from(["fhegw", "-vv", "predict", "--deployer", "0x01"]);
        assert_eq!(cli.log_level(), Level::DEBUG);

        let cli = Cli::parse_from(["fhegw", "predict", "--deployer", "0x01", "-vvvv"]);
        assert_eq!(cli.log_level(), Level::TRACE);

        let cli = Cli::parse_from(["fhegw", "--quiet", "predict", "--deployer", "0x01"]);
        assert_eq!(cli.log_level(), Level::ERROR);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["fhegw", "-q", "-v", "predict", "--deployer", "0x01"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_reach_the_config() {
        figment::Jail::expect_with(|_| {
            let cli = Cli::parse_from([
                "fhegw",
                "--rpc-url",
                "http://node:8545",
                "--gateway-url",
                "http://gateway:7077",
                "token",
                "details",
            ]);
            let config = cli.load_config().map_err(|e| e.to_string())?;
            assert_eq!(config.rpc_url, "http://node:8545");
            assert_eq!(config.gateway_url, "http://gateway:7077");
            Ok(())
        });
    }

    #[test]
    fn test_predict_ignores_a_broken_config() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("fhegw.config.yaml", "rpc_url: [unterminated\n")?;
            let runtime = tokio::runtime::Runtime::new().map_err(|e| e.to_string())?;

            let predict = Cli::parse_from([
                "fhegw",
                "predict",
                "--deployer",
                "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
                "--nonce",
                "1",
            ]);
            runtime
                .block_on(predict.run())
                .map_err(|e| e.to_string())?;

            let details = Cli::parse_from(["fhegw", "token", "details"]);
            assert!(runtime.block_on(details.run()).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_preload_keys_for_token_commands() {
        figment::Jail::expect_with(|jail| {
            jail.set_env(
                "FHEGW_USER_KEY",
                "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
            );
            let mut cli = Cli::parse_from(["fhegw", "token", "balance"]);
            cli.preload_keys().map_err(|e| e.to_string())?;
            assert!(std::env::var("FHEGW_USER_KEY").is_err());
            assert!(matches!(
                cli.command,
                Commands::Token {
                    command: TokenCommands::Balance { ref keys, .. }
                } if keys.private_key.is_some()
            ));
            Ok(())
        });
    }

    #[test]
    fn test_subcommands_parse() {
        let cli = Cli::parse_from([
            "fhegw",
            "gateway",
            "deploy",
            "--nonce",
            "3",
            "--key-env",
            "DEPLOYER_KEY",
        ]);
        assert!(matches!(
            cli.command,
            Commands::Gateway {
                command: GatewayCommands::Deploy { nonce: 3, .. }
            }
        ));

        let cli = Cli::parse_from(["fhegw", "token", "transfer", "--to", "0x02", "1337"]);
        assert!(matches!(
            cli.command,
            Commands::Token {
                command: TokenCommands::Transfer { amount: 1337, .. }
            }
        ));
    }
}
