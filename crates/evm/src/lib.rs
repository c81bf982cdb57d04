// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

pub mod address;
pub mod artifacts;
pub mod confirm;
pub mod deployer;
mod error;
pub mod gateway_sol;
pub mod identity;
pub mod predeploy;
pub mod provider;
pub mod reencrypt;
pub mod relayer;
pub mod token;
pub mod token_sol;

pub use address::{parse_address, predict_create_address, predict_from, PredictedAddress};
pub use artifacts::{read_env_value, ContractArtifact};
pub use deployer::{DeploymentCoordinator, GatewayConstructorArgs, GatewayDeployment};
pub use error::{GatewayError, Result};
pub use identity::{take_env_secret, Identity};
pub use predeploy::{read_predeployed_address, PersistReport, PredeployArtifacts};
pub use provider::{EthProvider, ProviderConfig};
pub use reencrypt::ReencryptionService;
pub use relayer::{RelayerAuthorization, RelayerAuthorizer};
pub use token::{ConfidentialTokenClient, TokenDetails, TokenRead, TokenTx, TokenWrite};
