// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::address::{predict_from, PredictedAddress};
use crate::artifacts::ContractArtifact;
use crate::confirm::await_receipt;
use crate::gateway_sol::GatewayContract;
use crate::predeploy::{PersistReport, PredeployArtifacts};
use crate::provider::EthProvider;
use crate::{GatewayError, Result};
use alloy::{
    network::{ReceiptResponse, TransactionBuilder},
    primitives::{Address, Bytes, TxHash},
    providers::{Provider, WalletProvider},
    rpc::types::TransactionRequest,
    sol_types::SolConstructor,
};
use std::time::Duration;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayConstructorArgs {
    pub owner: Address,
    pub kms_verifier: Address,
}

impl GatewayConstructorArgs {
    pub fn abi_encode(&self) -> Vec<u8> {
        GatewayContract::constructorCall {
            _gatewayOwner: self.owner,
            _kmsVerifier: self.kms_verifier,
        }
        .abi_encode()
    }
}

#[derive(Debug)]
pub struct GatewayDeployment {
    pub predicted: PredictedAddress,
    pub address: Address,
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub persisted: PersistReport,
}

/// Predicts, publishes and then deploys the gateway contract
pub struct DeploymentCoordinator<P> {
    provider: EthProvider<P>,
    artifact: ContractArtifact,
    predeploy: PredeployArtifacts,
    confirmation_timeout: Duration,
}

impl<P: Provider + WalletProvider + Clone> DeploymentCoordinator<P> {
    pub fn new(
        provider: EthProvider<P>,
        artifact: ContractArtifact,
        predeploy: PredeployArtifacts,
        confirmation_timeout: Duration,
    ) -> Result<Self> {
        artifact.deploy_bytecode()?;
        Ok(Self {
            provider,
            artifact,
            predeploy,
            confirmation_timeout,
        })
    }

    /// Address the next deployment lands on if the deployer is at `expected_nonce`
    pub fn predict(&self, expected_nonce: u64) -> PredictedAddress {
        predict_from(self.provider.signer_address(), expected_nonce)
    }

    /// Deploy the gateway. Deployment is one-shot: nothing here retries, since a
    /// second attempt consumes another nonce and lands elsewhere.
    #[instrument(skip_all, fields(owner = %args.owner, expected_nonce = expected_nonce))]
    pub async fn deploy_gateway(
        &self,
        args: GatewayConstructorArgs,
        expected_nonce: u64,
    ) -> Result<GatewayDeployment> {
        let predicted = self.predict(expected_nonce);
        info!(
            deployer = %predicted.deployer,
            address = %predicted.address,
            "predicted gateway address"
        );

        let live_nonce = self
            .provider
            .pending_nonce(predicted.deployer)
            .await
            .map_err(|e| GatewayError::Deployment(e.to_string()))?;
        if live_nonce != expected_nonce {
            warn!(
                live_nonce,
                expected_nonce,
                "deployer nonce differs from the expected nonce, the gateway will not land on the predicted address"
            );
        }

        let persisted = self.predeploy.write_all(predicted.address).await;

        let mut code = self.artifact.deploy_bytecode()?.to_vec();
        code.extend(args.abi_encode());
        let tx = TransactionRequest::default().with_deploy_code(Bytes::from(code));

        let pending = self
            .provider
            .provider()
            .send_transaction(tx)
            .await
            .map_err(|e| GatewayError::Deployment(e.to_string()))?;
        let receipt = await_receipt(pending, self.confirmation_timeout)
            .await
            .map_err(|e| match e {
                GatewayError::Provider(reason) => GatewayError::Deployment(reason),
                other => other,
            })?;

        let tx_hash = ReceiptResponse::transaction_hash(&receipt);
        if !ReceiptResponse::status(&receipt) {
            return Err(GatewayError::Deployment(format!(
                "deployment transaction {tx_hash} reverted"
            )));
        }
        let address = ReceiptResponse::contract_address(&receipt).ok_or_else(|| {
            GatewayError::Deployment(format!("receipt for {tx_hash} has no contract address"))
        })?;

        if address != predicted.address {
            return Err(GatewayError::AddressMismatch {
                predicted: predicted.address,
                actual: address,
            });
        }

        info!(%address, %tx_hash, "gateway deployed");
        Ok(GatewayDeployment {
            predicted,
            address,
            tx_hash,
            block_number: receipt.block_number,
            persisted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_constructor_args_encoding() {
        let args = GatewayConstructorArgs {
            owner: address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            kms_verifier: address!("0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0"),
        };
        let encoded = args.abi_encode();
        assert_eq!(encoded.len(), 64);
        assert_eq!(&encoded[12..32], args.owner.as_slice());
        assert_eq!(&encoded[44..64], args.kms_verifier.as_slice());
    }
}
