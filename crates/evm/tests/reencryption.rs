// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::{
    primitives::{address, Address, U256},
    signers::local::PrivateKeySigner,
};
use anyhow::Result;
use fhegw_evm::{GatewayError, Identity, ReencryptionService};
use fhegw_fhe::{ConfidentialBackend, EncryptedInputBuilder, InputBinding};
use fhegw_test_helpers::{add_tracing, LocalBackend};
use std::sync::Arc;

const TOKEN: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
const OTHER_TOKEN: Address = address!("0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512");
const CHAIN_ID: u64 = 31337;

fn service(backend: &Arc<LocalBackend>, user: &Identity, contract: Address) -> ReencryptionService {
    let backend: Arc<dyn ConfidentialBackend> = backend.clone();
    ReencryptionService::new(backend, user.clone(), contract, CHAIN_ID)
}

#[tokio::test]
async fn owner_recovers_balance() -> Result<()> {
    let _guard = add_tracing();
    let backend = Arc::new(LocalBackend::new()?);
    let alice = Identity::from_signer(PrivateKeySigner::random());

    let handle = backend.set_value(TOKEN, alice.address(), 1000);
    let value = service(&backend, &alice, TOKEN)
        .reencrypt_handle(handle)
        .await?;

    assert_eq!(value, 1000);
    Ok(())
}

#[tokio::test]
async fn other_identity_is_rejected() -> Result<()> {
    let backend = Arc::new(LocalBackend::new()?);
    let alice = Identity::from_signer(PrivateKeySigner::random());
    let mallory = Identity::from_signer(PrivateKeySigner::random());

    let handle = backend.set_value(TOKEN, alice.address(), 1000);
    let err = service(&backend, &mallory, TOKEN)
        .reencrypt_handle(handle)
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Reencryption(_)));
    Ok(())
}

#[tokio::test]
async fn authorization_is_bound_to_the_contract() -> Result<()> {
    let backend = Arc::new(LocalBackend::new()?);
    let alice = Identity::from_signer(PrivateKeySigner::random());

    let handle = backend.set_value(TOKEN, alice.address(), 7);
    let err = service(&backend, &alice, OTHER_TOKEN)
        .reencrypt_handle(handle)
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Reencryption(_)));
    Ok(())
}

#[tokio::test]
async fn unknown_handle_is_rejected() -> Result<()> {
    let backend = Arc::new(LocalBackend::new()?);
    let alice = Identity::from_signer(PrivateKeySigner::random());

    let err = service(&backend, &alice, TOKEN)
        .reencrypt_handle(U256::from(424242))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Reencryption(_)));
    Ok(())
}

#[tokio::test]
async fn repeated_requests_use_fresh_keys() -> Result<()> {
    let backend = Arc::new(LocalBackend::new()?);
    let alice = Identity::from_signer(PrivateKeySigner::random());
    let handle = backend.set_value(TOKEN, alice.address(), u64::MAX);
    let service = service(&backend, &alice, TOKEN);

    assert_eq!(service.reencrypt_handle(handle).await?, u64::MAX);
    assert_eq!(service.reencrypt_handle(handle).await?, u64::MAX);
    Ok(())
}

#[tokio::test]
async fn encrypted_input_round_trips_through_reencryption() -> Result<()> {
    let backend = Arc::new(LocalBackend::new()?);
    let alice = Identity::from_signer(PrivateKeySigner::random());

    let inputs = EncryptedInputBuilder::new(TOKEN, alice.address(), CHAIN_ID)
        .add64(1337)
        .encrypt(backend.as_ref())
        .await?;

    // the consuming contract accepts the proof only for the bound pair
    let binding = InputBinding::new(TOKEN, alice.address(), CHAIN_ID);
    assert_eq!(
        backend.verify_input_proof(&inputs.input_proof, &binding)?,
        inputs.handles
    );
    let replayed = InputBinding::new(OTHER_TOKEN, alice.address(), CHAIN_ID);
    assert!(backend
        .verify_input_proof(&inputs.input_proof, &replayed)
        .is_err());

    let handle = U256::from_be_bytes(inputs.handles[0].0);
    assert_eq!(backend.value_of(handle), Some(1337));
    assert_eq!(
        service(&backend, &alice, TOKEN)
            .reencrypt_handle(handle)
            .await?,
        1337
    );
    Ok(())
}
