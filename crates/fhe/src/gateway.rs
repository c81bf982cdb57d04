// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::backend::{
    ConfidentialBackend, InputAttestation, InputAttestationRequest, ReencryptRequest,
};
use crate::{FheError, Result};
use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, trace};
use url::Url;

const KEY_ENDPOINT: &str = "keyurl";
const INPUT_PROOF_ENDPOINT: &str = "input-proof";
const REENCRYPT_ENDPOINT: &str = "reencrypt";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkKeyResponse {
    pub public_key: Bytes,
}

/// Body of a re-encryption call. Hex fields carry no `0x` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReencryptPayload {
    pub signature: String,
    pub client_address: Address,
    pub enc_key: String,
    pub ciphertext_handle: String,
    pub eip712_verifying_contract: Address,
}

impl From<&ReencryptRequest> for ReencryptPayload {
    fn from(request: &ReencryptRequest) -> Self {
        Self {
            signature: hex::encode(&request.signature),
            client_address: request.user_address,
            enc_key: hex::encode(&request.public_key),
            ciphertext_handle: hex::encode(B256::from(request.handle)),
            eip712_verifying_contract: request.contract_address,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReencryptResponse {
    pub ciphertext: Bytes,
}

/// Client for a confidential computation gateway speaking JSON over HTTP
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base: Url,
    client: Client,
}

impl HttpGateway {
    pub fn new(base: Url) -> Self {
        Self::with_client(base, Client::new())
    }

    pub fn with_client(mut base: Url, client: Client) -> Self {
        // keep the last path segment when joining endpoints
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { base, client }
    }

    pub fn endpoint(&self, name: &str) -> Result<Url> {
        Ok(self.base.join(name)?)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(FheError::Rejected(format!("{status}: {body}")));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FheError::Backend(format!("{status}: {body}")));
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ConfidentialBackend for HttpGateway {
    async fn network_public_key(&self) -> Result<Bytes> {
        let url = self.endpoint(KEY_ENDPOINT)?;
        debug!(%url, "fetching network public key");
        let response = self.client.get(url).send().await?;
        let key: NetworkKeyResponse = Self::read_json(response).await?;
        Ok(key.public_key)
    }

    async fn attest_inputs(&self, request: &InputAttestationRequest) -> Result<InputAttestation> {
        let url = self.endpoint(INPUT_PROOF_ENDPOINT)?;
        debug!(%url, handles = request.handles.len(), "requesting input attestation");
        let response = self.client.post(url).json(request).send().await?;
        Self::read_json(response).await
    }

    async fn reencrypt(&self, request: &ReencryptRequest) -> Result<Bytes> {
        let url = self.endpoint(REENCRYPT_ENDPOINT)?;
        let payload = ReencryptPayload::from(request);
        trace!(handle = %payload.ciphertext_handle, "requesting re-encryption");
        let response = self.client.post(url).json(&payload).send().await?;
        let body: ReencryptResponse = Self::read_json(response).await?;
        Ok(body.ciphertext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, U256};
    use serde_json::json;

    #[test]
    fn test_endpoints_keep_base_path() -> Result<()> {
        let gateway = HttpGateway::new(Url::parse("http://localhost:7077/api/v1")?);
        assert_eq!(
            gateway.endpoint(REENCRYPT_ENDPOINT)?.as_str(),
            "http://localhost:7077/api/v1/reencrypt"
        );

        let gateway = HttpGateway::new(Url::parse("http://localhost:7077")?);
        assert_eq!(
            gateway.endpoint(KEY_ENDPOINT)?.as_str(),
            "http://localhost:7077/keyurl"
        );
        Ok(())
    }

    #[test]
    fn test_reencrypt_payload_shape() {
        let request = ReencryptRequest {
            handle: U256::from(0xabcdu64),
            public_key: Bytes::from(vec![0xde, 0xad]),
            signature: Bytes::from(vec![0x01, 0x02]),
            contract_address: address!("0x5FbDB2315678afecb367f032d93F642f64180aa3"),
            user_address: address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            chain_id: 31337,
        };

        let value = serde_json::to_value(ReencryptPayload::from(&request)).unwrap();
        assert_eq!(value["signature"], json!("0102"));
        assert_eq!(value["enc_key"], json!("dead"));
        assert_eq!(
            value["ciphertext_handle"],
            json!(format!("{}abcd", "0".repeat(60)))
        );
        assert_eq!(
            value["client_address"]
                .as_str()
                .unwrap()
                .to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
        assert!(value.get("eip712_verifying_contract").is_some());
    }

    #[test]
    fn test_key_response_parses_hex() {
        let parsed: NetworkKeyResponse =
            serde_json::from_value(json!({ "public_key": "0x0102ff" })).unwrap();
        assert_eq!(parsed.public_key, Bytes::from(vec![1, 2, 255]));
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_an_error() -> Result<()> {
        // port 9 (discard) is not expected to serve http
        let gateway = HttpGateway::new(Url::parse("http://127.0.0.1:9")?);
        assert!(gateway.network_public_key().await.is_err());
        Ok(())
    }
}
