// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::identity::Identity;
use crate::{GatewayError, Result};
use alloy::{
    primitives::Address,
    providers::{Provider, ProviderBuilder, WalletProvider},
    transports::{
        http::{
            reqwest::{
                header::{HeaderMap, HeaderValue, AUTHORIZATION},
                Client, Url,
            },
            Http,
        },
        ws::WsConnect,
        Authorization,
    },
};
use base64::{engine::general_purpose::STANDARD, Engine};
use fhegw_config::{RpcAuth, RpcUrl};
use std::sync::Arc;

pub trait AuthConversions {
    fn to_header_value(&self) -> Option<HeaderValue>;
    fn to_ws_auth(&self) -> Option<Authorization>;
}

impl AuthConversions for RpcAuth {
    fn to_header_value(&self) -> Option<HeaderValue> {
        match self {
            RpcAuth::None => None,
            RpcAuth::Basic { username, password } => {
                let credentials = STANDARD.encode(format!("{}:{}", username, password));
                HeaderValue::from_str(&format!("Basic {}", credentials)).ok()
            }
            RpcAuth::Bearer(token) => HeaderValue::from_str(&format!("Bearer {}", token)).ok(),
        }
    }

    fn to_ws_auth(&self) -> Option<Authorization> {
        match self {
            RpcAuth::None => None,
            RpcAuth::Basic { username, password } => Some(Authorization::basic(username, password)),
            RpcAuth::Bearer(token) => Some(Authorization::bearer(token)),
        }
    }
}

/// A connected provider together with the chain it talks to
#[derive(Clone)]
pub struct EthProvider<P> {
    provider: Arc<P>,
    chain_id: u64,
}

impl<P: Provider + Clone> EthProvider<P> {
    pub async fn new(provider: P) -> Result<Self> {
        let chain_id = provider
            .get_chain_id()
            .await
            .map_err(GatewayError::provider)?;
        Ok(Self {
            provider: Arc::new(provider),
            chain_id,
        })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub async fn has_code(&self, address: Address) -> Result<bool> {
        let code = self
            .provider
            .get_code_at(address)
            .await
            .map_err(GatewayError::provider)?;
        Ok(!code.is_empty())
    }

    pub async fn pending_nonce(&self, address: Address) -> Result<u64> {
        self.provider
            .get_transaction_count(address)
            .pending()
            .await
            .map_err(GatewayError::provider)
    }
}

impl<P: Provider + WalletProvider + Clone> EthProvider<P> {
    /// Address transactions sent through this provider are signed by
    pub fn signer_address(&self) -> Address {
        self.provider.default_signer_address()
    }
}

pub struct ProviderConfig {
    rpc: RpcUrl,
    auth: RpcAuth,
}

impl ProviderConfig {
    pub fn new(rpc: RpcUrl, auth: RpcAuth) -> Self {
        Self { rpc, auth }
    }

    pub async fn create_readonly_provider(&self) -> Result<EthProvider<impl Provider + Clone>> {
        let provider = if self.rpc.is_websocket() {
            ProviderBuilder::new()
                .connect_ws(self.create_ws_connect()?)
                .await
                .map_err(|e| {
                    GatewayError::Provider(format!(
                        "Failed to connect to WebSocket RPC {}: {e}",
                        self.rpc.url()
                    ))
                })?
        } else {
            ProviderBuilder::new().connect_client(self.create_http_client()?)
        };

        EthProvider::new(provider).await
    }

    pub async fn create_signer_provider(
        &self,
        identity: &Identity,
    ) -> Result<EthProvider<impl Provider + WalletProvider + Clone>> {
        let provider = if self.rpc.is_websocket() {
            ProviderBuilder::new()
                .wallet(identity.wallet())
                .connect_ws(self.create_ws_connect()?)
                .await
                .map_err(|e| {
                    GatewayError::Provider(format!(
                        "Failed to connect to WebSocket RPC {}: {e}",
                        self.rpc.url()
                    ))
                })?
        } else {
            ProviderBuilder::new()
                .wallet(identity.wallet())
                .connect_client(self.create_http_client()?)
        };

        EthProvider::new(provider).await
    }

    fn create_ws_connect(&self) -> Result<WsConnect> {
        let mut ws_connect = WsConnect::new(
            self.rpc
                .as_ws_url()
                .map_err(GatewayError::provider)?,
        );

        if let Some(auth) = self.auth.to_ws_auth() {
            ws_connect = ws_connect.with_auth(auth);
        }

        Ok(ws_connect)
    }

    fn create_http_client(&self) -> Result<alloy::rpc::client::RpcClient> {
        let mut headers = HeaderMap::new();
        if let Some(auth_header) = self.auth.to_header_value() {
            headers.insert(AUTHORIZATION, auth_header);
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GatewayError::Provider(format!("Failed to create HTTP client: {e}")))?;

        let url = self
            .rpc
            .as_http_url()
            .map_err(GatewayError::provider)?
            .parse::<Url>()
            .map_err(GatewayError::provider)?;
        let http = Http::with_client(client, url);
        Ok(alloy::rpc::client::RpcClient::new(http, false))
    }
}
