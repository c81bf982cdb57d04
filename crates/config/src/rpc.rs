// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RpcProtocol {
    Http,
    Https,
    Ws,
    Wss,
}

impl RpcProtocol {
    fn from_scheme(scheme: &str) -> Result<Self> {
        Ok(match scheme {
            "http" => RpcProtocol::Http,
            "https" => RpcProtocol::Https,
            "ws" => RpcProtocol::Ws,
            "wss" => RpcProtocol::Wss,
            _ => bail!("Invalid protocol. Expected: http://, https://, ws://, wss://"),
        })
    }

    pub fn is_websocket(&self) -> bool {
        matches!(self, RpcProtocol::Ws | RpcProtocol::Wss)
    }

    pub fn is_secure(&self) -> bool {
        matches!(self, RpcProtocol::Https | RpcProtocol::Wss)
    }
}

/// A validated JSON-RPC endpoint of the target network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RpcUrl {
    protocol: RpcProtocol,
    url: Url,
}

impl RpcUrl {
    pub fn from_url(url: &str) -> Result<Self> {
        let parsed = Url::parse(url).context("Invalid URL format")?;
        let protocol = RpcProtocol::from_scheme(parsed.scheme())?;

        if parsed.host_str().is_none() {
            bail!("URL must contain a host");
        }

        Ok(RpcUrl {
            protocol,
            url: parsed,
        })
    }

    pub fn protocol(&self) -> RpcProtocol {
        self.protocol
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn is_websocket(&self) -> bool {
        self.protocol.is_websocket()
    }

    pub fn is_secure(&self) -> bool {
        self.protocol.is_secure()
    }

    pub fn as_http_url(&self) -> Result<String> {
        self.with_scheme(false)
    }

    pub fn as_ws_url(&self) -> Result<String> {
        self.with_scheme(true)
    }

    fn with_scheme(&self, websocket: bool) -> Result<String> {
        if self.protocol.is_websocket() == websocket {
            return Ok(self.url.to_string());
        }

        let scheme = match (websocket, self.protocol.is_secure()) {
            (true, true) => "wss",
            (true, false) => "ws",
            (false, true) => "https",
            (false, false) => "http",
        };

        let mut parsed = self.url.clone();
        parsed
            .set_scheme(scheme)
            .map_err(|_| anyhow!("{scheme} is a valid scheme for {}", self.url))?;
        Ok(parsed.to_string())
    }
}

#[derive(Debug, Hash, Eq, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(tag = "type", content = "credentials")]
pub enum RpcAuth {
    #[default]
    None,
    Basic {
        username: String,
        password: String,
    },
    Bearer(String),
}
