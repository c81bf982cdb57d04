// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::sol;

sol! {
    #[derive(Debug)]
    #[sol(rpc)]
    contract GatewayContract {
        constructor(address _gatewayOwner, address _kmsVerifier);
        function addRelayer(address relayerAddress) external;
        function isRelayer(address account) external view returns (bool);
        function owner() external view returns (address);
    }
}

/// Entry points the relayer client calls
pub const GATEWAY_RELAYER_FUNCTIONS: &[&str] = &["addRelayer", "isRelayer"];
