// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::{GatewayError, Result};
use alloy::{
    network::{Ethereum, ReceiptResponse},
    primitives::TxHash,
    providers::PendingTransactionBuilder,
    rpc::types::TransactionReceipt,
};
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// Wait for a sent transaction to be mined, giving up after `limit`
pub async fn await_receipt(
    pending: PendingTransactionBuilder<Ethereum>,
    limit: Duration,
) -> Result<TransactionReceipt> {
    let tx_hash = *pending.tx_hash();
    debug!(%tx_hash, "waiting for confirmation");

    match timeout(limit, pending.get_receipt()).await {
        Ok(Ok(receipt)) => Ok(receipt),
        Ok(Err(err)) => Err(GatewayError::Provider(format!(
            "could not fetch receipt for {tx_hash}: {err}"
        ))),
        Err(_) => Err(GatewayError::Timeout {
            tx_hash,
            waited: limit,
        }),
    }
}

/// A mined receipt whose status is not 1 becomes `TransactionReverted`
pub fn ensure_success(receipt: &TransactionReceipt) -> Result<TxHash> {
    let tx_hash = ReceiptResponse::transaction_hash(receipt);
    if !ReceiptResponse::status(receipt) {
        return Err(GatewayError::TransactionReverted { tx_hash });
    }
    Ok(tx_hash)
}

/// Await a receipt and require success
pub async fn confirm_success(
    pending: PendingTransactionBuilder<Ethereum>,
    limit: Duration,
) -> Result<TransactionReceipt> {
    let receipt = await_receipt(pending, limit).await?;
    ensure_success(&receipt)?;
    Ok(receipt)
}

/// Sending fails early when gas estimation hits a revert. Keep that distinct from
/// transport problems.
pub fn classify_send_error(err: impl ToString) -> GatewayError {
    let message = err.to_string();
    if message.to_lowercase().contains("revert") {
        GatewayError::CallReverted(message)
    } else {
        GatewayError::Provider(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_send_error() {
        assert!(matches!(
            classify_send_error("server returned an error response: error code 3: execution reverted"),
            GatewayError::CallReverted(_)
        ));
        assert!(matches!(
            classify_send_error("connection refused"),
            GatewayError::Provider(_)
        ));
    }
}
