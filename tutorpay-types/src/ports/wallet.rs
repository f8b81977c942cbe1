//! Wallet gateway port.
//!
//! The wallet collaborator executes the actual on-chain transfer. This core
//! never touches keys or builds transactions; it hands over base units and
//! an opaque mint address and gets back an opaque signature.

use crate::domain::Token;

/// Error type for wallet operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("Wallet rejected the transfer: {0}")]
    Rejected(String),

    #[error("Wallet unavailable: {0}")]
    Unavailable(String),
}

/// Result of a submitted transfer.
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    /// Transaction signature, opaque to this crate
    pub signature: String,
}

/// Port trait for the external wallet collaborator.
#[async_trait::async_trait]
pub trait WalletGateway: Send + Sync {
    /// Submits a transfer of `base_units` of `token` to `recipient`.
    async fn send_transfer(
        &self,
        recipient: &str,
        token: &Token,
        base_units: u64,
        memo: Option<&str>,
    ) -> Result<TransferReceipt, WalletError>;
}
