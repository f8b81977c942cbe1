//! Payment attempt state machine.
//!
//! A single attempt moves strictly forward:
//! Quoting -> Validated -> AwaitingWalletConfirmation -> Submitted -> Confirmed | Failed.
//! Only `Quoting` may re-enter itself (re-quote on amount/token/currency
//! change). `Failed` is reachable from `Validated`, `AwaitingWalletConfirmation`,
//! and `Submitted`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::quote::PaymentQuote;
use crate::error::DomainError;

/// Unique identifier for a PaymentAttempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PaymentId(Uuid);

impl PaymentId {
    /// Creates a new random PaymentId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentState {
    Quoting,
    Validated,
    AwaitingWalletConfirmation,
    Submitted,
    Confirmed,
    Failed,
}

impl PaymentState {
    /// Stable name used in transition errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            PaymentState::Quoting => "QUOTING",
            PaymentState::Validated => "VALIDATED",
            PaymentState::AwaitingWalletConfirmation => "AWAITING_WALLET_CONFIRMATION",
            PaymentState::Submitted => "SUBMITTED",
            PaymentState::Confirmed => "CONFIRMED",
            PaymentState::Failed => "FAILED",
        }
    }

    /// True once no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentState::Confirmed | PaymentState::Failed)
    }
}

impl std::fmt::Display for PaymentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One attempt to pay a quote.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentAttempt {
    /// Unique identifier
    pub id: PaymentId,
    /// The quote being paid
    pub quote: PaymentQuote,
    /// Current lifecycle state
    pub state: PaymentState,
    /// Transaction signature reported by the wallet collaborator
    pub signature: Option<String>,
    /// Reason recorded when the attempt fails
    pub failure_reason: Option<String>,
    /// When the attempt started
    pub created_at: DateTime<Utc>,
}

impl PaymentAttempt {
    /// Starts a new attempt in the `Quoting` state.
    pub fn new(quote: PaymentQuote) -> Self {
        Self {
            id: PaymentId::new(),
            quote,
            state: PaymentState::Quoting,
            signature: None,
            failure_reason: None,
            created_at: Utc::now(),
        }
    }

    fn transition(&mut self, from: PaymentState, to: PaymentState) -> Result<(), DomainError> {
        if self.state != from {
            return Err(DomainError::InvalidTransition {
                from: self.state.name(),
                to: to.name(),
            });
        }
        self.state = to;
        Ok(())
    }

    /// Replaces the quote while still quoting. Any other state rejects.
    pub fn requote(&mut self, quote: PaymentQuote) -> Result<(), DomainError> {
        if self.state != PaymentState::Quoting {
            return Err(DomainError::InvalidTransition {
                from: self.state.name(),
                to: PaymentState::Quoting.name(),
            });
        }
        self.quote = quote;
        Ok(())
    }

    /// Quoting -> Validated.
    pub fn mark_validated(&mut self) -> Result<(), DomainError> {
        self.transition(PaymentState::Quoting, PaymentState::Validated)
    }

    /// Validated -> AwaitingWalletConfirmation.
    pub fn begin_wallet_confirmation(&mut self) -> Result<(), DomainError> {
        self.transition(
            PaymentState::Validated,
            PaymentState::AwaitingWalletConfirmation,
        )
    }

    /// AwaitingWalletConfirmation -> Submitted, recording the signature.
    pub fn mark_submitted(&mut self, signature: String) -> Result<(), DomainError> {
        self.transition(
            PaymentState::AwaitingWalletConfirmation,
            PaymentState::Submitted,
        )?;
        self.signature = Some(signature);
        Ok(())
    }

    /// Submitted -> Confirmed.
    pub fn mark_confirmed(&mut self) -> Result<(), DomainError> {
        self.transition(PaymentState::Submitted, PaymentState::Confirmed)
    }

    /// Fails the attempt from any in-flight state past quoting.
    pub fn mark_failed(&mut self, reason: impl Into<String>) -> Result<(), DomainError> {
        match self.state {
            PaymentState::Validated
            | PaymentState::AwaitingWalletConfirmation
            | PaymentState::Submitted => {
                self.state = PaymentState::Failed;
                self.failure_reason = Some(reason.into());
                Ok(())
            }
            other => Err(DomainError::InvalidTransition {
                from: other.name(),
                to: PaymentState::Failed.name(),
            }),
        }
    }
}
