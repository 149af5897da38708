//! Collaborator contracts for the gateway core.
//!
//! The core never performs I/O of its own beyond what these two seams expose. [`InvoiceLedger`] is the host side:
//! a read-only view of invoice state used by the idempotency guard. [`TransactionLookup`] is the provider side:
//! the remote transaction-detail query the return path depends on. Both are async and mockable, and the shipped
//! provider implementation lives in [`crate::integrations`].

use payssion_api::TransactionDetails;
use thiserror::Error;

use crate::types::InvoiceStatus;

#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Read access to the billing host's invoice state. The gateway only ever reads through this trait; applying a
/// transaction record to an invoice is the host's job.
#[allow(async_fn_in_trait)]
pub trait InvoiceLedger {
    /// Fetches the current status of the given invoice, or `None` if the host has no such invoice. An unknown
    /// invoice is treated as unpaid.
    async fn invoice_status(&self, invoice_id: &str) -> Result<Option<InvoiceStatus>, LedgerError>;
}

#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ProviderError(pub String);

impl From<payssion_api::PayssionApiError> for ProviderError {
    fn from(e: payssion_api::PayssionApiError) -> Self {
        Self(e.to_string())
    }
}

/// Remote transaction-detail lookup, keyed by the order token that was submitted when the payment was created.
/// A failure here (network fault, provider error, timeout) is a hard error for the return path.
#[allow(async_fn_in_trait)]
pub trait TransactionLookup {
    async fn transaction_details(&self, order_id: &str) -> Result<TransactionDetails, ProviderError>;
}
