use thiserror::Error;

use crate::traits::{LedgerError, ProviderError};

/// Hard failures. These abort processing, in contrast to [`ValidationError`]s, which annotate a notification
/// outcome without stopping the pipeline.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Provider lookup failed. {0}")]
    ProviderLookup(#[from] ProviderError),
    #[error("Invoice ledger failure. {0}")]
    Ledger(#[from] LedgerError),
    #[error("The gateway does not support {0} transactions")]
    UnsupportedOperation(&'static str),
}

/// A rejection raised while validating a payment notification.
///
/// These are advisory annotations rather than exceptions: validation records every condition that trips and still
/// produces a best-effort transaction record, so each condition is independently detectable by the host. The one
/// exception is [`ValidationError::InvoiceAlreadyPaid`], which also withholds the record so a settled invoice can
/// never be credited twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Invoice already paid")]
    InvoiceAlreadyPaid,
    #[error("Invalid invoice id")]
    InvalidInvoiceId,
}
