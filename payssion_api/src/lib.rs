//! REST client for the Payssion local-payments API.
//!
//! The provider exposes two calls the gateway cares about: creating a payment (which returns a redirect URL to send
//! the payer to) and looking up the details of an existing transaction by order id. Both are form-encoded POSTs
//! against the live or sandbox host, selected by [`PayssionConfig`].

mod api;
mod config;
mod data_objects;
mod error;

pub use api::PayssionApi;
pub use config::PayssionConfig;
pub use data_objects::{
    is_supported_payment_method,
    PaymentCreated,
    PaymentRequest,
    TransactionDetails,
    SUPPORTED_PAYMENT_METHODS,
};
pub use error::PayssionApiError;
