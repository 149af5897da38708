//! # Payssion payment gateway core
//!
//! This crate plugs the Payssion local-payments provider into a billing host's nonmerchant-gateway contract. It owns
//! the parts of the integration with real protocol content:
//!
//! * the opaque **order token** that carries invoice references through the round trip to the provider and back
//!   ([`helpers`]),
//! * **signature verification** of asynchronous payment notifications (see [`ppg_common::signature`] for the two
//!   signing contexts),
//! * the **status mapping** from provider payment states to the host's transaction lifecycle ([`types`]), and
//! * the **reconcilers** ([`reconciler::Reconciler`]) that tie these together with an idempotency guard against
//!   already-paid invoices and produce normalized [`types::TransactionRecord`]s for the host ledger to apply.
//!
//! The crate never talks to host storage itself. The host supplies its side of the contract through the
//! [`traits::InvoiceLedger`] trait, and the provider is reached through [`traits::TransactionLookup`], implemented
//! for [`payssion_api::PayssionApi`] in [`integrations`].
//!
//! Everything here is stateless request/response. The only cross-call invariant is the idempotency guard, and it is
//! enforced by reading durable invoice state through the ledger, not by in-process locking; concurrent duplicate
//! notifications for the same invoice must be tolerated by the host's apply step.

pub mod checkout;
pub mod config;
pub mod errors;
pub mod helpers;
pub mod integrations;
pub mod reconciler;
pub mod traits;
pub mod types;


pub use config::{GatewayConfig, GatewayMode};
pub use errors::{GatewayError, ValidationError};
pub use reconciler::{NotificationOutcome, Reconciler};
