//! # Notification and return reconciliation
//!
//! The reconciler is the orchestration layer of the gateway core. Both entry points are stateless
//! request/response calls that end in a normalized [`TransactionRecord`] for the host ledger:
//!
//! * [`Reconciler::process_notification`] handles the provider's asynchronous payment notifications. It decodes
//!   the order token, runs the idempotency guard against the host's invoice state, verifies the notification
//!   signature and maps the provider state. Validation failures are collected as advisory annotations in the
//!   [`NotificationOutcome`] rather than aborting the pipeline; only the already-paid guard withholds the record.
//! * [`Reconciler::process_return`] handles the payer's browser returning from the provider's checkout page. This
//!   path cannot trust anything in the query string, so it asks the provider for the transaction details and
//!   builds the record from that answer. A failed lookup is a hard error.

use log::*;
use ppg_common::{
    signature::{verify_notify_signature, NotifyFields},
    Money,
};

use crate::{
    config::GatewayConfig,
    errors::{GatewayError, ValidationError},
    helpers::decode_order_token,
    traits::{InvoiceLedger, TransactionLookup},
    types::{InvoiceRef, NotificationPayload, ProviderState, ReturnParams, TransactionRecord, TransactionStatus},
};

/// The result of validating an asynchronous payment notification.
///
/// `errors` lists every validation condition that tripped; each is independently detectable. A best-effort record
/// accompanies advisory rejections, so hosts that choose to ignore an annotation still receive consistent output.
/// No record is present when the notification carried no recognizable payment state (a no-op, not an error) or
/// when the referenced invoice was already settled.
#[derive(Debug, Clone)]
pub struct NotificationOutcome {
    pub record: Option<TransactionRecord>,
    pub errors: Vec<ValidationError>,
}

impl NotificationOutcome {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct Reconciler<L, P> {
    config: GatewayConfig,
    ledger: L,
    provider: P,
}

impl<L, P> Reconciler<L, P>
where
    L: InvoiceLedger,
    P: TransactionLookup,
{
    pub fn new(config: GatewayConfig, ledger: L, provider: P) -> Self {
        Self { config, ledger, provider }
    }

    /// Validates an asynchronous payment notification and reconciles it into a transaction record.
    ///
    /// Only a ledger backend failure is returned as `Err`; every protocol-level rejection is reported through the
    /// outcome's error list instead.
    pub async fn process_notification(
        &self,
        payload: &NotificationPayload,
    ) -> Result<NotificationOutcome, GatewayError> {
        trace!("🧾️ Processing payment notification for order token [{}]", payload.order_id);
        let invoices = decode_order_token(&payload.order_id);
        let mut errors = Vec::new();

        // Idempotency guard. The primary invoice is the first one in the token.
        let mut already_paid = false;
        if let Some(primary) = invoices.first() {
            if let Some(status) = self.ledger.invoice_status(&primary.id).await? {
                if status.is_settled() {
                    warn!("🧾️ Notification for invoice #{} which is already settled ({status:?})", primary.id);
                    errors.push(ValidationError::InvoiceAlreadyPaid);
                    already_paid = true;
                }
            }
        }

        let amount = payload.amount_text();
        let fields = NotifyFields {
            api_key: &self.config.api_key,
            pm_id: &payload.pm_id,
            amount: &amount,
            currency: &payload.currency,
            order_id: &payload.order_id,
            state: payload.state.as_deref().unwrap_or(""),
        };
        if !verify_notify_signature(self.config.signature_scheme, &fields, &self.config.api_secret, &payload.notify_sig)
        {
            warn!("🧾️ Notification signature mismatch for order token [{}]", payload.order_id);
            errors.push(ValidationError::InvalidSignature);
        }

        if payload.order_id.is_empty() {
            errors.push(ValidationError::InvalidInvoiceId);
        }

        // A notification without a recognizable payment state carries nothing to reconcile. This is a no-op, not
        // an error; any annotations collected so far are still reported.
        let Some(state) = payload.provider_state() else {
            debug!("🧾️ Notification without a payment state. Nothing to reconcile.");
            return Ok(NotificationOutcome { record: None, errors });
        };

        // The aggregate is credited only when the payment completed in full. paid_partial maps to an approved
        // transaction, but credits nothing.
        let total: Money = invoices.iter().map(InvoiceRef::amount_value).sum();
        let paid_amount = if state == ProviderState::Completed { total } else { Money::ZERO };

        let status = state.transaction_status();
        debug!(
            "🧾️ Notification reconciled. Provider state '{state}' maps to '{status}'. Credited amount: {paid_amount}"
        );
        let record = (!already_paid).then(|| TransactionRecord {
            client_id: None,
            amount: paid_amount,
            currency: self.config.settlement_currency.clone(),
            reference_id: invoices.first().map(|inv| inv.id.clone()),
            invoices,
            status,
            transaction_id: payload.transaction_id.clone(),
            parent_transaction_id: None,
        });
        Ok(NotificationOutcome { record, errors })
    }

    /// Reconciles a browser return from the provider's checkout page.
    ///
    /// The provider is queried for the transaction details; if that call fails, the whole reconciliation fails.
    /// The received amount is the transaction amount less the provider fee, and only when the payment completed.
    pub async fn process_return(&self, params: &ReturnParams) -> Result<TransactionRecord, GatewayError> {
        trace!("↩️ Processing return for order token [{}]", params.order_id);
        let details = self.provider.transaction_details(&params.order_id).await?;
        let state = details.state.as_deref().map(ProviderState::from);
        let status = state.as_ref().map(ProviderState::transaction_status).unwrap_or(TransactionStatus::Error);
        let received_amount = if state == Some(ProviderState::Completed) {
            Money::from_decimal(details.amount).less_fee_bps(self.config.fee_bps)
        } else {
            Money::ZERO
        };
        debug!("↩️ Return reconciled to '{status}'. Received amount: {received_amount}");
        Ok(TransactionRecord {
            client_id: params.client_id.clone(),
            amount: received_amount,
            currency: self.config.settlement_currency.clone(),
            invoices: decode_order_token(&params.order_id),
            status,
            reference_id: None,
            transaction_id: params.transaction_id.clone(),
            parent_transaction_id: None,
        })
    }

    /// The provider offers no refund API. Always rejected.
    pub fn refund(&self, _reference_id: &str, _transaction_id: &str, _amount: Money) -> Result<(), GatewayError> {
        Err(GatewayError::UnsupportedOperation("refund"))
    }

    /// The provider offers no void API. Always rejected.
    pub fn void(&self, _reference_id: &str, _transaction_id: &str) -> Result<(), GatewayError> {
        Err(GatewayError::UnsupportedOperation("void"))
    }
}
