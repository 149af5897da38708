use std::{fmt::Display, str::FromStr};

use ppg_common::Money;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//--------------------------------------      InvoiceRef       -------------------------------------------------------
/// A reference to a host invoice and the amount a payment should apply to it.
///
/// Both fields are kept as the strings that travel inside the order token, so that encoding and decoding the token
/// round-trips exactly. Use [`InvoiceRef::amount_value`] for arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRef {
    pub id: String,
    pub amount: String,
}

impl InvoiceRef {
    pub fn new<S1: Into<String>, S2: Into<String>>(id: S1, amount: S2) -> Self {
        Self { id: id.into(), amount: amount.into() }
    }

    /// The invoice amount in whole currency units, parsed leniently. A malformed amount counts as zero rather than
    /// poisoning the whole notification.
    pub fn amount_value(&self) -> Money {
        Money::truncating_parse(&self.amount)
    }
}

//--------------------------------------     InvoiceStatus     -------------------------------------------------------
/// The host-side status of an invoice, as reported by the billing platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Active,
    Paid,
    Approved,
    Proforma,
    Draft,
    Void,
}

impl InvoiceStatus {
    /// An invoice in any of these states has already been settled; a new notification against it must be rejected
    /// so that it cannot be credited twice.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Active | Self::Paid | Self::Approved)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid invoice status: {0}")]
pub struct InvoiceStatusConversionError(String);

impl FromStr for InvoiceStatus {
    type Err = InvoiceStatusConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "paid" => Ok(Self::Paid),
            "approved" => Ok(Self::Approved),
            "proforma" => Ok(Self::Proforma),
            "draft" => Ok(Self::Draft),
            "void" => Ok(Self::Void),
            other => Err(InvoiceStatusConversionError(other.to_string())),
        }
    }
}

//--------------------------------------     ProviderState     -------------------------------------------------------
/// A payment state as reported by the provider. The set of states the provider emits is open-ended; anything we do
/// not recognize is carried verbatim in `Other` and treated as still pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderState {
    Completed,
    PaidPartial,
    Failed,
    Expired,
    Other(String),
}

impl<S: AsRef<str>> From<S> for ProviderState {
    fn from(value: S) -> Self {
        match value.as_ref() {
            "completed" => Self::Completed,
            "paid_partial" => Self::PaidPartial,
            "failed" => Self::Failed,
            "expired" => Self::Expired,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Display for ProviderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::PaidPartial => write!(f, "paid_partial"),
            Self::Failed => write!(f, "failed"),
            Self::Expired => write!(f, "expired"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

impl ProviderState {
    /// Maps the provider state onto the host transaction lifecycle.
    ///
    /// `paid_partial` maps to approved like `completed` does, but note that only `completed` credits the paid
    /// amount; the reconcilers enforce that distinction.
    pub fn transaction_status(&self) -> TransactionStatus {
        match self {
            Self::Completed | Self::PaidPartial => TransactionStatus::Approved,
            Self::Failed | Self::Expired => TransactionStatus::Declined,
            Self::Other(_) => TransactionStatus::Pending,
        }
    }
}

//--------------------------------------   TransactionStatus   -------------------------------------------------------
/// The host's normalized transaction status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Approved,
    Declined,
    Pending,
    Error,
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approved => write!(f, "approved"),
            Self::Declined => write!(f, "declined"),
            Self::Pending => write!(f, "pending"),
            Self::Error => write!(f, "error"),
        }
    }
}

//-------------------------------------- NotificationPayload   -------------------------------------------------------
/// An asynchronous payment notification, exactly as delivered by the provider. Untrusted until the signature has
/// been verified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub pm_id: String,
    pub amount: f64,
    pub currency: String,
    /// The opaque order token that was submitted when the payment was created.
    pub order_id: String,
    #[serde(default)]
    pub state: Option<String>,
    pub notify_sig: String,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

impl NotificationPayload {
    /// The amount exactly as it must appear in the signature message. Whole numbers print without a decimal point,
    /// matching the provider's own rendering.
    pub fn amount_text(&self) -> String {
        format!("{}", self.amount)
    }

    pub fn provider_state(&self) -> Option<ProviderState> {
        self.state.as_deref().map(ProviderState::from)
    }
}

//--------------------------------------     ReturnParams      -------------------------------------------------------
/// Query parameters delivered when the payer's browser returns from the provider's checkout page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnParams {
    pub order_id: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

//--------------------------------------   TransactionRecord   -------------------------------------------------------
/// The normalized transaction handed to the host ledger. The core never writes host storage; it returns this record
/// for the host to apply to the referenced invoices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub client_id: Option<String>,
    /// The amount actually credited. Zero unless the provider state warrants crediting.
    pub amount: Money,
    pub currency: String,
    pub invoices: Vec<InvoiceRef>,
    pub status: TransactionStatus,
    /// Gateway-internal reference; the primary invoice id on the notification path.
    pub reference_id: Option<String>,
    pub transaction_id: Option<String>,
    pub parent_transaction_id: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn provider_states_map_to_host_statuses() {
        let table = [
            ("completed", TransactionStatus::Approved),
            ("paid_partial", TransactionStatus::Approved),
            ("failed", TransactionStatus::Declined),
            ("expired", TransactionStatus::Declined),
            ("chargeback", TransactionStatus::Pending),
            ("", TransactionStatus::Pending),
        ];
        for (state, expected) in table {
            assert_eq!(ProviderState::from(state).transaction_status(), expected, "state '{state}'");
        }
    }

    #[test]
    fn unrecognized_states_are_carried_verbatim() {
        assert_eq!(ProviderState::from("awaiting_confirm"), ProviderState::Other("awaiting_confirm".to_string()));
        assert_eq!(ProviderState::from("completed"), ProviderState::Completed);
    }

    #[test]
    fn settled_invoice_statuses() {
        assert!(InvoiceStatus::Active.is_settled());
        assert!(InvoiceStatus::Paid.is_settled());
        assert!(InvoiceStatus::Approved.is_settled());
        assert!(!InvoiceStatus::Proforma.is_settled());
        assert!(!InvoiceStatus::Void.is_settled());
        assert_eq!("PAID".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::Paid);
        assert!("overdue".parse::<InvoiceStatus>().is_err());
    }

    #[test]
    fn notification_amount_renders_like_the_provider() {
        let json = r#"{
            "pm_id": "gcash_ph",
            "amount": 1000,
            "currency": "USD",
            "order_id": "NDI9MTAwMA==",
            "state": "completed",
            "notify_sig": "abc123"
        }"#;
        let payload: NotificationPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.amount_text(), "1000");
        assert_eq!(payload.provider_state(), Some(ProviderState::Completed));
        assert!(payload.transaction_id.is_none());

        let payload = NotificationPayload { amount: 10.5, ..payload };
        assert_eq!(payload.amount_text(), "10.5");
    }

    #[test]
    fn invoice_amounts_parse_leniently() {
        assert_eq!(InvoiceRef::new("42", "1000").amount_value(), Money::from_whole(1000));
        assert_eq!(InvoiceRef::new("42", "oops").amount_value(), Money::ZERO);
    }
}
