use serde::{Deserialize, Serialize};

/// The local payment methods the gateway can offer at checkout.
pub const SUPPORTED_PAYMENT_METHODS: [&str; 14] = [
    "qris_id",
    "atm_id",
    "dana_id",
    "ovo_id",
    "enets_sg",
    "paynow_sg",
    "alipay_cn",
    "upi_in",
    "paytm_in",
    "bankcard_tr",
    "gcash_ph",
    "grabpay_ph",
    "kakaopay_kr",
    "creditcard_kr",
];

pub fn is_supported_payment_method(pm_id: &str) -> bool {
    SUPPORTED_PAYMENT_METHODS.contains(&pm_id)
}

/// An outbound payment-creation request. The client adds the `api_key` and `api_sig` fields when the request is
/// submitted; everything else is supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// The opaque order token identifying the invoices this payment covers.
    pub order_id: String,
    /// Decimal amount with two decimal places, e.g. "398.00".
    pub amount: String,
    pub currency: String,
    pub pm_id: String,
    pub description: String,
    pub payer_name: String,
    pub payer_email: String,
    pub return_url: String,
}

/// The provider's answer to a payment-creation call.
#[derive(Debug, Clone)]
pub struct PaymentCreated {
    /// Where to send the payer to complete the payment.
    pub redirect_url: String,
    pub transaction_id: Option<String>,
    pub state: Option<String>,
}

/// Details of an existing provider transaction, as returned by the order-id lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDetails {
    pub transaction_id: String,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    /// The provider payment state, e.g. "completed" or "failed". Older transactions may omit it.
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pm_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreateResponse {
    pub result_code: i64,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub transaction: Option<TransactionSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TransactionSummary {
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DetailsResponse {
    pub result_code: i64,
    pub transaction: TransactionDetails,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn catalogue_lookup() {
        assert!(is_supported_payment_method("gcash_ph"));
        assert!(is_supported_payment_method("qris_id"));
        assert!(!is_supported_payment_method("paypal"));
    }

    #[test]
    fn deserialize_details_response() {
        let json = r#"{
            "result_code": 200,
            "transaction": {
                "transaction_id": "T202308121212",
                "order_id": "NDI9MTAwMA==",
                "amount": 1000,
                "currency": "USD",
                "state": "completed",
                "pm_id": "gcash_ph"
            }
        }"#;
        let res: DetailsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(res.result_code, 200);
        assert_eq!(res.transaction.transaction_id, "T202308121212");
        assert_eq!(res.transaction.amount, 1000.0);
        assert_eq!(res.transaction.state.as_deref(), Some("completed"));
    }

    #[test]
    fn deserialize_create_response() {
        let json = r#"{
            "result_code": 200,
            "redirect_url": "https://sandbox.payssion.com/pay/WEB_123",
            "transaction": { "transaction_id": "WEB_123", "state": "pending" }
        }"#;
        let res: CreateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(res.result_code, 200);
        assert_eq!(res.redirect_url.as_deref(), Some("https://sandbox.payssion.com/pay/WEB_123"));
        assert_eq!(res.transaction.unwrap().state.as_deref(), Some("pending"));
    }

    #[test]
    fn details_tolerates_missing_state() {
        let json = r#"{ "result_code": 200, "transaction": { "transaction_id": "T1" } }"#;
        let res: DetailsResponse = serde_json::from_str(json).unwrap();
        assert!(res.transaction.state.is_none());
        assert_eq!(res.transaction.amount, 0.0);
    }
}
