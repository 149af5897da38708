//! Payment initiation.
//!
//! Assembles the provider payment-creation request for a checkout: the invoice list is folded into the opaque
//! order token, the description and return URL reference the primary invoice, and the amount is rendered with two
//! decimal places. Submitting the request (and rendering the redirect page around the provider's answer) is the
//! host's job via [`payssion_api::PayssionApi::create_payment`].

use payssion_api::PaymentRequest;
use ppg_common::Money;

use crate::{config::GatewayConfig, helpers::encode_order_token, types::InvoiceRef};

/// The payer details the host passes along at checkout.
#[derive(Debug, Clone, Default)]
pub struct Payer {
    pub name: String,
    pub email: String,
}

/// Builds the payment-creation request for the given invoices.
///
/// `return_url` is the host's return endpoint including its query string; the primary invoice id is appended so
/// the return page can display the right invoice.
pub fn new_payment_request(
    config: &GatewayConfig,
    invoices: &[InvoiceRef],
    amount: Money,
    payer: &Payer,
    return_url: &str,
) -> PaymentRequest {
    let primary = invoices.first().map(|inv| inv.id.as_str()).unwrap_or_default();
    let description = if primary.is_empty() {
        "Payment for invoice".to_string()
    } else {
        format!("Payment for invoice #{primary}")
    };
    PaymentRequest {
        order_id: encode_order_token(invoices),
        amount: amount.to_string(),
        currency: config.settlement_currency.clone(),
        pm_id: config.pm_id.clone(),
        description,
        payer_name: payer.name.clone(),
        payer_email: payer.email.clone(),
        return_url: format!("{return_url}&invoice_id={primary}"),
    }
}

#[cfg(test)]
mod test {
    use ppg_common::Secret;

    use super::*;

    fn config() -> GatewayConfig {
        GatewayConfig {
            api_key: "key".to_string(),
            api_secret: Secret::new("secret".to_string()),
            pm_id: "gcash_ph".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn builds_a_request_around_the_primary_invoice() {
        let invoices = vec![InvoiceRef::new("42", "1000"), InvoiceRef::new("55", "250")];
        let payer = Payer { name: "Ada Lovelace".to_string(), email: "ada@example.com".to_string() };
        let request = new_payment_request(
            &config(),
            &invoices,
            Money::from_whole(1250),
            &payer,
            "https://billing.example.com/return?client_id=77",
        );
        assert_eq!(request.order_id, base64::encode("42=1000|55=250"));
        assert_eq!(request.amount, "1250.00");
        assert_eq!(request.currency, "USD");
        assert_eq!(request.pm_id, "gcash_ph");
        assert_eq!(request.description, "Payment for invoice #42");
        assert_eq!(request.return_url, "https://billing.example.com/return?client_id=77&invoice_id=42");
    }

    #[test]
    fn empty_invoice_list_still_builds() {
        let request = new_payment_request(&config(), &[], Money::ZERO, &Payer::default(), "https://x.test/r?a=1");
        assert_eq!(request.order_id, "");
        assert_eq!(request.description, "Payment for invoice");
        assert_eq!(request.return_url, "https://x.test/r?a=1&invoice_id=");
    }
}
