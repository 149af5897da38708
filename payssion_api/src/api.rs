use std::sync::Arc;

use log::*;
use ppg_common::signature::{request_signature, RequestFields};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    config::PayssionConfig,
    data_objects::{CreateResponse, DetailsResponse, PaymentCreated, PaymentRequest, TransactionDetails},
    PayssionApiError,
};

#[derive(Clone)]
pub struct PayssionApi {
    config: PayssionConfig,
    client: Arc<Client>,
}

impl PayssionApi {
    pub fn new(config: PayssionConfig) -> Result<Self, PayssionApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PayssionApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// Creates a new payment with the provider and returns the redirect URL the payer must be sent to.
    pub async fn create_payment(&self, request: &PaymentRequest) -> Result<PaymentCreated, PayssionApiError> {
        let form = self.creation_form(request);
        let response: CreateResponse = self.post_form("/payment/create", &form).await?;
        if response.result_code != 200 {
            return Err(PayssionApiError::ResultCode(response.result_code));
        }
        let redirect_url = response
            .redirect_url
            .ok_or_else(|| PayssionApiError::ResponseError("Payment created without a redirect URL".to_string()))?;
        let (transaction_id, state) =
            response.transaction.map(|t| (t.transaction_id, t.state)).unwrap_or_default();
        debug!("💳️ Payment created with the provider. Redirecting payer to {redirect_url}");
        Ok(PaymentCreated { redirect_url, transaction_id, state })
    }

    /// Looks up the details of an existing transaction, keyed by the order id that was submitted when the payment
    /// was created.
    pub async fn payment_details(&self, order_id: &str) -> Result<TransactionDetails, PayssionApiError> {
        let form = vec![("api_key", self.config.api_key.clone()), ("order_id", order_id.to_string())];
        let response: DetailsResponse = self.post_form("/payment/details", &form).await?;
        if response.result_code != 200 {
            return Err(PayssionApiError::ResultCode(response.result_code));
        }
        trace!("💳️ Transaction details fetched for order {order_id}");
        Ok(response.transaction)
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, String)],
    ) -> Result<T, PayssionApiError> {
        let url = format!("{}{path}", self.config.base_url());
        trace!("Sending provider request: {url}");
        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(|e| PayssionApiError::RequestError(e.to_string()))?;
        if response.status().is_success() {
            response.json::<T>().await.map_err(|e| PayssionApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| PayssionApiError::ResponseError(e.to_string()))?;
            Err(PayssionApiError::QueryError { status, message })
        }
    }

    fn creation_form(&self, request: &PaymentRequest) -> Vec<(&'static str, String)> {
        let fields = RequestFields {
            api_key: &self.config.api_key,
            pm_id: &request.pm_id,
            amount: &request.amount,
            currency: &request.currency,
            order_id: &request.order_id,
        };
        let api_sig = request_signature(self.config.signature_scheme, &fields, &self.config.api_secret);
        vec![
            ("api_key", self.config.api_key.clone()),
            ("pm_id", request.pm_id.clone()),
            ("amount", request.amount.clone()),
            ("currency", request.currency.clone()),
            ("order_id", request.order_id.clone()),
            ("description", request.description.clone()),
            ("payer_name", request.payer_name.clone()),
            ("payer_email", request.payer_email.clone()),
            ("return_url", request.return_url.clone()),
            ("api_sig", api_sig),
        ]
    }
}

#[cfg(test)]
mod test {
    use ppg_common::{signature::SignatureScheme, Secret};

    use super::*;

    fn api() -> PayssionApi {
        let config = PayssionConfig {
            api_key: "apikey".to_string(),
            api_secret: Secret::new("topsecret".to_string()),
            signature_scheme: SignatureScheme::LegacyMd5,
            sandbox: true,
            ..Default::default()
        };
        PayssionApi::new(config).unwrap()
    }

    #[test]
    fn creation_form_is_signed_over_the_request_field_order() {
        let request = PaymentRequest {
            order_id: "b3JkZXI=".to_string(),
            amount: "100.00".to_string(),
            currency: "USD".to_string(),
            pm_id: "gcash_ph".to_string(),
            description: "Payment for invoice #42".to_string(),
            payer_name: "Ada Lovelace".to_string(),
            payer_email: "ada@example.com".to_string(),
            return_url: "https://billing.example.com/return?invoice_id=42".to_string(),
        };
        let form = api().creation_form(&request);
        let sig = form.iter().find(|(k, _)| *k == "api_sig").map(|(_, v)| v.clone()).unwrap();
        assert_eq!(sig, "76776cbc304fd9d67b3798876a438dae");
        assert_eq!(form[0], ("api_key", "apikey".to_string()));
    }
}
