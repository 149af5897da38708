//! Provider-side implementations of the gateway's collaborator traits.

use payssion_api::{PayssionApi, TransactionDetails};

use crate::traits::{ProviderError, TransactionLookup};

impl TransactionLookup for PayssionApi {
    async fn transaction_details(&self, order_id: &str) -> Result<TransactionDetails, ProviderError> {
        self.payment_details(order_id).await.map_err(ProviderError::from)
    }
}
