use mockall::mock;
use payssion_api::TransactionDetails;

use crate::{
    traits::{InvoiceLedger, LedgerError, ProviderError, TransactionLookup},
    types::InvoiceStatus,
};

mock! {
    pub Ledger {}
    impl InvoiceLedger for Ledger {
        async fn invoice_status(&self, invoice_id: &str) -> Result<Option<InvoiceStatus>, LedgerError>;
    }
}

mock! {
    pub Provider {}
    impl TransactionLookup for Provider {
        async fn transaction_details(&self, order_id: &str) -> Result<TransactionDetails, ProviderError>;
    }
}
