use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayssionApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Could not send request to the provider: {0}")]
    RequestError(String),
    #[error("Invalid response from the provider: {0}")]
    ResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Provider call failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
    #[error("Provider rejected the call with result code {0}")]
    ResultCode(i64),
    #[error("Invalid currency amount: {0}")]
    InvalidCurrencyAmount(String),
}
