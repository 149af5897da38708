mod order_token;

pub use order_token::{decode_order_token, encode_order_token, serialize_invoices, unserialize_invoices};
