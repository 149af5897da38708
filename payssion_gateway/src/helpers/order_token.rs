//! # Order token codec
//!
//! A payment can cover several host invoices at once. The invoice references are carried through the round trip to
//! the provider and back inside the `order_id` field as an opaque token: `id1=amount1|id2=amount2|...`,
//! base64-encoded for transport.
//!
//! Encoding is strict about what it is given but performs no escaping: ids and amounts must never contain `=` or
//! `|`, which numeric invoice ids and decimal amounts guarantee. Decoding is lenient and total: it never fails and
//! never panics, whatever bytes arrive. Undecodable base64 yields no invoices, and any segment without an `=` is
//! silently dropped. The worst case over arbitrary input is an empty list.

use crate::types::InvoiceRef;

/// Encodes invoice references into an opaque transport token, preserving their order.
pub fn encode_order_token(invoices: &[InvoiceRef]) -> String {
    base64::encode(serialize_invoices(invoices))
}

/// Decodes a transport token back into invoice references. Total over arbitrary input.
pub fn decode_order_token(token: &str) -> Vec<InvoiceRef> {
    let raw = base64::decode(token).unwrap_or_default();
    unserialize_invoices(&String::from_utf8_lossy(&raw))
}

/// Joins invoice references into the `id1=amount1|id2=amount2` wire form.
pub fn serialize_invoices(invoices: &[InvoiceRef]) -> String {
    invoices.iter().map(|inv| format!("{}={}", inv.id, inv.amount)).collect::<Vec<_>>().join("|")
}

/// Splits the wire form back into invoice references. Each segment is split on the first `=` only; segments
/// without one are dropped without raising an error.
pub fn unserialize_invoices(s: &str) -> Vec<InvoiceRef> {
    s.split('|')
        .filter_map(|pair| {
            let (id, amount) = pair.split_once('=')?;
            Some(InvoiceRef::new(id, amount))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trip() {
        let invoices = vec![InvoiceRef::new("42", "1000"), InvoiceRef::new("55", "250"), InvoiceRef::new("7", "0.5")];
        assert_eq!(decode_order_token(&encode_order_token(&invoices)), invoices);
    }

    #[test]
    fn known_token() {
        assert_eq!(encode_order_token(&[InvoiceRef::new("42", "1000")]), "NDI9MTAwMA==");
        assert_eq!(decode_order_token("NDI9MTAwMA=="), vec![InvoiceRef::new("42", "1000")]);
    }

    #[test]
    fn segments_without_equals_are_dropped() {
        let invoices = unserialize_invoices("garbage-with-no-equals|a=1");
        assert_eq!(invoices, vec![InvoiceRef::new("a", "1")]);
    }

    #[test]
    fn splits_on_the_first_equals_only() {
        let invoices = unserialize_invoices("a=1=2");
        assert_eq!(invoices, vec![InvoiceRef::new("a", "1=2")]);
    }

    #[test]
    fn empty_fields_survive() {
        assert_eq!(unserialize_invoices("a=|=5"), vec![InvoiceRef::new("a", ""), InvoiceRef::new("", "5")]);
    }

    #[test]
    fn decode_is_total() {
        assert!(decode_order_token("").is_empty());
        assert!(decode_order_token("not valid base64!!").is_empty());
        // Valid base64 of bytes with nothing resembling invoice pairs.
        assert!(decode_order_token(&base64::encode([0u8, 159, 146, 150])).is_empty());
    }

    #[test]
    fn empty_list_encodes_to_empty_token() {
        assert_eq!(encode_order_token(&[]), "");
        assert!(decode_order_token("").is_empty());
    }
}
