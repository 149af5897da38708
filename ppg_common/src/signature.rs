//! # Payssion request signatures
//!
//! Every message exchanged with the provider carries a digest over an ordered set of request fields. There are two
//! signing contexts, and they use *different* field sets:
//!
//! * **Request** signatures accompany outbound payment-creation calls. The payment has no state yet, so the field
//!   order is `api_key | pm_id | amount | currency | order_id`.
//! * **Notification** signatures arrive on asynchronous payment notifications and additionally cover the payment
//!   state: `api_key | pm_id | amount | currency | order_id | state`.
//!
//! The two contexts are deliberately kept as separate functions with their own field structs rather than one
//! function with optional fields, so that a missing field can never silently produce a shorter (but still valid
//! looking) message.
//!
//! Two digest schemes are supported. [`SignatureScheme::HmacSha256`] keys an HMAC-SHA256 over the joined field
//! string and is the default. [`SignatureScheme::LegacyMd5`] reproduces the scheme the deployed provider contract
//! uses: an unkeyed MD5 over the joined fields with the shared secret appended as the final `|`-separated element.
//! The legacy scheme is an unsalted concatenation hash and is weak; it exists for wire compatibility only and
//! should not be selected for new integrations.

use hmac::{Hmac, Mac};
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::Secret;

type HmacSha256 = Hmac<Sha256>;

/// Field order for signing outbound payment-creation requests.
pub const REQUEST_SIGNATURE_FIELDS: [&str; 5] = ["api_key", "pm_id", "amount", "currency", "order_id"];

/// Field order for verifying inbound payment notifications.
pub const NOTIFY_SIGNATURE_FIELDS: [&str; 6] = ["api_key", "pm_id", "amount", "currency", "order_id", "state"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureScheme {
    /// HMAC-SHA256 keyed with the shared secret. Hex-encoded.
    #[default]
    HmacSha256,
    /// Unkeyed MD5 over `fields... | secret`. Hex-encoded. Wire-compatible with the legacy provider contract.
    LegacyMd5,
}

#[derive(Debug, Clone, Error)]
#[error("Unknown signature scheme: {0}")]
pub struct UnknownSchemeError(String);

impl std::str::FromStr for SignatureScheme {
    type Err = UnknownSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hmac_sha256" | "hmac-sha256" => Ok(Self::HmacSha256),
            "legacy_md5" | "md5" => Ok(Self::LegacyMd5),
            other => Err(UnknownSchemeError(other.to_string())),
        }
    }
}

/// The ordered field values covered by an outbound request signature.
#[derive(Debug, Clone, Copy)]
pub struct RequestFields<'a> {
    pub api_key: &'a str,
    pub pm_id: &'a str,
    pub amount: &'a str,
    pub currency: &'a str,
    pub order_id: &'a str,
}

impl RequestFields<'_> {
    fn message(&self) -> String {
        [self.api_key, self.pm_id, self.amount, self.currency, self.order_id].join("|")
    }
}

/// The ordered field values covered by an inbound notification signature.
#[derive(Debug, Clone, Copy)]
pub struct NotifyFields<'a> {
    pub api_key: &'a str,
    pub pm_id: &'a str,
    pub amount: &'a str,
    pub currency: &'a str,
    pub order_id: &'a str,
    /// The provider state as transmitted. A notification without a state field signs an empty string.
    pub state: &'a str,
}

impl NotifyFields<'_> {
    fn message(&self) -> String {
        [self.api_key, self.pm_id, self.amount, self.currency, self.order_id, self.state].join("|")
    }
}

/// Computes the signature for an outbound payment-creation request.
pub fn request_signature(scheme: SignatureScheme, fields: &RequestFields<'_>, secret: &Secret<String>) -> String {
    digest(scheme, &fields.message(), secret)
}

/// Computes the expected signature for an inbound payment notification.
pub fn notify_signature(scheme: SignatureScheme, fields: &NotifyFields<'_>, secret: &Secret<String>) -> String {
    digest(scheme, &fields.message(), secret)
}

/// Recomputes the notification signature and compares it against the declared one. Any mismatch is a hard
/// validation failure: the notification must not be applied.
pub fn verify_notify_signature(
    scheme: SignatureScheme,
    fields: &NotifyFields<'_>,
    secret: &Secret<String>,
    declared: &str,
) -> bool {
    notify_signature(scheme, fields, secret) == declared
}

fn digest(scheme: SignatureScheme, message: &str, secret: &Secret<String>) -> String {
    match scheme {
        SignatureScheme::HmacSha256 => {
            let mut mac =
                HmacSha256::new_from_slice(secret.reveal().as_bytes()).expect("HMAC can take a key of any size");
            mac.update(message.as_bytes());
            hex::encode(mac.finalize().into_bytes())
        },
        SignatureScheme::LegacyMd5 => {
            let mut hasher = Md5::new();
            hasher.update(message.as_bytes());
            hasher.update(b"|");
            hasher.update(secret.reveal().as_bytes());
            hex::encode(hasher.finalize())
        },
    }
}
