//! EventSub signature verification.
//!
//! Twitch signs each delivery with HMAC-SHA256 over the concatenation of the
//! message ID, the message timestamp and the raw body, keyed with the secret
//! supplied when the subscription was created. The result is sent as
//! `sha256=<hex>` in the `Twitch-Eventsub-Message-Signature` header.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::ports::SignatureVerifier;

use super::delivery::DeliveryHeaders;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_PREFIX: &str = "sha256=";

/// Verifies deliveries against the shared webhook secret.
pub struct HmacSignatureVerifier {
    secret: SecretString,
}

impl HmacSignatureVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    fn expected(&self, message_id: &str, timestamp: &str, body: &[u8]) -> Option<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes()).ok()?;
        mac.update(message_id.as_bytes());
        mac.update(timestamp.as_bytes());
        mac.update(body);
        Some(mac.finalize().into_bytes().to_vec())
    }
}

impl SignatureVerifier for HmacSignatureVerifier {
    fn verify(&self, headers: &DeliveryHeaders, body: &[u8]) -> bool {
        let (Some(message_id), Some(timestamp), Some(signature)) = (
            headers.message_id.as_deref(),
            headers.timestamp.as_deref(),
            headers.signature.as_deref(),
        ) else {
            return false;
        };

        let Some(provided) = signature
            .strip_prefix(SIGNATURE_PREFIX)
            .and_then(|hex_part| hex::decode(hex_part).ok())
        else {
            return false;
        };

        let Some(expected) = self.expected(message_id, timestamp, body) else {
            return false;
        };

        constant_time_compare(&expected, &provided)
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Produces the `Twitch-Eventsub-Message-Signature` value for a delivery.
///
/// Used to build signed deliveries in tests and local simulation.
pub fn sign_delivery(secret: &str, message_id: &str, timestamp: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(message_id.as_bytes());
    mac.update(timestamp.as_bytes());
    mac.update(body);
    format!("{}{}", SIGNATURE_PREFIX, hex::encode(mac.finalize().into_bytes()))
}
