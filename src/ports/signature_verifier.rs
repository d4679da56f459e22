//! SignatureVerifier port - Authenticates inbound deliveries.

use crate::domain::webhook::DeliveryHeaders;

/// Decides whether a delivery really comes from the provider.
///
/// Must be called with the raw body exactly as received, before any parsing.
pub trait SignatureVerifier: Send + Sync {
    fn verify(&self, headers: &DeliveryHeaders, body: &[u8]) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn SignatureVerifier) {}
}
