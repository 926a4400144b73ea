//! HMAC-SHA256 signature verification for payment callbacks and webhooks.
//!
//! Both checks compare hex digests in constant time so the comparison
//! itself leaks nothing about the expected value.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Verify the signature returned by the client-side checkout widget.
///
/// The signed message is `"{gateway_order_id}|{gateway_payment_id}"` and the
/// signature is a lowercase hex HMAC-SHA256 digest under the key secret.
#[must_use]
pub fn verify_payment_signature(
    key_secret: &SecretString,
    gateway_order_id: &str,
    gateway_payment_id: &str,
    signature: &str,
) -> bool {
    let message = format!("{gateway_order_id}|{gateway_payment_id}");
    verify_hex_hmac(key_secret, message.as_bytes(), signature)
}

/// Verify a webhook delivery signature over the raw request body.
#[must_use]
pub fn verify_webhook_signature(
    webhook_secret: &SecretString,
    body: &[u8],
    signature: &str,
) -> bool {
    verify_hex_hmac(webhook_secret, body, signature)
}

fn verify_hex_hmac(secret: &SecretString, message: &[u8], signature: &str) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.expose_secret().as_bytes()) else {
        return false;
    };
    mac.update(message);
    let expected = hex::encode(mac.finalize().into_bytes());

    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    fn sign(key: &str, message: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(key.as_bytes()).unwrap();
        mac.update(message.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn accepts_valid_payment_signature() {
        let sig = sign("test_secret", "order_abc|pay_xyz");
        assert!(verify_payment_signature(
            &secret("test_secret"),
            "order_abc",
            "pay_xyz",
            &sig
        ));
    }

    #[test]
    fn rejects_tampered_payment_id() {
        let sig = sign("test_secret", "order_abc|pay_xyz");
        assert!(!verify_payment_signature(
            &secret("test_secret"),
            "order_abc",
            "pay_other",
            &sig
        ));
    }

    #[test]
    fn rejects_wrong_secret() {
        let sig = sign("other_secret", "order_abc|pay_xyz");
        assert!(!verify_payment_signature(
            &secret("test_secret"),
            "order_abc",
            "pay_xyz",
            &sig
        ));
    }

    #[test]
    fn rejects_truncated_signature() {
        let mut sig = sign("test_secret", "order_abc|pay_xyz");
        sig.truncate(10);
        assert!(!verify_payment_signature(
            &secret("test_secret"),
            "order_abc",
            "pay_xyz",
            &sig
        ));
    }

    #[test]
    fn verifies_webhook_body() {
        let body = br#"{"event":"payment.captured"}"#;
        let sig = sign("hook_secret", r#"{"event":"payment.captured"}"#);
        assert!(verify_webhook_signature(&secret("hook_secret"), body, &sig));
        assert!(!verify_webhook_signature(&secret("hook_secret"), body, "deadbeef"));
    }
}
