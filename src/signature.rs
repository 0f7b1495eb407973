//! Webhook signature verification

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;
type HmacSha1 = Hmac<Sha1>;

/// Verifies a GitHub webhook signature header against the raw request body.
///
/// `signature_header` is the value of `X-Hub-Signature-256` ("sha256=<hex>")
/// or the legacy `X-Hub-Signature` ("sha1=<hex>"). The digest comparison is
/// constant-time via `Mac::verify_slice`; no timing signal is correlated with
/// how much of the digest matches.
pub fn verify_signature(secret: &str, payload: &[u8], signature_header: &str) -> bool {
    if let Some(hex_digest) = signature_header.strip_prefix("sha256=") {
        verify_sha256(secret, payload, hex_digest)
    } else if let Some(hex_digest) = signature_header.strip_prefix("sha1=") {
        verify_sha1(secret, payload, hex_digest)
    } else {
        // No recognized algorithm prefix
        false
    }
}

fn verify_sha256(secret: &str, payload: &[u8], hex_digest: &str) -> bool {
    let digest = match hex::decode(hex_digest) {
        Ok(d) => d,
        Err(_) => return false,
    };
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => return false,
    };
    mac.update(payload);
    mac.verify_slice(&digest).is_ok()
}

fn verify_sha1(secret: &str, payload: &[u8], hex_digest: &str) -> bool {
    let digest = match hex::decode(hex_digest) {
        Ok(d) => d,
        Err(_) => return false,
    };
    let mut mac = match HmacSha1::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => return false,
    };
    mac.update(payload);
    mac.verify_slice(&digest).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_sha256(secret: &str, body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
    }

    fn sign_sha1(secret: &str, body: &[u8]) -> String {
        let mut mac = HmacSha1::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        format!("sha1={}", hex::encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn accepts_valid_sha256_signature() {
        let secret = "test-secret";
        let body = b"test body";
        let signature = sign_sha256(secret, body);

        assert!(verify_signature(secret, body, &signature));
    }

    #[test]
    fn accepts_valid_sha1_signature() {
        let secret = "test-secret";
        let body = b"test body";
        let signature = sign_sha1(secret, body);

        assert!(verify_signature(secret, body, &signature));
    }

    #[test]
    fn rejects_signature_of_different_body() {
        let secret = "test-secret";
        let signature = sign_sha256(secret, b"original body");

        assert!(!verify_signature(secret, b"tampered body", &signature));
    }

    #[test]
    fn rejects_signature_with_wrong_secret() {
        let body = b"test body";
        let signature = sign_sha256("other-secret", body);

        assert!(!verify_signature("test-secret", body, &signature));
    }

    #[test]
    fn rejects_unknown_algorithm_prefix() {
        assert!(!verify_signature("secret", b"body", "md5=abcdef"));
        assert!(!verify_signature("secret", b"body", "deadbeef"));
    }

    #[test]
    fn rejects_non_hex_digest() {
        assert!(!verify_signature("secret", b"body", "sha256=not-hex!"));
    }

    #[test]
    fn rejects_truncated_digest() {
        let secret = "test-secret";
        let body = b"test body";
        let mut signature = sign_sha256(secret, body);
        signature.truncate(signature.len() - 2);

        assert!(!verify_signature(secret, body, &signature));
    }
}
