use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Verifies a GitHub `X-Hub-Signature` header value.
///
/// The header carries `sha1=<hex>`: the HMAC-SHA1 of the raw request body
/// keyed with the shared webhook secret. The comparison runs in constant
/// time (`Mac::verify_slice`); this is a requirement, not an optimization.
pub fn verify(signature_header: &str, secret: &str, body: &[u8]) -> bool {
    let Some(hex_sig) = signature_header.strip_prefix("sha1=") else {
        return false;
    };

    let Ok(expected) = hex::decode(hex_sig) else {
        return false;
    };

    let Ok(mut mac) = HmacSha1::new_from_slice(secret.as_bytes()) else {
        return false;
    };

    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compute_sig(secret: &str, body: &[u8]) -> String {
        let mut mac = HmacSha1::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        format!("sha1={}", hex::encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn valid_signature_passes() {
        let sig = compute_sig("test-secret", b"hello world");
        assert!(verify(&sig, "test-secret", b"hello world"));
    }

    #[test]
    fn wrong_secret_fails() {
        let sig = compute_sig("correct-secret", b"body");
        assert!(!verify(&sig, "wrong-secret", b"body"));
    }

    #[test]
    fn tampered_body_fails() {
        let sig = compute_sig("secret", b"original body");
        assert!(!verify(&sig, "secret", b"tampered body"));
    }

    #[test]
    fn missing_sha1_prefix_fails() {
        let sig = compute_sig("secret", b"body");
        let raw_hex = sig.strip_prefix("sha1=").unwrap();
        assert!(!verify(raw_hex, "secret", b"body"));
    }

    #[test]
    fn sha256_prefix_fails() {
        let sig = compute_sig("secret", b"body");
        let hex_part = sig.strip_prefix("sha1=").unwrap();
        assert!(!verify(&format!("sha256={hex_part}"), "secret", b"body"));
    }

    #[test]
    fn invalid_hex_fails() {
        assert!(!verify("sha1=not-valid-hex!", "secret", b"body"));
    }

    #[test]
    fn truncated_signature_fails() {
        let sig = compute_sig("secret", b"body");
        assert!(!verify(&sig[..sig.len() - 2], "secret", b"body"));
    }

    #[test]
    fn empty_body_with_valid_sig_passes() {
        let sig = compute_sig("secret", b"");
        assert!(verify(&sig, "secret", b""));
    }
}
