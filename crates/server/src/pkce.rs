//! PKCE (Proof Key for Code Exchange) verifier and challenge generation.
//!
//! One verifier is generated per login attempt and stored in the session
//! until the callback exchanges it; the challenge is derived on the fly and
//! never stored.

use std::fmt::Write;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// PKCE challenge method sent to the provider.
pub const CHALLENGE_METHOD: &str = "S256";

/// Verifier entropy in bytes (hex-encoded to twice as many characters).
const VERIFIER_BYTES: usize = 32;

/// Generate a new code verifier: 32 bytes from the OS CSPRNG, hex-encoded.
///
/// `rand::rng()` is a cryptographically secure generator; a general-purpose
/// PRNG must never be used here.
#[must_use]
pub fn generate_verifier() -> String {
    let mut bytes = [0u8; VERIFIER_BYTES];
    rand::rng().fill_bytes(&mut bytes);

    let mut verifier = String::with_capacity(VERIFIER_BYTES * 2);
    for byte in bytes {
        // Infallible for String
        let _ = write!(verifier, "{byte:02x}");
    }
    verifier
}

/// Derive the S256 code challenge for a verifier.
///
/// Pure and deterministic: SHA-256 over the verifier's UTF-8 bytes,
/// base64url-encoded with padding stripped. The provider recomputes this
/// from the verifier at exchange time and compares bit-for-bit.
///
/// # Panics
///
/// Panics on an empty verifier; that is a programming error, not a
/// recoverable condition.
#[must_use]
pub fn derive_challenge(verifier: &str) -> String {
    assert!(!verifier.is_empty(), "PKCE verifier must not be empty");

    let digest = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(digest)
}
