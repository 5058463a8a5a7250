//! Ed25519 primitives for agent registration
//!
//! This module provides the Ed25519 [`SignaturePrimitive`] used by
//! [`ProofVerifier`](crate::ProofVerifier), plus a [`KeyPair`] for agents
//! that need to produce registration proofs.
//!
//! Keys and signatures travel as lowercase hex: 64 characters for a public
//! key, 128 for a signature.
//!
//! # Example
//!
//! ```
//! use agent_registry_core::crypto::KeyPair;
//! use agent_registry_core::{ProofVerifier, VerificationOutcome};
//!
//! let keypair = KeyPair::generate();
//! let signature = keypair.sign_hex("challenge-42");
//!
//! let outcome = ProofVerifier::from_build().verify(&keypair.public_key_hex(), "challenge-42", &signature);
//! assert_eq!(outcome, VerificationOutcome::Verified);
//! ```

use std::fmt;

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;

use crate::verifier::{PUBLIC_KEY_LEN, PrimitiveError, SIGNATURE_LEN, SignaturePrimitive};

/// Error type for key handling on the signing side
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    /// Secret key was not 64 hex characters
    #[error("invalid secret key: {0}")]
    InvalidSecretKey(String),
}

/// Strict Ed25519 verification via `ed25519-dalek`.
///
/// Rejects non-canonical signatures and small-order public keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Primitive;

impl SignaturePrimitive for Ed25519Primitive {
    fn name(&self) -> &'static str {
        "ed25519"
    }

    fn verify(
        &self,
        public_key: &[u8; PUBLIC_KEY_LEN],
        message: &[u8],
        signature: &[u8; SIGNATURE_LEN],
    ) -> Result<(), PrimitiveError> {
        let verifying_key =
            VerifyingKey::from_bytes(public_key).map_err(|_| PrimitiveError::MalformedKey)?;
        let signature = Signature::from_bytes(signature);

        verifying_key
            .verify_strict(message, &signature)
            .map_err(|_| PrimitiveError::Mismatch)
    }
}

/// Ed25519 keypair for signing registration messages
///
/// Keep the keypair secure - anyone with access can register as this agent.
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a new random keypair
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        KeyPair { signing_key }
    }

    /// Create a keypair from a 32-byte secret key
    pub fn from_bytes(secret_key: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(secret_key);
        KeyPair { signing_key }
    }

    /// Create a keypair from a 64-character hex secret key
    pub fn from_hex(secret_key_hex: &str) -> Result<Self, CryptoError> {
        let mut secret = [0u8; 32];
        hex::decode_to_slice(secret_key_hex.trim(), &mut secret)
            .map_err(|e| CryptoError::InvalidSecretKey(e.to_string()))?;
        Ok(Self::from_bytes(&secret))
    }

    /// Public key as 64 lowercase hex characters
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.signing_key.verifying_key().as_bytes())
    }

    /// Secret key as 64 lowercase hex characters (for secure storage)
    pub fn secret_key_hex(&self) -> String {
        hex::encode(self.signing_key.as_bytes())
    }

    /// Sign the UTF-8 bytes of `message`, returning 128 hex characters
    pub fn sign_hex(&self, message: &str) -> String {
        hex::encode(self.signing_key.sign(message.as_bytes()).to_bytes())
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair(public_key: {})", self.public_key_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_hex_lengths() {
        let keypair = KeyPair::generate();
        assert_eq!(keypair.public_key_hex().len(), PUBLIC_KEY_LEN * 2);
        assert_eq!(keypair.secret_key_hex().len(), 64);
        assert_eq!(keypair.sign_hex("hello").len(), SIGNATURE_LEN * 2);
    }

    #[test]
    fn test_keypair_from_bytes_deterministic() {
        let secret = [42u8; 32];
        let keypair1 = KeyPair::from_bytes(&secret);
        let keypair2 = KeyPair::from_bytes(&secret);

        assert_eq!(keypair1.public_key_hex(), keypair2.public_key_hex());
        assert_eq!(keypair1.sign_hex("msg"), keypair2.sign_hex("msg"));
    }

    #[test]
    fn test_keypair_hex_roundtrip() {
        let keypair = KeyPair::generate();
        let restored = KeyPair::from_hex(&keypair.secret_key_hex()).unwrap();
        assert_eq!(keypair.public_key_hex(), restored.public_key_hex());
    }

    #[test]
    fn test_keypair_from_bad_hex() {
        assert!(matches!(
            KeyPair::from_hex("abc"),
            Err(CryptoError::InvalidSecretKey(_))
        ));
        assert!(KeyPair::from_hex(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let keypair = KeyPair::from_bytes(&[1u8; 32]);
        let debug = format!("{keypair:?}");
        assert!(debug.contains(&keypair.public_key_hex()));
        assert!(!debug.contains(&keypair.secret_key_hex()));
    }

    #[test]
    fn test_primitive_accepts_genuine_signature() {
        let keypair = KeyPair::from_bytes(&[5u8; 32]);
        let mut public_key = [0u8; PUBLIC_KEY_LEN];
        let mut signature = [0u8; SIGNATURE_LEN];
        hex::decode_to_slice(keypair.public_key_hex(), &mut public_key).unwrap();
        hex::decode_to_slice(keypair.sign_hex("hello"), &mut signature).unwrap();

        assert_eq!(Ed25519Primitive.verify(&public_key, b"hello", &signature), Ok(()));
        assert_eq!(
            Ed25519Primitive.verify(&public_key, b"hellO", &signature),
            Err(PrimitiveError::Mismatch)
        );
    }

    #[test]
    fn test_primitive_rejects_small_order_key() {
        // The identity point is a valid encoding but a weak key.
        let mut identity_point = [0u8; PUBLIC_KEY_LEN];
        identity_point[0] = 1;
        let signature = [0u8; SIGNATURE_LEN];

        assert!(Ed25519Primitive
            .verify(&identity_point, b"anything", &signature)
            .is_err());
    }
}
