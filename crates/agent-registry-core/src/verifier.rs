//! Proof-of-possession verification.
//!
//! [`ProofVerifier::verify`] decides whether a hex-encoded signature over a
//! message was produced by the private key matching a hex-encoded public
//! key. It never panics and never reports [`VerificationOutcome::Verified`]
//! unless a signature primitive actually accepted the proof.
//!
//! The primitive itself sits behind [`SignaturePrimitive`]. When the crate
//! is built without the `ed25519` feature, or a verifier is constructed with
//! [`ProofVerifier::unavailable`], every call returns
//! [`VerificationOutcome::Unavailable`].

use std::fmt;
use std::sync::Arc;

/// Ed25519 public key length in bytes.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Ed25519 signature length in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// Failure reported by a [`SignaturePrimitive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PrimitiveError {
    /// Key bytes do not describe a usable public key.
    #[error("malformed public key")]
    MalformedKey,

    /// The signature does not match the key and message.
    #[error("signature mismatch")]
    Mismatch,
}

/// A signature verification primitive.
pub trait SignaturePrimitive: Send + Sync {
    /// Scheme name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Verify `signature` over `message` under `public_key`.
    fn verify(
        &self,
        public_key: &[u8; PUBLIC_KEY_LEN],
        message: &[u8],
        signature: &[u8; SIGNATURE_LEN],
    ) -> Result<(), PrimitiveError>;
}

/// Reason a proof was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// Public key or signature was not valid hex of the expected length,
    /// or the key bytes were not a valid key.
    MalformedEncoding,
    /// Well-formed inputs that do not verify.
    SignatureMismatch,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::MalformedEncoding => "malformed-encoding",
            RejectReason::SignatureMismatch => "signature-mismatch",
        }
    }
}

/// Reason verification could not be attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnavailableReason {
    VerifierNotInstalled,
}

impl UnavailableReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnavailableReason::VerifierNotInstalled => "verifier-not-installed",
        }
    }
}

/// Result of a single proof verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationOutcome {
    Verified,
    Rejected(RejectReason),
    Unavailable(UnavailableReason),
}

impl VerificationOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationOutcome::Verified)
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationOutcome::Verified => write!(f, "verified"),
            VerificationOutcome::Rejected(reason) => write!(f, "rejected({})", reason.as_str()),
            VerificationOutcome::Unavailable(reason) => {
                write!(f, "unavailable({})", reason.as_str())
            }
        }
    }
}

/// Verifies proofs of possession against a [`SignaturePrimitive`].
///
/// Cloning is cheap; the primitive is shared.
#[derive(Clone)]
pub struct ProofVerifier {
    primitive: Option<Arc<dyn SignaturePrimitive>>,
}

impl ProofVerifier {
    /// Verifier backed by the given primitive.
    pub fn new(primitive: Arc<dyn SignaturePrimitive>) -> Self {
        Self {
            primitive: Some(primitive),
        }
    }

    /// Verifier with no primitive installed.
    pub fn unavailable() -> Self {
        Self { primitive: None }
    }

    /// Verifier backed by whatever primitive this build carries.
    pub fn from_build() -> Self {
        Self {
            primitive: build_primitive(),
        }
    }

    /// Whether a primitive is installed.
    pub fn is_available(&self) -> bool {
        self.primitive.is_some()
    }

    /// Verify a hex-encoded `signature` over `message` under a hex-encoded
    /// `public_key`.
    ///
    /// The message is verified as its exact UTF-8 bytes.
    pub fn verify(&self, public_key: &str, message: &str, signature: &str) -> VerificationOutcome {
        let outcome = self.evaluate(public_key, message, signature);
        match outcome {
            VerificationOutcome::Verified => {
                tracing::debug!(outcome = %outcome, "Proof verification finished");
            }
            VerificationOutcome::Rejected(_) => {
                tracing::info!(outcome = %outcome, "Proof verification finished");
            }
            VerificationOutcome::Unavailable(_) => {
                tracing::error!(
                    outcome = %outcome,
                    "No signature primitive installed, cannot verify cryptographic proofs"
                );
            }
        }
        outcome
    }

    fn evaluate(&self, public_key: &str, message: &str, signature: &str) -> VerificationOutcome {
        let Some(primitive) = self.primitive.as_deref() else {
            return VerificationOutcome::Unavailable(UnavailableReason::VerifierNotInstalled);
        };

        let (Some(key_bytes), Some(sig_bytes)) = (
            decode_fixed::<PUBLIC_KEY_LEN>(public_key),
            decode_fixed::<SIGNATURE_LEN>(signature),
        ) else {
            return VerificationOutcome::Rejected(RejectReason::MalformedEncoding);
        };

        match primitive.verify(&key_bytes, message.as_bytes(), &sig_bytes) {
            Ok(()) => VerificationOutcome::Verified,
            Err(PrimitiveError::MalformedKey) => {
                VerificationOutcome::Rejected(RejectReason::MalformedEncoding)
            }
            Err(PrimitiveError::Mismatch) => {
                VerificationOutcome::Rejected(RejectReason::SignatureMismatch)
            }
        }
    }
}

impl Default for ProofVerifier {
    fn default() -> Self {
        Self::from_build()
    }
}

impl fmt::Debug for ProofVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProofVerifier")
            .field("primitive", &self.primitive.as_ref().map(|p| p.name()))
            .finish()
    }
}

#[cfg(feature = "ed25519")]
fn build_primitive() -> Option<Arc<dyn SignaturePrimitive>> {
    Some(Arc::new(crate::crypto::Ed25519Primitive))
}

#[cfg(not(feature = "ed25519"))]
fn build_primitive() -> Option<Arc<dyn SignaturePrimitive>> {
    None
}

/// Decode exactly `N` bytes from `2 * N` hex characters.
fn decode_fixed<const N: usize>(encoded: &str) -> Option<[u8; N]> {
    let mut bytes = [0u8; N];
    hex::decode_to_slice(encoded, &mut bytes).ok()?;
    Some(bytes)
}
