//! agent-registry-core: Admission decisions for the RustChain agent registry
//!
//! This crate provides:
//! - Registration request and admission decision types
//! - Ed25519 proof-of-possession verification
//! - Agent name normalization and address derivation
//!
//! Everything here is stateless. A single [`RegistrationValidator`] can be
//! shared across any number of concurrent callers.
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "ed25519")]
//! # {
//! use agent_registry_core::crypto::KeyPair;
//! use agent_registry_core::{AdmissionDecision, RegistrationRequest, RegistrationValidator};
//!
//! let keypair = KeyPair::from_bytes(&[7u8; 32]);
//! let message = "register node7";
//! let request = RegistrationRequest::new(
//!     "Node7",
//!     "hfp-1234",
//!     keypair.public_key_hex(),
//!     keypair.sign_hex(message),
//!     message,
//! );
//!
//! let validator = RegistrationValidator::default();
//! match validator.admit(&request) {
//!     AdmissionDecision::Admitted { canonical_name, .. } => assert_eq!(canonical_name, "node7"),
//!     AdmissionDecision::Denied { kind, .. } => panic!("denied: {kind}"),
//! }
//! # }
//! ```

pub mod identity;
pub mod types;
pub mod validator;
pub mod verifier;

#[cfg(feature = "ed25519")]
pub mod crypto;

pub use identity::{DerivedAddress, NameError, NormalizedIdentity};
pub use types::{AdmissionDecision, DenialKind, RegistrationRequest, RequiredField};
pub use validator::RegistrationValidator;
pub use verifier::{
    PUBLIC_KEY_LEN, PrimitiveError, ProofVerifier, RejectReason, SIGNATURE_LEN,
    SignaturePrimitive, UnavailableReason, VerificationOutcome,
};
