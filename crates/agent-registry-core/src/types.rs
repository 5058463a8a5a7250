//! Request and decision types for agent registration.
//!
//! A [`RegistrationRequest`] is the flat set of fields an agent submits.
//! An [`AdmissionDecision`] is what the validator hands back. Neither is
//! ever mutated after construction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::DerivedAddress;

/// Fields every registration must carry, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    AgentName,
    Fingerprint,
    PublicKey,
    Signature,
    Message,
}

impl RequiredField {
    /// All required fields in check order.
    pub const ALL: [RequiredField; 5] = [
        RequiredField::AgentName,
        RequiredField::Fingerprint,
        RequiredField::PublicKey,
        RequiredField::Signature,
        RequiredField::Message,
    ];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredField::AgentName => "agent_name",
            RequiredField::Fingerprint => "fingerprint",
            RequiredField::PublicKey => "public_key",
            RequiredField::Signature => "signature",
            RequiredField::Message => "message",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registration attempt as submitted by an agent.
///
/// Empty strings are treated as absent. `public_key` and `signature` are
/// hex-encoded exactly as they arrived on the wire; they are only decoded
/// inside the proof verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    /// Claimed agent name, before normalization.
    pub agent_name: String,
    /// Caller-supplied hardware fingerprint. Echoed back, never recomputed.
    pub fingerprint: String,
    /// Ed25519 public key, 64 hex characters.
    pub public_key: String,
    /// Ed25519 signature over `message`, 128 hex characters.
    pub signature: String,
    /// The text that was signed.
    pub message: String,
}

impl RegistrationRequest {
    pub fn new(
        agent_name: impl Into<String>,
        fingerprint: impl Into<String>,
        public_key: impl Into<String>,
        signature: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            fingerprint: fingerprint.into(),
            public_key: public_key.into(),
            signature: signature.into(),
            message: message.into(),
        }
    }

    /// Raw value of a required field.
    pub fn field(&self, field: RequiredField) -> &str {
        match field {
            RequiredField::AgentName => &self.agent_name,
            RequiredField::Fingerprint => &self.fingerprint,
            RequiredField::PublicKey => &self.public_key,
            RequiredField::Signature => &self.signature,
            RequiredField::Message => &self.message,
        }
    }

    /// First required field that is empty, if any.
    pub fn first_missing_field(&self) -> Option<RequiredField> {
        RequiredField::ALL
            .into_iter()
            .find(|field| self.field(*field).is_empty())
    }
}

/// Why a registration was refused.
///
/// Cryptographic rejection and an unavailable verifier both surface as
/// [`DenialKind::ProofFailed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    /// A required field was absent or empty.
    MissingField,
    /// The agent name is not ASCII alphanumeric.
    InvalidName,
    /// The proof of possession could not be established.
    ProofFailed,
}

impl DenialKind {
    /// Stable error code string (e.g., "MISSING_FIELD").
    pub fn code(&self) -> &'static str {
        match self {
            DenialKind::MissingField => "MISSING_FIELD",
            DenialKind::InvalidName => "INVALID_NAME",
            DenialKind::ProofFailed => "PROOF_FAILED",
        }
    }
}

impl fmt::Display for DenialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialKind::MissingField => write!(f, "missing field"),
            DenialKind::InvalidName => write!(f, "invalid name"),
            DenialKind::ProofFailed => write!(f, "proof failed"),
        }
    }
}

/// Outcome of a single registration attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AdmissionDecision {
    Admitted {
        address: DerivedAddress,
        canonical_name: String,
        fingerprint: String,
    },
    Denied {
        kind: DenialKind,
        detail: String,
    },
}

impl AdmissionDecision {
    pub(crate) fn denied(kind: DenialKind, detail: impl Into<String>) -> Self {
        AdmissionDecision::Denied {
            kind,
            detail: detail.into(),
        }
    }

    pub fn is_admitted(&self) -> bool {
        matches!(self, AdmissionDecision::Admitted { .. })
    }

    /// Denial kind, or `None` when admitted.
    pub fn denial_kind(&self) -> Option<DenialKind> {
        match self {
            AdmissionDecision::Admitted { .. } => None,
            AdmissionDecision::Denied { kind, .. } => Some(*kind),
        }
    }
}
