//! Registration admission pipeline.
//!
//! Each step short-circuits on failure:
//! 1. Every required field is present and non-empty
//! 2. The agent name normalizes to ASCII alphanumeric
//! 3. The signature proves possession of the public key
//! 4. An address is derived from the canonical name and public key
//!
//! Nothing is retained between calls. The same request always yields the
//! same decision for a given verifier.

use crate::identity::{DerivedAddress, NormalizedIdentity};
use crate::types::{AdmissionDecision, DenialKind, RegistrationRequest};
use crate::verifier::{ProofVerifier, VerificationOutcome};

/// Detail returned for every proof failure, whatever the internal cause.
pub const PROOF_FAILED_DETAIL: &str =
    "cryptographic proof verification failed or service unavailable";

/// Decides whether a registration request is admitted.
#[derive(Debug, Clone, Default)]
pub struct RegistrationValidator {
    verifier: ProofVerifier,
}

impl RegistrationValidator {
    pub fn new(verifier: ProofVerifier) -> Self {
        Self { verifier }
    }

    pub fn verifier(&self) -> &ProofVerifier {
        &self.verifier
    }

    /// Evaluate a registration request.
    pub fn admit(&self, request: &RegistrationRequest) -> AdmissionDecision {
        if let Some(field) = request.first_missing_field() {
            tracing::debug!(field = %field, "Registration missing required field");
            return AdmissionDecision::denied(DenialKind::MissingField, field.as_str());
        }

        let identity = match NormalizedIdentity::normalize(&request.agent_name) {
            Ok(identity) => identity,
            Err(e) => {
                tracing::debug!(error = %e, "Registration rejected agent name");
                return AdmissionDecision::denied(DenialKind::InvalidName, e.to_string());
            }
        };

        let outcome = self
            .verifier
            .verify(&request.public_key, &request.message, &request.signature);
        if outcome != VerificationOutcome::Verified {
            tracing::warn!(
                agent = %identity.canonical_name(),
                outcome = %outcome,
                "Registration proof failed"
            );
            return AdmissionDecision::denied(DenialKind::ProofFailed, PROOF_FAILED_DETAIL);
        }

        let address = DerivedAddress::derive(&identity, &request.public_key);
        tracing::info!(agent = %identity.canonical_name(), address = %address, "Agent admitted");

        AdmissionDecision::Admitted {
            address,
            canonical_name: identity.into_canonical_name(),
            fingerprint: request.fingerprint.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verifier::{PUBLIC_KEY_LEN, PrimitiveError, SIGNATURE_LEN, SignaturePrimitive};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls and answers with a fixed result.
    struct Scripted {
        calls: AtomicUsize,
        result: Result<(), PrimitiveError>,
    }

    impl Scripted {
        fn new(result: Result<(), PrimitiveError>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                result,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl SignaturePrimitive for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn verify(
            &self,
            _public_key: &[u8; PUBLIC_KEY_LEN],
            _message: &[u8],
            _signature: &[u8; SIGNATURE_LEN],
        ) -> Result<(), PrimitiveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
        }
    }

    fn request(agent_name: &str) -> RegistrationRequest {
        RegistrationRequest::new(
            agent_name,
            "hfp-abc",
            "0a1b2c3d".to_string() + &"ff".repeat(28),
            "ee".repeat(64),
            "register",
        )
    }

    fn denied(kind: DenialKind, detail: &str) -> AdmissionDecision {
        AdmissionDecision::Denied {
            kind,
            detail: detail.to_string(),
        }
    }

    #[test]
    fn test_missing_signature_skips_verifier() {
        let primitive = Scripted::new(Ok(()));
        let validator = RegistrationValidator::new(ProofVerifier::new(primitive.clone()));
        let mut req = request("Node7");
        req.signature.clear();

        assert_eq!(
            validator.admit(&req),
            denied(DenialKind::MissingField, "signature")
        );
        assert_eq!(primitive.calls(), 0);
    }

    #[test]
    fn test_each_missing_field_is_named() {
        let validator = RegistrationValidator::new(ProofVerifier::new(Scripted::new(Ok(()))));
        let cases: [(&str, fn(&mut RegistrationRequest)); 5] = [
            ("agent_name", |r| r.agent_name.clear()),
            ("fingerprint", |r| r.fingerprint.clear()),
            ("public_key", |r| r.public_key.clear()),
            ("signature", |r| r.signature.clear()),
            ("message", |r| r.message.clear()),
        ];

        for (field, clear) in cases {
            let mut req = request("Node7");
            clear(&mut req);
            assert_eq!(validator.admit(&req), denied(DenialKind::MissingField, field));
        }
    }

    #[test]
    fn test_invalid_name_skips_verifier() {
        let primitive = Scripted::new(Ok(()));
        let validator = RegistrationValidator::new(ProofVerifier::new(primitive.clone()));

        let decision = validator.admit(&request("Agent_1"));
        assert_eq!(decision.denial_kind(), Some(DenialKind::InvalidName));
        assert_eq!(primitive.calls(), 0);
    }

    #[test]
    fn test_missing_field_checked_before_name() {
        let validator = RegistrationValidator::new(ProofVerifier::new(Scripted::new(Ok(()))));
        let mut req = request("Agent_1");
        req.message.clear();

        assert_eq!(validator.admit(&req), denied(DenialKind::MissingField, "message"));
    }

    #[test]
    fn test_admitted_decision_contents() {
        let validator = RegistrationValidator::new(ProofVerifier::new(Scripted::new(Ok(()))));

        assert_eq!(
            validator.admit(&request("Agent1")),
            AdmissionDecision::Admitted {
                address: DerivedAddress::derive(
                    &NormalizedIdentity::normalize("agent1").unwrap(),
                    "0a1b2c3d"
                ),
                canonical_name: "agent1".to_string(),
                fingerprint: "hfp-abc".to_string(),
            }
        );
    }

    #[test]
    fn test_rejected_and_unavailable_look_identical() {
        let mismatch =
            RegistrationValidator::new(ProofVerifier::new(Scripted::new(Err(PrimitiveError::Mismatch))));
        let malformed = RegistrationValidator::new(ProofVerifier::new(Scripted::new(Err(
            PrimitiveError::MalformedKey,
        ))));
        let unavailable = RegistrationValidator::new(ProofVerifier::unavailable());

        let req = request("Node7");
        let expected = denied(DenialKind::ProofFailed, PROOF_FAILED_DETAIL);
        assert_eq!(mismatch.admit(&req), expected);
        assert_eq!(malformed.admit(&req), expected);
        assert_eq!(unavailable.admit(&req), expected);
    }

    #[test]
    fn test_malformed_hex_is_proof_failure() {
        let validator = RegistrationValidator::new(ProofVerifier::new(Scripted::new(Ok(()))));
        let mut req = request("Node7");
        req.signature = "not-hex".to_string();

        assert_eq!(
            validator.admit(&req).denial_kind(),
            Some(DenialKind::ProofFailed)
        );
    }

    #[test]
    fn test_admit_does_not_mutate_request() {
        let validator = RegistrationValidator::new(ProofVerifier::new(Scripted::new(Ok(()))));
        let req = request("MiXeD9");
        let before = req.clone();
        let _ = validator.admit(&req);
        assert_eq!(req, before);
    }

    #[cfg(feature = "ed25519")]
    mod with_ed25519 {
        use super::super::*;
        use crate::crypto::KeyPair;

        fn signed_request(keypair: &KeyPair, agent_name: &str, message: &str) -> RegistrationRequest {
            RegistrationRequest::new(
                agent_name,
                "hfp-node7",
                keypair.public_key_hex(),
                keypair.sign_hex(message),
                message,
            )
        }

        #[test]
        fn test_genuine_registration_is_admitted() {
            let keypair = KeyPair::from_bytes(&[7u8; 32]);
            let public_key = keypair.public_key_hex();
            let req = signed_request(&keypair, "Node7", "join rustchain");

            let decision = RegistrationValidator::default().admit(&req);
            assert_eq!(
                decision,
                AdmissionDecision::Admitted {
                    address: DerivedAddress::derive(
                        &NormalizedIdentity::normalize("node7").unwrap(),
                        &public_key
                    ),
                    canonical_name: "node7".to_string(),
                    fingerprint: "hfp-node7".to_string(),
                }
            );

            let AdmissionDecision::Admitted { address, .. } = decision else {
                unreachable!();
            };
            assert_eq!(address.as_str(), format!("RTC-node7-{}", &public_key[..8]));
        }

        #[test]
        fn test_signature_for_other_message_is_denied() {
            let keypair = KeyPair::generate();
            let mut req = signed_request(&keypair, "Node7", "join rustchain");
            req.message = "join rustchain twice".to_string();

            assert_eq!(
                RegistrationValidator::default().admit(&req).denial_kind(),
                Some(DenialKind::ProofFailed)
            );
        }

        #[test]
        fn test_admit_is_idempotent() {
            let keypair = KeyPair::generate();
            let validator = RegistrationValidator::default();
            let admitted = signed_request(&keypair, "Node7", "hello");
            let rejected = {
                let mut r = signed_request(&keypair, "Node7", "hello");
                r.message = "bye".to_string();
                r
            };

            for req in [&admitted, &rejected] {
                let first = validator.admit(req);
                for _ in 0..3 {
                    assert_eq!(validator.admit(req), first);
                }
            }
        }

        #[test]
        fn test_unavailable_verifier_denies_genuine_signature() {
            let keypair = KeyPair::generate();
            let req = signed_request(&keypair, "Node7", "hello");
            let validator = RegistrationValidator::new(ProofVerifier::unavailable());

            assert_eq!(
                validator.admit(&req).denial_kind(),
                Some(DenialKind::ProofFailed)
            );
        }

        #[test]
        fn test_validator_shared_across_threads() {
            let validator = std::sync::Arc::new(RegistrationValidator::default());
            let handles: Vec<_> = (0..4u8)
                .map(|i| {
                    let validator = validator.clone();
                    std::thread::spawn(move || {
                        let keypair = KeyPair::from_bytes(&[i; 32]);
                        let req = signed_request(&keypair, &format!("Node{i}"), "hello");
                        validator.admit(&req).is_admitted()
                    })
                })
                .collect();

            for handle in handles {
                assert!(handle.join().unwrap());
            }
        }
    }
}
