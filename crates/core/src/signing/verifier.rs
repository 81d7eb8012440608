use ed25519_dalek::{Signature, Verifier};
use serde::Serialize;

use super::canonical::signing_payload;
use super::envelope::{SignatureData, unix_now};
use crate::keys::PublicKey;
use crate::keyset::KeySet;
use crate::role::KeyType;

/// Maximum age, in seconds, of an envelope that is still accepted.
///
/// The window is inclusive at both ends and has no allowance for timestamps
/// in the future.
pub const REPLAY_WINDOW_SECS: f64 = 2.0;

/// Result of checking an envelope. `Invalid` and `Outdated` are authorization
/// denials, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationOutcome {
    Valid,
    Invalid,
    Outdated,
}

impl VerificationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, VerificationOutcome::Valid)
    }
}

/// Verifies `envelope` against `candidate_keys` using the current wall clock.
pub fn verify<S: AsRef<str>>(
    components: &[S],
    body: Option<&[u8]>,
    envelope: &SignatureData,
    candidate_keys: &[PublicKey],
) -> VerificationOutcome {
    verify_at(components, body, envelope, candidate_keys, unix_now())
}

/// Verifies `envelope` as if the verifier's clock read `now`.
///
/// Stale or future envelopes are reported as `Outdated` before any signature
/// check. Otherwise the payload is rebuilt with the envelope's own timestamp
/// and the first key that verifies it makes the result `Valid`.
pub fn verify_at<S: AsRef<str>>(
    components: &[S],
    body: Option<&[u8]>,
    envelope: &SignatureData,
    candidate_keys: &[PublicKey],
    now: f64,
) -> VerificationOutcome {
    if !envelope.is_fresh_at(now) {
        tracing::debug!(
            timestamp = envelope.timestamp,
            age = envelope.age_at(now),
            "envelope outside replay window"
        );
        return VerificationOutcome::Outdated;
    }

    let Ok(signature) = Signature::from_slice(&envelope.signature) else {
        tracing::debug!(len = envelope.signature.len(), "malformed signature bytes");
        return VerificationOutcome::Invalid;
    };

    let payload = signing_payload(components, envelope.timestamp, body);

    match candidate_keys
        .iter()
        .find(|key| key.verifying_key().verify(&payload, &signature).is_ok())
    {
        Some(key) => {
            tracing::debug!(key = %key.fingerprint(), "signature verified");
            VerificationOutcome::Valid
        }
        None => {
            tracing::debug!(candidates = candidate_keys.len(), "no candidate key matched");
            VerificationOutcome::Invalid
        }
    }
}

/// Role of the key that produced `envelope`, using the current wall clock.
pub fn resolve_role<S: AsRef<str>>(
    components: &[S],
    body: Option<&[u8]>,
    envelope: &SignatureData,
    registry: &KeySet<PublicKey>,
) -> KeyType {
    resolve_role_at(components, body, envelope, registry, unix_now())
}

/// Checks admin, then users, then viewers; the first role whose keys verify
/// the envelope wins. `KeyType::None` when no role matches or the envelope is
/// outside the replay window.
pub fn resolve_role_at<S: AsRef<str>>(
    components: &[S],
    body: Option<&[u8]>,
    envelope: &SignatureData,
    registry: &KeySet<PublicKey>,
    now: f64,
) -> KeyType {
    [KeyType::Admin, KeyType::User, KeyType::Viewer]
        .into_iter()
        .find(|role| {
            verify_at(components, body, envelope, registry.keys_for(*role), now).is_valid()
        })
        .unwrap_or(KeyType::None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::PrivateKey;
    use crate::signing::sign_at;

    const NOW: f64 = 1700000000.0;
    const COMPONENTS: [&str; 3] = ["GET", "role", "probe"];

    fn signed_by(seed: &str, timestamp: f64) -> SignatureData {
        sign_at(&COMPONENTS, None, &PrivateKey::from_seed(seed), timestamp).unwrap()
    }

    fn public(seed: &str) -> PublicKey {
        PrivateKey::from_seed(seed).public_key()
    }

    #[test]
    fn first_matching_key_wins() {
        let envelope = signed_by("b", NOW);
        let keys = [public("a"), public("b"), public("c")];
        assert_eq!(
            verify_at(&COMPONENTS, None, &envelope, &keys, NOW),
            VerificationOutcome::Valid
        );
    }

    #[test]
    fn empty_candidate_list_is_invalid() {
        let envelope = signed_by("a", NOW);
        assert_eq!(
            verify_at(&COMPONENTS, None, &envelope, &[], NOW),
            VerificationOutcome::Invalid
        );
    }

    #[test]
    fn outdated_check_precedes_signature_check() {
        let mut envelope = signed_by("a", NOW - 5.0);
        envelope.signature = vec![0; 3];
        assert_eq!(
            verify_at(&COMPONENTS, None, &envelope, &[public("a")], NOW),
            VerificationOutcome::Outdated
        );
    }

    #[test]
    fn truncated_signature_is_invalid() {
        let mut envelope = signed_by("a", NOW);
        envelope.signature.truncate(63);
        assert_eq!(
            verify_at(&COMPONENTS, None, &envelope, &[public("a")], NOW),
            VerificationOutcome::Invalid
        );
    }

    #[test]
    fn verifier_uses_envelope_timestamp() {
        let envelope = signed_by("a", NOW - 1.25);
        assert_eq!(
            verify_at(&COMPONENTS, None, &envelope, &[public("a")], NOW),
            VerificationOutcome::Valid
        );
    }

    #[test]
    fn resolves_each_role() {
        let registry = KeySet::new(public("admin"))
            .with_user(public("user"))
            .with_viewer(public("viewer"));

        for (seed, expected) in [
            ("admin", KeyType::Admin),
            ("user", KeyType::User),
            ("viewer", KeyType::Viewer),
            ("stranger", KeyType::None),
        ] {
            let envelope = signed_by(seed, NOW);
            assert_eq!(
                resolve_role_at(&COMPONENTS, None, &envelope, &registry, NOW),
                expected,
                "seed {seed}"
            );
        }
    }

    #[test]
    fn outdated_envelope_resolves_to_none() {
        let registry = KeySet::new(public("admin"));
        let envelope = signed_by("admin", NOW - 3.0);
        assert_eq!(
            resolve_role_at(&COMPONENTS, None, &envelope, &registry, NOW),
            KeyType::None
        );
    }

    #[test]
    fn outcome_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&VerificationOutcome::Outdated).unwrap(),
            "\"outdated\""
        );
    }
}
