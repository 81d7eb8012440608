use super::envelope::{SignatureData, unix_now};
use super::signer::RequestSigner;
use super::verifier::{VerificationOutcome, resolve_role_at, verify_at};
use crate::error::AuthError;
use crate::keys::PublicKey;
use crate::keyset::KeySet;
use crate::role::KeyType;

/// The material that gets signed: a method, raw path segments, and an
/// optional opaque body.
///
/// Segments are kept un-percent-encoded. URL encoding belongs to the
/// transport and never reaches the signed bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalRequest {
    method: String,
    segments: Vec<String>,
    body: Option<Vec<u8>>,
}

impl LogicalRequest {
    pub fn new<M, I, S>(method: M, segments: I) -> Self
    where
        M: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: method.into(),
            segments: segments.into_iter().map(Into::into).collect(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Method followed by the path segments.
    pub fn components(&self) -> Vec<&str> {
        std::iter::once(self.method.as_str())
            .chain(self.segments.iter().map(String::as_str))
            .collect()
    }

    pub fn sign(&self, signer: &dyn RequestSigner) -> Result<SignatureData, AuthError> {
        self.sign_at(signer, unix_now())
    }

    pub fn sign_at(
        &self,
        signer: &dyn RequestSigner,
        timestamp: f64,
    ) -> Result<SignatureData, AuthError> {
        super::sign_at(&self.components(), self.body(), signer, timestamp)
    }

    pub fn verify_at(
        &self,
        envelope: &SignatureData,
        candidate_keys: &[PublicKey],
        now: f64,
    ) -> VerificationOutcome {
        verify_at(&self.components(), self.body(), envelope, candidate_keys, now)
    }

    pub fn resolve_role_at(
        &self,
        envelope: &SignatureData,
        registry: &KeySet<PublicKey>,
        now: f64,
    ) -> KeyType {
        resolve_role_at(&self.components(), self.body(), envelope, registry, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::PrivateKey;

    #[test]
    fn method_is_component_zero() {
        let request = LogicalRequest::new("PUT", ["time", "alice", "2024", "5"]);
        assert_eq!(request.components(), ["PUT", "time", "alice", "2024", "5"]);
    }

    #[test]
    fn body_is_part_of_the_signature() {
        let key = PrivateKey::from_seed("body");
        let request = LogicalRequest::new("PUT", ["keys"]).with_body(b"{}".to_vec());
        let envelope = request.sign_at(&key, 50.0).unwrap();

        assert!(
            request
                .verify_at(&envelope, &[key.public_key()], 50.0)
                .is_valid()
        );

        let other_body = LogicalRequest::new("PUT", ["keys"]).with_body(b"[]".to_vec());
        assert_eq!(
            other_body.verify_at(&envelope, &[key.public_key()], 50.0),
            VerificationOutcome::Invalid
        );
    }

    #[test]
    fn role_resolution_through_request() {
        let admin = PrivateKey::from_seed("admin");
        let registry = KeySet::new(admin.public_key());
        let request = LogicalRequest::new("GET", ["role"]);
        let envelope = request.sign_at(&admin, 7.0).unwrap();
        assert_eq!(request.resolve_role_at(&envelope, &registry, 8.0), KeyType::Admin);
    }
}
