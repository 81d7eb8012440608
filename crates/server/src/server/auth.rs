use screentime_core::signing::unix_now;
use screentime_core::{KeyType, LogicalRequest, SignatureData};

use crate::error::ServerError;
use crate::registry::Registry;

/// Resolves the caller's role, turning an unrecognized signature into an
/// authorization error that says whether it was stale or simply wrong.
pub async fn authenticate(
    registry: &Registry,
    request: &LogicalRequest,
    envelope: &SignatureData,
) -> Result<KeyType, ServerError> {
    let now = unix_now();
    let keys = registry.snapshot().await;

    match request.resolve_role_at(envelope, &keys, now) {
        KeyType::None if !envelope.is_fresh_at(now) => {
            tracing::warn!(
                method = request.method(),
                age = envelope.age_at(now),
                "rejected outdated signature"
            );
            Err(ServerError::OutdatedSignature)
        }
        KeyType::None => {
            tracing::warn!(method = request.method(), "rejected invalid signature");
            Err(ServerError::InvalidSignature)
        }
        role => Ok(role),
    }
}

/// Like [`authenticate`], additionally requiring `allowed(role)`.
pub async fn authorize(
    registry: &Registry,
    request: &LogicalRequest,
    envelope: &SignatureData,
    action: &'static str,
    allowed: fn(&KeyType) -> bool,
) -> Result<KeyType, ServerError> {
    let role = authenticate(registry, request, envelope).await?;
    if !allowed(&role) {
        tracing::warn!(%role, action, "role not permitted");
        return Err(ServerError::Forbidden { role, action });
    }
    Ok(role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use screentime_core::{KeySet, PrivateKey};

    fn registry() -> Registry {
        Registry::new(
            KeySet::new(PrivateKey::from_seed("admin").public_key())
                .with_viewer(PrivateKey::from_seed("viewer").public_key()),
        )
    }

    #[tokio::test]
    async fn stale_signature_is_reported_as_outdated() {
        let request = LogicalRequest::new("GET", ["role"]);
        let envelope = request
            .sign_at(&PrivateKey::from_seed("admin"), unix_now() - 60.0)
            .unwrap();
        let result = authenticate(&registry(), &request, &envelope).await;
        assert!(matches!(result, Err(ServerError::OutdatedSignature)));
    }

    #[tokio::test]
    async fn unknown_key_is_reported_as_invalid() {
        let request = LogicalRequest::new("GET", ["role"]);
        let envelope = request.sign(&PrivateKey::from_seed("intruder")).unwrap();
        let result = authenticate(&registry(), &request, &envelope).await;
        assert!(matches!(result, Err(ServerError::InvalidSignature)));
    }

    #[tokio::test]
    async fn viewer_cannot_write() {
        let request = LogicalRequest::new("PUT", ["time", "alice", "2024", "5"]).with_body("{}");
        let envelope = request.sign(&PrivateKey::from_seed("viewer")).unwrap();
        let result = authorize(&registry(), &request, &envelope, "write", KeyType::can_write).await;
        assert!(matches!(
            result,
            Err(ServerError::Forbidden {
                role: KeyType::Viewer,
                ..
            })
        ));
    }
}
