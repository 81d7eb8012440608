use crate::error::AuthError;
use crate::keys::PublicKey;

/// Trait for signing canonical request payloads.
///
/// Implementations are synchronous; signing is CPU-bound.
/// For async backends (e.g. a key-provisioning service), use `spawn_blocking`.
pub trait RequestSigner: Send + Sync {
    /// Sign canonical bytes. Returns raw signature bytes.
    fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, AuthError>;

    /// Public half of the signing key, as the service registers it.
    fn public_key(&self) -> PublicKey;

    /// Algorithm identifier string (e.g. "ed25519").
    fn algorithm(&self) -> &str;
}
