use ed25519_dalek::Signer;

use super::signer::RequestSigner;
use crate::error::AuthError;
use crate::keys::{PrivateKey, PublicKey};

/// Length of an Ed25519 signature in bytes.
pub const SIGNATURE_LENGTH: usize = ed25519_dalek::SIGNATURE_LENGTH;

impl RequestSigner for PrivateKey {
    fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, AuthError> {
        let signature = self
            .signing_key()
            .try_sign(payload)
            .map_err(|e| AuthError::Signing(format!("ed25519 sign failed: {e}")))?;
        Ok(signature.to_bytes().to_vec())
    }

    fn public_key(&self) -> PublicKey {
        PrivateKey::public_key(self)
    }

    fn algorithm(&self) -> &str {
        "ed25519"
    }
}
