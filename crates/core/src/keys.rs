use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ed25519_dalek::{SigningKey, VerifyingKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::AuthError;

/// Raw length of both Ed25519 secret and public keys.
pub const KEY_LENGTH: usize = 32;

/// Ed25519 signing key held by a client device.
///
/// On the wire the 32 raw secret bytes are standard base64 encoded.
#[derive(Clone)]
pub struct PrivateKey {
    signing_key: SigningKey,
}

/// Ed25519 verifying key held by the service.
#[derive(Clone, Copy)]
pub struct PublicKey {
    verifying_key: VerifyingKey,
}

fn decode_raw(encoded: &str) -> Result<[u8; KEY_LENGTH], AuthError> {
    let bytes = STANDARD.decode(encoded.trim())?;
    <[u8; KEY_LENGTH]>::try_from(bytes.as_slice()).map_err(|_| {
        AuthError::InvalidKey(format!(
            "expected {KEY_LENGTH} raw bytes, got {}",
            bytes.len()
        ))
    })
}

impl PrivateKey {
    pub fn from_bytes(bytes: &[u8; KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(bytes),
        }
    }

    /// The SHA-256 hash of the seed becomes the 32-byte secret.
    pub fn from_seed(seed: &str) -> Self {
        Self::from_bytes(&Sha256::digest(seed.as_bytes()).into())
    }

    pub fn from_base64(encoded: &str) -> Result<Self, AuthError> {
        Ok(Self::from_bytes(&decode_raw(encoded)?))
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.signing_key.to_bytes())
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            verifying_key: self.signing_key.verifying_key(),
        }
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl PublicKey {
    pub fn from_bytes(bytes: &[u8; KEY_LENGTH]) -> Result<Self, AuthError> {
        let verifying_key = VerifyingKey::from_bytes(bytes)
            .map_err(|e| AuthError::InvalidKey(e.to_string()))?;
        Ok(Self { verifying_key })
    }

    pub fn from_base64(encoded: &str) -> Result<Self, AuthError> {
        Self::from_bytes(&decode_raw(encoded)?)
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        self.verifying_key.as_bytes()
    }

    /// Short hex identifier used in logs in place of the full key.
    pub fn fingerprint(&self) -> String {
        hex::encode(&self.as_bytes()[..8])
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key().fingerprint())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKey").field(&self.to_base64()).finish()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.signing_key == other.signing_key
    }
}

impl Eq for PrivateKey {}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for PublicKey {}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl FromStr for PrivateKey {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base64(s)
    }
}

impl FromStr for PublicKey {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base64(s)
    }
}

impl Serialize for PrivateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for PrivateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Self::from_base64(&encoded).map_err(serde::de::Error::custom)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Self::from_base64(&encoded).map_err(serde::de::Error::custom)
    }
}
