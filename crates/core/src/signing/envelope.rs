use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::verifier::REPLAY_WINDOW_SECS;

/// The `{timestamp, signature}` pair that travels with a signed request.
///
/// Serialized as `timestamp=<decimal>&signature=<base64url>` when carried in a
/// query string. Created fresh per request and never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureData {
    /// Signer's wall clock at signing time, seconds since the Unix epoch.
    pub timestamp: f64,
    #[serde(with = "base64_url")]
    pub signature: Vec<u8>,
}

impl SignatureData {
    pub fn age_at(&self, now: f64) -> f64 {
        now - self.timestamp
    }

    /// Whether `0 <= age <= REPLAY_WINDOW_SECS`. Non-finite ages are stale.
    pub fn is_fresh_at(&self, now: f64) -> bool {
        (0.0..=REPLAY_WINDOW_SECS).contains(&self.age_at(now))
    }
}

/// Current wall-clock time in fractional seconds since the Unix epoch.
pub fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |elapsed| elapsed.as_secs_f64())
}

mod base64_url {
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&URL_SAFE.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        URL_SAFE.decode(encoded).map_err(serde::de::Error::custom)
    }
}
