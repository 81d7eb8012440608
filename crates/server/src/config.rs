use std::path::Path;

use anyhow::{Context, Result, bail};
use screentime_core::{KeySet, PublicKey};

/// Loads the initial key registry.
///
/// A registry file (a JSON `KeySet` of base64 public keys) takes precedence
/// over a lone admin key; with only an admin key the user and viewer sets
/// start empty.
pub fn load_registry(
    keys_file: Option<&Path>,
    admin_public_key: Option<&str>,
) -> Result<KeySet<PublicKey>> {
    if let Some(path) = keys_file {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading key registry {}", path.display()))?;
        let encoded: KeySet<String> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing key registry {}", path.display()))?;
        return encoded
            .try_map(|key| {
                PublicKey::from_base64(key).with_context(|| format!("decoding public key {key:?}"))
            })
            .with_context(|| format!("loading key registry {}", path.display()));
    }

    match admin_public_key {
        Some(encoded) => {
            let admin = PublicKey::from_base64(encoded).context("decoding admin public key")?;
            Ok(KeySet::new(admin))
        }
        None => bail!("either a key registry file or an admin public key is required"),
    }
}
