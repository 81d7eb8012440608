use std::sync::Arc;

use screentime_core::{KeySet, PublicKey};
use tokio::sync::RwLock;

/// The service's authorized public keys.
///
/// Each request works on an immutable snapshot; rotation swaps in a whole new
/// [`KeySet`] and never edits one in place.
pub struct Registry {
    current: RwLock<Arc<KeySet<PublicKey>>>,
}

impl Registry {
    pub fn new(keys: KeySet<PublicKey>) -> Self {
        Self {
            current: RwLock::new(Arc::new(keys)),
        }
    }

    pub async fn snapshot(&self) -> Arc<KeySet<PublicKey>> {
        self.current.read().await.clone()
    }

    pub async fn replace(&self, keys: KeySet<PublicKey>) {
        tracing::info!(
            admin = %keys.admin.fingerprint(),
            users = keys.users.len(),
            viewers = keys.viewers.len(),
            "key registry replaced"
        );
        *self.current.write().await = Arc::new(keys);
    }
}
