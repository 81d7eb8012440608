use serde::{Deserialize, Serialize};

use crate::role::KeyType;

/// The admin / users / viewers grouping of keys.
///
/// Generic over the key representation, so the same shape holds private keys
/// on a device and public keys on the service. Exactly one admin; `users` and
/// `viewers` may be empty. Nothing here prevents the same key from appearing
/// under more than one role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeySet<K> {
    pub admin: K,
    #[serde(default = "Vec::new")]
    pub users: Vec<K>,
    #[serde(default = "Vec::new")]
    pub viewers: Vec<K>,
}

impl<K> KeySet<K> {
    pub fn new(admin: K) -> Self {
        Self {
            admin,
            users: Vec::new(),
            viewers: Vec::new(),
        }
    }

    pub fn with_user(mut self, key: K) -> Self {
        self.users.push(key);
        self
    }

    pub fn with_viewer(mut self, key: K) -> Self {
        self.viewers.push(key);
        self
    }

    /// Converts every key while keeping role membership and order.
    pub fn map<U, F>(&self, mut f: F) -> KeySet<U>
    where
        F: FnMut(&K) -> U,
    {
        KeySet {
            admin: f(&self.admin),
            users: self.users.iter().map(&mut f).collect(),
            viewers: self.viewers.iter().map(&mut f).collect(),
        }
    }

    /// Like [`KeySet::map`], stopping at the first failed conversion.
    pub fn try_map<U, E, F>(&self, mut f: F) -> Result<KeySet<U>, E>
    where
        F: FnMut(&K) -> Result<U, E>,
    {
        Ok(KeySet {
            admin: f(&self.admin)?,
            users: self.users.iter().map(&mut f).collect::<Result<_, _>>()?,
            viewers: self.viewers.iter().map(&mut f).collect::<Result<_, _>>()?,
        })
    }

    /// Keys holding the given role. `KeyType::None` holds no keys.
    pub fn keys_for(&self, role: KeyType) -> &[K] {
        match role {
            KeyType::Admin => std::slice::from_ref(&self.admin),
            KeyType::User => &self.users,
            KeyType::Viewer => &self.viewers,
            KeyType::None => &[],
        }
    }

    /// All keys tagged with their role, admin first, then users, then viewers.
    pub fn iter(&self) -> impl Iterator<Item = (KeyType, &K)> {
        std::iter::once((KeyType::Admin, &self.admin))
            .chain(self.users.iter().map(|k| (KeyType::User, k)))
            .chain(self.viewers.iter().map(|k| (KeyType::Viewer, k)))
    }
}
