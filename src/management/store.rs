use std::{collections::HashMap, fmt};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::EncryptedToken;

/// Number of leading refresh-token characters that make up a [`UserId`].
pub const USER_ID_LEN: usize = 10;

/// Opaque session key handed to the client after a successful login.
///
/// It is the first [`USER_ID_LEN`] characters of the refresh token, not an
/// identity: two refresh tokens sharing a prefix share a session slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Derives the session key from a refresh token.
    pub fn from_refresh_token(refresh_token: &str) -> Self {
        Self(refresh_token.chars().take(USER_ID_LEN).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage of encrypted refresh tokens keyed by [`UserId`].
///
/// Implementations only ever see ciphertext. Operations on the same key are
/// not coordinated with each other; the last write wins.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn put(&self, user_id: UserId, token: EncryptedToken);

    async fn get(&self, user_id: &UserId) -> Option<EncryptedToken>;

    /// Removes the entry, returning whether one existed.
    async fn delete(&self, user_id: &UserId) -> bool;
}

/// Process-memory [`TokenStore`]. Everything is gone after a restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<HashMap<UserId, EncryptedToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.tokens.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.lock().await.is_empty()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn put(&self, user_id: UserId, token: EncryptedToken) {
        self.tokens.lock().await.insert(user_id, token);
    }

    async fn get(&self, user_id: &UserId) -> Option<EncryptedToken> {
        self.tokens.lock().await.get(user_id).cloned()
    }

    async fn delete(&self, user_id: &UserId) -> bool {
        self.tokens.lock().await.remove(user_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_is_token_prefix() {
        let id = UserId::from_refresh_token("AQBxyz1234567890rest");
        assert_eq!(id.as_str(), "AQBxyz1234");
        assert_eq!(id, UserId::from_refresh_token("AQBxyz1234567890rest"));
    }

    #[test]
    fn test_user_id_short_token() {
        assert_eq!(UserId::from_refresh_token("abc").as_str(), "abc");
        assert_eq!(UserId::from_refresh_token("").as_str(), "");
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = MemoryTokenStore::new();
        let id = UserId::new("user-1");

        assert!(store.get(&id).await.is_none());
        store.put(id.clone(), EncryptedToken::from_raw("first")).await;
        store.put(id.clone(), EncryptedToken::from_raw("second")).await;
        assert_eq!(
            store.get(&id).await,
            Some(EncryptedToken::from_raw("second"))
        );
        assert_eq!(store.len().await, 1);

        assert!(store.delete(&id).await);
        assert!(!store.delete(&id).await);
        assert!(store.is_empty().await);
    }
}
