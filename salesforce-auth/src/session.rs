//! In-memory store of authenticated sessions keyed by bearer token.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use sha2::{Digest, Sha256};

use crate::oauth::UserInfo;

/// An authenticated session created by a successful code exchange.
#[derive(Debug, Clone)]
pub struct Session {
    /// Profile fetched from the provider when the session was created.
    pub user_info: UserInfo,
    /// Org instance the access token belongs to.
    pub instance_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Concurrent session store.
///
/// Sessions are keyed by the SHA-256 digest of their access token, so the
/// store never holds bearer tokens in the clear and lookups are exact-match only.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a new session store with default TTL of 2 hours.
    pub fn new() -> Self {
        Self::with_ttl(Duration::hours(2))
    }

    /// Create a new session store with custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Store a session for `access_token`, replacing any session already held for it.
    pub fn insert(&self, access_token: &str, user_info: UserInfo, instance_url: String) -> Session {
        let created_at = Utc::now();
        let session = Session {
            user_info,
            instance_url,
            created_at,
            expires_at: created_at + self.ttl,
        };
        self.sessions
            .insert(Self::key(access_token), session.clone());
        session
    }

    /// Look up the live session for `access_token`.
    ///
    /// An expired session is removed and reported as absent.
    pub fn get(&self, access_token: &str) -> Option<Session> {
        let key = Self::key(access_token);
        self.sessions.remove_if(&key, |_, session| session.is_expired());
        self.sessions.get(&key).map(|entry| entry.value().clone())
    }

    /// Remove the live session for `access_token`, returning it if one existed.
    pub fn remove(&self, access_token: &str) -> Option<Session> {
        self.sessions
            .remove(&Self::key(access_token))
            .map(|(_, session)| session)
            .filter(|session| !session.is_expired())
    }

    /// Number of stored sessions, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Evict expired sessions. Returns the number of entries removed.
    pub fn cleanup_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired());
        before.saturating_sub(self.sessions.len())
    }

    fn key(access_token: &str) -> String {
        hex::encode(Sha256::digest(access_token.as_bytes()))
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_info(name: &str) -> UserInfo {
        UserInfo {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            ..Default::default()
        }
    }

    #[test]
    fn test_insert_and_get() {
        let store = SessionStore::new();
        store.insert("token-a", user_info("Ada"), "https://a.test".to_string());

        let session = store.get("token-a").unwrap();
        assert_eq!(session.user_info.name, "Ada");
        assert_eq!(session.instance_url, "https://a.test");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_requires_exact_token() {
        let store = SessionStore::new();
        store.insert("token-a", user_info("Ada"), "https://a.test".to_string());

        assert!(store.get("").is_none());
        assert!(store.get("token-A").is_none());
        assert!(store.get("token-a ").is_none());
    }

    #[test]
    fn test_sessions_are_independent() {
        let store = SessionStore::new();
        store.insert("token-a", user_info("Ada"), "https://a.test".to_string());
        store.insert("token-b", user_info("Bob"), "https://b.test".to_string());

        assert_eq!(store.get("token-a").unwrap().user_info.name, "Ada");
        assert_eq!(store.get("token-b").unwrap().user_info.name, "Bob");

        assert!(store.remove("token-a").is_some());
        assert!(store.get("token-a").is_none());
        assert_eq!(store.get("token-b").unwrap().user_info.name, "Bob");
    }

    #[test]
    fn test_store_does_not_key_by_raw_token() {
        let store = SessionStore::new();
        store.insert("token-a", user_info("Ada"), "https://a.test".to_string());

        assert!(!store.sessions.contains_key("token-a"));
    }

    #[test]
    fn test_expired_session_is_absent() {
        let store = SessionStore::with_ttl(Duration::seconds(-1));
        store.insert("token-a", user_info("Ada"), "https://a.test".to_string());

        assert!(store.get("token-a").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_expired_session_reports_none() {
        let store = SessionStore::with_ttl(Duration::seconds(-1));
        store.insert("token-a", user_info("Ada"), "https://a.test".to_string());

        assert!(store.remove("token-a").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_cleanup_expired() {
        let store = SessionStore::with_ttl(Duration::seconds(-1));
        store.insert("token-a", user_info("Ada"), "https://a.test".to_string());
        store.insert("token-b", user_info("Bob"), "https://b.test".to_string());

        assert_eq!(store.cleanup_expired(), 2);
        assert!(store.is_empty());
    }
}
