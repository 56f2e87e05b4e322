//! State management for in-flight OAuth authorization attempts.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::debug;

use super::PkceVerifier;

/// Data stored for one authorization attempt, keyed by its state token.
#[derive(Debug, Clone)]
pub struct StateData {
    /// Origin of the application that started the attempt; the callback redirects back here.
    pub origin: String,
    /// PKCE verifier whose challenge was sent with the authorization URL.
    pub pkce_verifier: PkceVerifier,
    /// When this state was issued.
    pub created_at: DateTime<Utc>,
    /// When this state expires.
    pub expires_at: DateTime<Utc>,
}

impl StateData {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Manager for OAuth state parameters with expiration.
///
/// Each state token correlates a provider callback with exactly one authorization
/// attempt. Tokens are single-use and bounded in lifetime.
#[derive(Clone)]
pub struct StateManager {
    states: Arc<Mutex<HashMap<String, StateData>>>,
    ttl: Duration,
}

impl StateManager {
    /// Create a new state manager with default TTL of 10 minutes.
    pub fn new() -> Self {
        Self::with_ttl(Duration::minutes(10))
    }

    /// Create a new state manager with custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            states: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Generate a new state token and store the attempt's origin and verifier.
    ///
    /// # Returns
    ///
    /// The generated state token string.
    pub fn generate(&self, origin: String, pkce_verifier: PkceVerifier) -> String {
        let state = Self::generate_token();
        let created_at = Utc::now();

        let data = StateData {
            origin,
            pkce_verifier,
            created_at,
            expires_at: created_at + self.ttl,
        };

        self.lock().insert(state.clone(), data);

        state
    }

    /// Validate and consume a state token.
    ///
    /// The entry is removed whether or not it is still valid, so a token can
    /// never be presented twice.
    ///
    /// # Returns
    ///
    /// `Some(StateData)` if valid, `None` if unknown, already consumed, or expired.
    pub fn validate(&self, state: &str) -> Option<StateData> {
        let data = self.lock().remove(state)?;

        if data.is_expired(Utc::now()) {
            debug!("Rejecting expired OAuth state issued at {}", data.created_at);
            return None;
        }
        Some(data)
    }

    /// Returns true if `state` is currently pending.
    pub fn contains(&self, state: &str) -> bool {
        self.lock().contains_key(state)
    }

    /// Number of pending authorization attempts.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clean up expired states.
    ///
    /// Returns the number of entries evicted.
    pub fn cleanup_expired(&self) -> usize {
        let mut states = self.lock();
        let before = states.len();
        let now = Utc::now();
        states.retain(|_, data| !data.is_expired(now));
        before - states.len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, StateData>> {
        self.states.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Generate a cryptographically random state token.
    fn generate_token() -> String {
        let random_bytes: [u8; 32] = rand::thread_rng().gen();
        hex::encode(random_bytes)
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "http://localhost:3001";

    #[test]
    fn test_generate_state() {
        let manager = StateManager::new();
        let state = manager.generate(ORIGIN.to_string(), PkceVerifier::generate());
        assert_eq!(state.len(), 64); // 32 bytes hex encoded
        assert!(manager.contains(&state));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_validate_state() {
        let manager = StateManager::new();
        let verifier = PkceVerifier::from_string("verifier".to_string());
        let state = manager.generate(ORIGIN.to_string(), verifier.clone());

        let data = manager.validate(&state).unwrap();
        assert_eq!(data.origin, ORIGIN);
        assert_eq!(data.pkce_verifier, verifier);
        assert!(data.expires_at > data.created_at);
    }

    #[test]
    fn test_validate_invalid_state() {
        let manager = StateManager::new();
        assert!(manager.validate("invalid_state").is_none());
    }

    #[test]
    fn test_state_consumed_after_validation() {
        let manager = StateManager::new();
        let state = manager.generate(ORIGIN.to_string(), PkceVerifier::generate());

        assert!(manager.validate(&state).is_some());
        assert!(manager.validate(&state).is_none());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_attempts_keep_their_own_verifier() {
        let manager = StateManager::new();
        let first = PkceVerifier::generate();
        let second = PkceVerifier::generate();
        let first_state = manager.generate(ORIGIN.to_string(), first.clone());
        let second_state = manager.generate("http://other.test".to_string(), second.clone());

        let second_data = manager.validate(&second_state).unwrap();
        let first_data = manager.validate(&first_state).unwrap();
        assert_eq!(first_data.pkce_verifier, first);
        assert_eq!(second_data.pkce_verifier, second);
        assert_eq!(second_data.origin, "http://other.test");
    }

    #[test]
    fn test_expired_state() {
        let manager = StateManager::with_ttl(Duration::seconds(-1));
        let state = manager.generate(ORIGIN.to_string(), PkceVerifier::generate());

        assert!(manager.validate(&state).is_none());
        assert!(!manager.contains(&state));
    }

    #[test]
    fn test_cleanup_expired() {
        let expired = StateManager::with_ttl(Duration::seconds(-1));
        expired.generate(ORIGIN.to_string(), PkceVerifier::generate());
        expired.generate(ORIGIN.to_string(), PkceVerifier::generate());
        assert_eq!(expired.cleanup_expired(), 2);
        assert!(expired.is_empty());

        let live = StateManager::new();
        live.generate(ORIGIN.to_string(), PkceVerifier::generate());
        assert_eq!(live.cleanup_expired(), 0);
        assert_eq!(live.len(), 1);
    }
}
