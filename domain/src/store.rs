//! Server-owned stores for login attempts and sessions, with periodic eviction.

use log::*;
use salesforce_auth::oauth::StateManager;
use salesforce_auth::session::SessionStore;
use service::config::Config;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

// Upper bound on configured lifetimes so expiry arithmetic cannot overflow.
const MAX_TTL: Duration = Duration::from_secs(10 * 365 * 24 * 60 * 60);

/// Login attempts in flight and authenticated sessions.
///
/// Cloning is cheap; clones share the same underlying maps.
#[derive(Clone, Default)]
pub struct Stores {
    pub states: StateManager,
    pub sessions: SessionStore,
}

impl Stores {
    pub fn new(config: &Config) -> Self {
        Self {
            states: StateManager::with_ttl(to_chrono(config.oauth_state_ttl())),
            sessions: SessionStore::with_ttl(to_chrono(config.session_expiry())),
        }
    }

    /// Evict expired login attempts and sessions.
    ///
    /// Returns `(states_evicted, sessions_evicted)`.
    pub fn evict_expired(&self) -> (usize, usize) {
        (
            self.states.cleanup_expired(),
            self.sessions.cleanup_expired(),
        )
    }
}

/// Spawn a background task that calls [`Stores::evict_expired`] every `period`.
pub fn spawn_eviction(stores: Stores, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let (states, sessions) = stores.evict_expired();
            if states > 0 || sessions > 0 {
                debug!("Evicted {states} expired login attempt(s) and {sessions} expired session(s)");
            }
        }
    })
}

fn to_chrono(ttl: Duration) -> chrono::Duration {
    chrono::Duration::from_std(ttl.min(MAX_TTL)).unwrap_or_else(|_| chrono::Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesforce_auth::oauth::{PkceVerifier, UserInfo};

    fn expired_stores() -> Stores {
        Stores {
            states: StateManager::with_ttl(chrono::Duration::seconds(-1)),
            sessions: SessionStore::with_ttl(chrono::Duration::seconds(-1)),
        }
    }

    #[test]
    fn test_to_chrono_clamps_huge_values() {
        assert_eq!(to_chrono(Duration::from_secs(600)), chrono::Duration::seconds(600));
        assert_eq!(
            to_chrono(Duration::from_secs(u64::MAX)),
            chrono::Duration::from_std(MAX_TTL).unwrap()
        );
    }

    #[test]
    fn test_evict_expired() {
        let stores = expired_stores();
        stores
            .states
            .generate("http://localhost:3001".to_string(), PkceVerifier::generate());
        stores
            .sessions
            .insert("token", UserInfo::default(), "https://a.test".to_string());

        assert_eq!(stores.evict_expired(), (1, 1));
        assert!(stores.states.is_empty());
        assert!(stores.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_spawn_eviction_sweeps_in_background() {
        let stores = expired_stores();
        stores
            .states
            .generate("http://localhost:3001".to_string(), PkceVerifier::generate());

        let handle = spawn_eviction(stores.clone(), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        assert!(stores.states.is_empty());
    }
}
