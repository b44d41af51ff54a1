//! Auth/session store — local user identity and onboarding status.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::store::{PersistedStore, StoreState};

/// The locally provisioned user. There is no server account; the app
/// creates this record when onboarding completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub onboarding_completed: bool,
}

impl User {
    /// The default local user provisioned at onboarding completion.
    pub fn local() -> Self {
        Self {
            id: "1".to_string(),
            name: "User".to_string(),
            email: "user@example.com".to_string(),
            onboarding_completed: true,
        }
    }
}

/// Auth store state. Fully persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    /// True until the onboarding flow completes for the first time.
    pub is_onboarding: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            is_onboarding: true,
        }
    }
}

impl StoreState for AuthState {
    const NAME: &'static str = "auth_storage";
    type Projection = AuthState;

    fn project(&self) -> AuthState {
        self.clone()
    }

    fn merge(_defaults: Self, projection: AuthState) -> Self {
        projection
    }
}

/// Auth feature store.
pub type AuthStore = PersistedStore<AuthState>;

/// Domain operations over the auth store.
pub trait AuthOps {
    /// Set the current user and mark the session authenticated.
    fn set_user(&self, user: User);
    /// Mark onboarding complete, flipping the embedded user's flag too.
    fn complete_onboarding(&self);
    fn logout(&self);
}

impl AuthOps for Arc<AuthStore> {
    fn set_user(&self, user: User) {
        self.update(|mut s| {
            s.user = Some(user);
            s.is_authenticated = true;
            s
        });
    }

    fn complete_onboarding(&self) {
        self.update(|mut s| {
            s.is_onboarding = false;
            if let Some(ref mut user) = s.user {
                user.onboarding_completed = true;
            }
            s
        });
    }

    fn logout(&self) {
        self.update(|mut s| {
            s.user = None;
            s.is_authenticated = false;
            s
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;

    fn store() -> Arc<AuthStore> {
        PersistedStore::new(AuthState::default(), Arc::new(MemoryBackend::new()))
    }

    #[test]
    fn default_state_is_unauthenticated_and_onboarding() {
        let s = AuthState::default();
        assert!(s.user.is_none());
        assert!(!s.is_authenticated);
        assert!(s.is_onboarding);
    }

    #[test]
    fn set_user_authenticates() {
        let store = store();
        store.set_user(User::local());

        let s = store.snapshot();
        assert!(s.is_authenticated);
        assert_eq!(s.user.unwrap().name, "User");
    }

    #[test]
    fn complete_onboarding_flips_both_flags() {
        let store = store();
        store.set_user(User {
            onboarding_completed: false,
            ..User::local()
        });
        store.complete_onboarding();

        let s = store.snapshot();
        assert!(!s.is_onboarding);
        assert!(s.user.unwrap().onboarding_completed);
    }

    #[test]
    fn complete_onboarding_without_user_only_clears_flag() {
        let store = store();
        store.complete_onboarding();

        let s = store.snapshot();
        assert!(!s.is_onboarding);
        assert!(s.user.is_none());
    }

    #[test]
    fn logout_clears_user_but_keeps_onboarding_status() {
        let store = store();
        store.set_user(User::local());
        store.complete_onboarding();
        store.logout();

        let s = store.snapshot();
        assert!(s.user.is_none());
        assert!(!s.is_authenticated);
        assert!(!s.is_onboarding);
    }

    #[test]
    fn auth_state_serde_roundtrip() {
        let state = AuthState {
            user: Some(User::local()),
            is_authenticated: true,
            is_onboarding: false,
        };
        let json = serde_json::to_string(&state).unwrap();
        let parsed: AuthState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
