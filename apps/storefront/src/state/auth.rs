//! # Auth State
//!
//! The signed-in session: who the user is and the bearer token.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  startup ── hydrate ──► token + user from durable storage               │
//! │                                                                         │
//! │  login / register                                                       │
//! │     loading = true, error = None                                        │
//! │        ├── Ok  ──► user + token stored (memory AND storage)             │
//! │        └── Err ──► error = message; prior session untouched             │
//! │                                                                         │
//! │  logout ────────────► memory cleared, storage keys removed              │
//! │  401 outside /auth ─► force_logout (client already cleared storage)     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `is_authenticated` is derived from the token alone.

use std::sync::Arc;

use parking_lot::Mutex;
use scopeguard::ScopeGuard;
use tracing::{debug, info, warn};

use storefront_api::AuthApi;
use storefront_core::{AuthSession, Credentials, RegisterRequest, User, UserPatch, ADMIN_EMAIL};
use storefront_storage::{keys, Storage, StorageExt};

use crate::error::{AppError, AppResult};

/// Snapshot of the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Admin access is keyed on the account email.
    pub fn is_admin(&self) -> bool {
        self.is_authenticated()
            && self
                .user
                .as_ref()
                .is_some_and(|user| user.email == ADMIN_EMAIL)
    }
}

/// Auth slice.
pub struct AuthSlice {
    api: Arc<dyn AuthApi>,
    storage: Arc<dyn Storage>,
    state: Mutex<AuthState>,
}

impl AuthSlice {
    /// Creates the slice, restoring any session left in `storage`.
    pub fn new(api: Arc<dyn AuthApi>, storage: Arc<dyn Storage>) -> Self {
        let token = match storage.get(keys::TOKEN) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Could not read stored token");
                None
            }
        };
        let user: Option<User> = storage.load_json(keys::USER);

        debug!(
            authenticated = token.is_some(),
            has_user = user.is_some(),
            "Auth state hydrated"
        );

        AuthSlice {
            api,
            storage,
            state: Mutex::new(AuthState {
                user,
                token,
                ..AuthState::default()
            }),
        }
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.lock().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.lock().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.state.lock().is_admin()
    }

    pub fn user(&self) -> Option<User> {
        self.state.lock().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    // =========================================================================
    // Async Operations
    // =========================================================================

    pub async fn login(&self, credentials: &Credentials) -> AppResult<User> {
        let loading = self.begin();
        let result = self.api.login(credentials).await;
        drop(loading);
        self.finish(result, "Login failed")
    }

    pub async fn register(&self, request: &RegisterRequest) -> AppResult<User> {
        let loading = self.begin();
        let result = self.api.register(request).await;
        drop(loading);
        self.finish(result, "Registration failed")
    }

    /// Raises `loading` until the returned guard drops, including when the
    /// request future is abandoned.
    fn begin(&self) -> ScopeGuard<(), impl FnOnce(()) + '_> {
        {
            let mut state = self.state.lock();
            state.loading = true;
            state.error = None;
        }
        scopeguard::guard((), |_| self.state.lock().loading = false)
    }

    fn finish(
        &self,
        result: Result<AuthSession, storefront_api::ApiError>,
        fallback: &str,
    ) -> AppResult<User> {
        match result {
            Ok(session) => {
                self.store_session(&session);
                let mut state = self.state.lock();
                state.user = Some(session.user.clone());
                state.token = Some(session.token);
                info!(user_id = %session.user.id, "Signed in");
                Ok(session.user)
            }
            Err(e) => {
                let err = AppError::from_api(e, fallback);
                let mut state = self.state.lock();
                state.error = Some(err.message.clone());
                warn!(code = ?err.code, "Authentication failed");
                Err(err)
            }
        }
    }

    fn store_session(&self, session: &AuthSession) {
        if let Err(e) = self.storage.set(keys::TOKEN, &session.token) {
            warn!(error = %e, "Failed to persist token");
        }
        self.storage.persist(keys::USER, &session.user);
    }

    // =========================================================================
    // Synchronous Operations
    // =========================================================================

    /// Clears the session in memory and in durable storage.
    pub fn logout(&self) {
        self.clear_session();
        info!("Signed out");
    }

    /// Clears the in-memory session after the backend rejected the token.
    pub fn force_logout(&self) {
        if self.is_authenticated() {
            warn!("Session rejected by backend; signing out");
        }
        self.clear_session();
    }

    fn clear_session(&self) {
        {
            let mut state = self.state.lock();
            state.user = None;
            state.token = None;
            state.error = None;
        }
        self.storage.forget(keys::TOKEN);
        self.storage.forget(keys::USER);
    }

    /// Merges `patch` into the current user and persists the result.
    ///
    /// Returns `None` when nobody is signed in.
    pub fn update_user(&self, patch: UserPatch) -> Option<User> {
        let updated = {
            let mut state = self.state.lock();
            let user = state.user.as_mut()?;
            user.apply(patch);
            user.clone()
        };
        self.storage.persist(keys::USER, &updated);
        debug!(user_id = %updated.id, "Profile updated");
        Some(updated)
    }

    pub fn clear_error(&self) {
        self.state.lock().error = None;
    }
}

impl std::fmt::Debug for AuthSlice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSlice")
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}
