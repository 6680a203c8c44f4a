//! Application state management.
//!
//! This module contains the core `App` struct that ties the API client,
//! the session store, and the UI collaborator together: startup
//! bootstrapping, login/logout, and the points fetch.

use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::auth::SessionStore;
use crate::ui::{Notice, Ui};

/// The two session states. There is no distinct loading or error state:
/// transient failures only affect the displayed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

/// Application core: owns the session state machine and drives the UI.
pub struct App<U: Ui> {
    api: ApiClient,
    store: SessionStore,
    ui: U,
    state: AuthState,
}

impl<U: Ui> App<U> {
    pub fn new(api: ApiClient, store: SessionStore, ui: U) -> Self {
        Self {
            api,
            store,
            ui,
            state: AuthState::Unauthenticated,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// Select the initial view from the persisted session.
    ///
    /// A stored token enters the authenticated state and kicks off a
    /// speculative points fetch; anything else lands on the login view.
    pub async fn bootstrap(&mut self) {
        self.api.ensure_resolved().await;

        let token = match self.store.get_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "could not read session at startup");
                None
            }
        };

        match token {
            Some(_) => {
                info!("existing session found, showing dashboard");
                self.state = AuthState::Authenticated;
                self.ui.show_dashboard();
                self.fetch_points().await;
            }
            None => {
                info!("no session found, showing login");
                self.state = AuthState::Unauthenticated;
                self.ui.show_login();
            }
        }
    }

    /// Authenticate and enter the dashboard.
    ///
    /// All failure modes stay in the unauthenticated state and raise a
    /// notice; a points failure after a successful login is reported but
    /// never rolls the login back.
    pub async fn login(&mut self, email: &str, password: &str) {
        self.api.ensure_resolved().await;

        let token = match self.api.login(email, password).await {
            Ok(token) => token,
            Err(ApiError::Unauthorized) => {
                warn!("invalid login credentials");
                self.ui.notify(Notice::InvalidCredentials);
                return;
            }
            Err(ApiError::MalformedResponse(reason)) => {
                warn!(%reason, "login response unusable");
                self.ui.notify(Notice::LoginFailed);
                return;
            }
            Err(ApiError::Status { status, body }) => {
                warn!(%status, %body, "login error response");
                self.ui.notify(Notice::UnexpectedError);
                return;
            }
            Err(e) => {
                warn!(error = %e, "login request failed");
                self.ui.notify(Notice::NetworkError);
                return;
            }
        };

        if let Err(e) = self.store.set_token(&token).await {
            warn!(error = %e, "could not persist session token");
            self.ui.notify(Notice::StorageError);
            return;
        }
        // Best-effort: the token is already durable, a missing username
        // only degrades the status display.
        if let Err(e) = self.store.set_username(email).await {
            warn!(error = %e, "could not persist username");
        }

        info!("login successful");
        self.state = AuthState::Authenticated;
        self.ui.show_dashboard();

        if !self.fetch_points().await {
            self.ui.notify(Notice::PointsUnavailable);
        }
    }

    /// Clear the persisted session and return to the login view.
    ///
    /// On a storage failure the state is left unchanged: the session may
    /// still be on disk, so pretending to be signed out would lie.
    pub async fn logout(&mut self) {
        match self.store.clear_all().await {
            Ok(()) => {
                info!("logged out");
                self.state = AuthState::Unauthenticated;
                self.ui.show_login();
            }
            Err(e) => {
                warn!(error = %e, "logout failed to clear session");
                self.ui.notify(Notice::StorageError);
            }
        }
    }

    /// Fetch and display the points balance.
    ///
    /// A missing token is a silent no-op (the speculative startup path);
    /// failures are logged and leave the previously displayed value and
    /// the session state untouched. Returns `false` only when an
    /// authenticated fetch failed and nothing was reported yet, so login
    /// can raise its follow-up notice; already-handled paths return `true`.
    pub async fn fetch_points(&mut self) -> bool {
        self.api.ensure_resolved().await;

        let token = match self.store.get_token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("no token, skipping points fetch");
                return true;
            }
            Err(e) => {
                warn!(error = %e, "could not read token for points fetch");
                self.ui.notify(Notice::StorageError);
                return true;
            }
        };

        match self.api.fetch_points(&token).await {
            Ok(points) => {
                info!(points, "points fetched");
                self.ui.display_points(points);
                true
            }
            Err(e) => {
                warn!(error = %e, "points fetch failed");
                false
            }
        }
    }
}
