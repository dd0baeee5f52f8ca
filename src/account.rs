//! Sign-up, login, logout and self-service profile edits.
//!
//! Each flow reports its outcome as a toast. Backend and network failures are
//! toasts too; only local session file errors are returned.

use anyhow::Result;
use tracing::{error, info};

use crate::api::{LoginOutcome, LoginRequest, ProfileEdit, Registration, UsersApi};
use crate::config::Config;
use crate::panel::ToastSlot;
use crate::session::{require, AccessError, Capability, Session, SessionStore, StoredSession};

const INVALID_LOGIN: &str = "Invalid username or password!";

pub struct Accounts<'a> {
    users: &'a UsersApi,
    store: &'a SessionStore,
    config: &'a Config,
}

impl<'a> Accounts<'a> {
    pub fn new(users: &'a UsersApi, store: &'a SessionStore, config: &'a Config) -> Self {
        Self {
            users,
            store,
            config,
        }
    }

    /// Check the form locally, then create the account. Nothing is sent when
    /// a local check fails.
    pub async fn register(&self, form: Registration, toasts: &mut ToastSlot) -> bool {
        if let Err(message) = form.validate() {
            toasts.error(message);
            return false;
        }
        match self.users.register(&form.into_user()).await {
            Ok(user) => {
                info!("👤 Registered '{}'", user.username);
                toasts.success("Registration successful!");
                true
            }
            Err(err) => {
                error!("Register error: {}", err);
                toasts.error(format!("Something went wrong: {}", err));
                false
            }
        }
    }

    /// Log in and remember the user. The backend's reply text is the toast
    /// either way.
    pub async fn login(
        &self,
        request: &LoginRequest,
        toasts: &mut ToastSlot,
    ) -> Result<Option<Session>> {
        let outcome = match self.users.login(request).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!("Login error: {}", err);
                toasts.error(format!("Something went wrong: {}", err));
                return Ok(None);
            }
        };

        match outcome {
            LoginOutcome::Accepted => {
                let user = match self.users.get(&request.username).await {
                    Ok(user) => user,
                    Err(err) => {
                        error!("Failed to fetch '{}' after login: {}", request.username, err);
                        toasts.error(format!("Something went wrong: {}", err));
                        return Ok(None);
                    }
                };
                let stored = StoredSession::new(user);
                self.store.save(&stored).await?;
                toasts.success(crate::api::types::LOGIN_SUCCESS_MARKER);
                Ok(Some(Session::new(stored, self.config)))
            }
            LoginOutcome::Rejected(body) => {
                info!("Login rejected for '{}'", request.username);
                if body.trim().is_empty() {
                    toasts.error(INVALID_LOGIN);
                } else {
                    toasts.error(body);
                }
                Ok(None)
            }
        }
    }

    pub async fn logout(&self, toasts: &mut ToastSlot) -> Result<()> {
        self.store.clear().await?;
        toasts.success("Logged out successfully!");
        Ok(())
    }

    /// Save email/phone/password for the logged-in user and update the
    /// stored session to match.
    pub async fn update_profile(
        &self,
        session: Option<&Session>,
        edit: &ProfileEdit,
        toasts: &mut ToastSlot,
    ) -> Result<Option<Session>, ProfileError> {
        let session = require(session, Capability::EditProfile)?;
        match self.users.update_profile(session.username(), edit).await {
            Ok(reply) => {
                let mut updated = session.clone();
                edit.apply_to(&mut updated.user);
                self.store
                    .save(&updated.stored())
                    .await
                    .map_err(ProfileError::Store)?;
                toasts.success(reply);
                Ok(Some(updated))
            }
            Err(err) => {
                error!("Failed to update user: {}", err);
                toasts.error("Failed to update profile!");
                Ok(None)
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Store(anyhow::Error),
}
