//! Who is logged in, what they may do, and where that is remembered.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{ApiError, UsersApi};
use crate::config::Config;
use crate::models::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

/// Something a view or command needs permission for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ManageUsers,
    ManageGuides,
    ManageBuildings,
    ViewDashboard,
    EditProfile,
}

impl Role {
    pub fn allows(&self, capability: Capability) -> bool {
        match self {
            Role::Admin => true,
            Role::Member => capability == Capability::EditProfile,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Admin => "admin",
            Role::Member => "member",
        })
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Capability::ManageUsers => "manage users",
            Capability::ManageGuides => "manage guides",
            Capability::ManageBuildings => "manage properties",
            Capability::ViewDashboard => "view the dashboard",
            Capability::EditProfile => "edit a profile",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("not logged in (run `estate login` first)")]
    NotLoggedIn,
    #[error("'{username}' is not allowed to {capability}")]
    Forbidden {
        username: String,
        capability: Capability,
    },
}

/// The logged-in user as persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub user: User,
    pub logged_in_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(user: User) -> Self {
        Self {
            user,
            logged_in_at: Utc::now(),
        }
    }
}

/// A restored session with its role worked out.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: User,
    pub role: Role,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(stored: StoredSession, config: &Config) -> Self {
        let role = if config.is_admin(&stored.user.username) {
            Role::Admin
        } else {
            Role::Member
        };
        Self {
            user: stored.user,
            role,
            logged_in_at: stored.logged_in_at,
        }
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.role.allows(capability)
    }

    pub fn stored(&self) -> StoredSession {
        StoredSession {
            user: self.user.clone(),
            logged_in_at: self.logged_in_at,
        }
    }
}

/// Gate a view on the current session.
pub fn require(session: Option<&Session>, capability: Capability) -> Result<&Session, AccessError> {
    let session = session.ok_or(AccessError::NotLoggedIn)?;
    if session.can(capability) {
        Ok(session)
    } else {
        Err(AccessError::Forbidden {
            username: session.user.username.clone(),
            capability,
        })
    }
}

/// JSON file holding the logged-in user.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored session, or `None` when nobody is logged in. A file that
    /// no longer parses is treated as logged out.
    pub async fn load(&self) -> Result<Option<StoredSession>> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read session file {}", self.path.display()))
            }
        };
        match serde_json::from_str(&json) {
            Ok(stored) => Ok(Some(stored)),
            Err(err) => {
                warn!("Ignoring unreadable session file {}: {}", self.path.display(), err);
                Ok(None)
            }
        }
    }

    pub async fn save(&self, stored: &StoredSession) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(stored)?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write session file {}", self.path.display()))?;
        debug!("Saved session for '{}' to {}", stored.user.username, self.path.display());
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err)
                .with_context(|| format!("Failed to remove session file {}", self.path.display())),
        }
    }

    /// Restore the session and refresh the user record from the backend.
    /// A user the backend no longer knows is logged out. Any other failure,
    /// such as an unreachable backend or a proxy error, keeps the stored
    /// record as is.
    pub async fn resolve(&self, users: &UsersApi, config: &Config) -> Result<Option<Session>> {
        let Some(mut stored) = self.load().await? else {
            return Ok(None);
        };

        match users.get(&stored.user.username).await {
            Ok(fresh) => {
                if fresh.password.is_empty() {
                    stored.user = User {
                        password: stored.user.password,
                        ..fresh
                    };
                } else {
                    stored.user = fresh;
                }
                self.save(&stored).await?;
            }
            Err(err) if is_unknown_user(&err) => {
                info!("Session for '{}' ended: {}", stored.user.username, err);
                self.clear().await?;
                return Ok(None);
            }
            Err(err) => {
                warn!("Could not refresh session for '{}': {}", stored.user.username, err);
            }
        }

        Ok(Some(Session::new(stored, config)))
    }
}

/// The backend answers a lookup for a missing user with a 500 and a
/// "not found" message; a 404 means the same.
fn is_unknown_user(err: &ApiError) -> bool {
    matches!(
        err.status(),
        Some(StatusCode::INTERNAL_SERVER_ERROR | StatusCode::NOT_FOUND)
    )
}
