use serde::{Deserialize, Serialize};

use crate::models::User;

/// Exact body the backend answers a good login with. Nothing in the backend
/// contract pins this wording, so it is the one place to change if it drifts.
pub const LOGIN_SUCCESS_MARKER: &str = "Login successful!";

/// Credentials for `POST /api/users/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Verdict of a login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Accepted,
    /// Backend reply text, possibly empty
    Rejected(String),
}

impl LoginOutcome {
    /// Only a 2xx reply whose body is exactly the success marker counts.
    pub fn from_reply(ok: bool, body: &str) -> Self {
        if ok && body == LOGIN_SUCCESS_MARKER {
            LoginOutcome::Accepted
        } else {
            LoginOutcome::Rejected(body.to_string())
        }
    }
}

/// Sign-up form, checked on the client before anything is sent.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub agree: bool,
}

impl Registration {
    /// First failing client-side check, as the message shown to the user.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.agree {
            return Err("You must agree to terms");
        }
        if self.password != self.confirm_password {
            return Err("Passwords do not match");
        }
        Ok(())
    }

    pub fn into_user(self) -> User {
        User {
            username: self.username,
            email: self.email,
            phone: self.phone,
            password: self.password,
        }
    }
}

/// Self-service profile changes. The username is fixed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileEdit {
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl ProfileEdit {
    /// Pre-fill from the current record, the way the profile dialog opens.
    pub fn from_user(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            phone: user.phone.clone(),
            password: user.password.clone(),
        }
    }

    pub fn apply_to(&self, user: &mut User) {
        user.email = self.email.clone();
        user.phone = self.phone.clone();
        user.password = self.password.clone();
    }
}
