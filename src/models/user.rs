use serde::{Deserialize, Serialize};

use super::null_default;
use crate::form::{EditableRecord, FormError};

/// A registered account, keyed by `username`.
///
/// `password` travels in plaintext because the backend replaces the stored
/// password on every update with whatever the client sends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "null_default")]
    pub username: String,
    #[serde(deserialize_with = "null_default")]
    pub email: String,
    #[serde(deserialize_with = "null_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_default")]
    pub password: String,
}

impl EditableRecord for User {
    const FIELDS: &'static [&'static str] = &["username", "email", "phone", "password"];

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match crate::form::field_key(field).as_str() {
            "username" => self.username = value.trim().to_string(),
            "email" => self.email = value.to_string(),
            "phone" => self.phone = value.to_string(),
            "password" => self.password = value.to_string(),
            _ => return Err(FormError::unknown::<Self>(field)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_fields_become_empty() {
        let user: User = serde_json::from_str(
            r#"{"username":"asha","email":null,"phone":"98200","password":null}"#,
        )
        .unwrap();
        assert_eq!(user.username, "asha");
        assert_eq!(user.email, "");
        assert_eq!(user.password, "");
    }

    #[test]
    fn test_set_field_accepts_any_casing() {
        let mut user = User::default();
        user.set_field("Email", "a@b.in").unwrap();
        user.set_field("PASSWORD", "pw").unwrap();
        assert_eq!(user.email, "a@b.in");
        assert_eq!(user.password, "pw");
        assert!(user.set_field("role", "admin").is_err());
    }
}
