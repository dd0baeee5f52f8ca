use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, info};

use super::client::ApiClient;
use super::error::ApiError;
use super::traits::{CrudResource, Labels};
use super::types::{LoginOutcome, LoginRequest, ProfileEdit};
use crate::models::User;
use crate::panel::UserFilter;

const USERS: &str = "users";

/// `/api/users`
#[derive(Debug, Clone)]
pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn all(&self) -> Result<Vec<User>, ApiError> {
        self.client.get_json(&["api", USERS]).await
    }

    /// `POST /api/users/register`, answered with the stored user.
    pub async fn register(&self, user: &User) -> Result<User, ApiError> {
        info!("Registering user '{}'", user.username);
        self.client
            .send_json(Method::POST, &["api", USERS, "register"], user)
            .await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome, ApiError> {
        let reply = self
            .client
            .exchange_text(&["api", USERS, "login"], request)
            .await?;
        debug!("Login reply for '{}': {:?}", request.username, reply.body);
        Ok(LoginOutcome::from_reply(reply.ok, &reply.body))
    }

    pub async fn get(&self, username: &str) -> Result<User, ApiError> {
        self.client.get_json(&["api", USERS, username]).await
    }

    /// Full-record update. The reply is a confirmation sentence, not JSON.
    pub async fn update_user(&self, username: &str, user: &User) -> Result<String, ApiError> {
        self.client
            .send_for_text(Method::PUT, &["api", USERS, username], Some(user))
            .await
    }

    /// Profile update with only the self-editable fields.
    pub async fn update_profile(
        &self,
        username: &str,
        edit: &ProfileEdit,
    ) -> Result<String, ApiError> {
        self.client
            .send_for_text(Method::PUT, &["api", USERS, username], Some(edit))
            .await
    }

    pub async fn remove(&self, username: &str) -> Result<String, ApiError> {
        self.client
            .send_for_text::<()>(Method::DELETE, &["api", USERS, username], None)
            .await
    }
}

#[async_trait]
impl CrudResource for UsersApi {
    type Record = User;
    type Key = String;
    type Filter = UserFilter;

    fn labels(&self) -> Labels {
        Labels {
            title: "User",
            noun: "user",
            plural: "users",
        }
    }

    fn key_of(record: &User) -> Option<String> {
        let username = record.username.trim();
        (!username.is_empty()).then(|| username.to_string())
    }

    fn key_field() -> Option<&'static str> {
        Some("username")
    }

    fn delete_prompt(&self, key: &String) -> String {
        format!("Are you sure you want to delete '{}'?", key)
    }

    async fn list(&self) -> Result<Vec<User>, ApiError> {
        self.all().await
    }

    async fn create(&self, draft: &User) -> Result<(), ApiError> {
        self.register(draft).await.map(|_| ())
    }

    async fn update(&self, key: &String, draft: &User) -> Result<(), ApiError> {
        self.update_user(key, draft).await.map(|_| ())
    }

    async fn delete(&self, key: &String) -> Result<(), ApiError> {
        self.remove(key).await.map(|_| ())
    }
}
