use async_trait::async_trait;
use reqwest::Method;

use super::client::ApiClient;
use super::error::ApiError;
use super::traits::{CrudResource, Labels};
use crate::models::Building;
use crate::panel::BuildingFilter;

const BUILDINGS: &str = "buildings";

/// `/api/buildings`
#[derive(Debug, Clone)]
pub struct BuildingsApi {
    client: ApiClient,
}

impl BuildingsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn all(&self) -> Result<Vec<Building>, ApiError> {
        self.client.get_json(&["api", BUILDINGS]).await
    }
}

#[async_trait]
impl CrudResource for BuildingsApi {
    type Record = Building;
    type Key = i64;
    type Filter = BuildingFilter;

    fn labels(&self) -> Labels {
        Labels {
            title: "Property",
            noun: "property",
            plural: "properties",
        }
    }

    fn key_of(record: &Building) -> Option<i64> {
        record.id
    }

    async fn list(&self) -> Result<Vec<Building>, ApiError> {
        self.all().await
    }

    async fn create(&self, draft: &Building) -> Result<(), ApiError> {
        let _: Building = self
            .client
            .send_json(Method::POST, &["api", BUILDINGS], draft)
            .await?;
        Ok(())
    }

    async fn update(&self, key: &i64, draft: &Building) -> Result<(), ApiError> {
        let id = key.to_string();
        self.client
            .send_for_text(Method::PUT, &["api", BUILDINGS, id.as_str()], Some(draft))
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &i64) -> Result<(), ApiError> {
        let id = key.to_string();
        self.client
            .send_for_text::<()>(Method::DELETE, &["api", BUILDINGS, id.as_str()], None)
            .await?;
        Ok(())
    }
}
