use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;

use super::client::ApiClient;
use super::error::ApiError;
use super::traits::{CrudResource, Labels};
use crate::models::Guide;
use crate::panel::GuideFilter;

const GUIDES: &str = "guides";

/// `/api/guides`. Create and update live one level deeper, under
/// `/api/guides/guides`, while delete does not.
#[derive(Debug, Clone)]
pub struct GuidesApi {
    client: ApiClient,
}

impl GuidesApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn all(&self) -> Result<Vec<Guide>, ApiError> {
        self.client.get_json(&["api", GUIDES]).await
    }
}

/// A blank joined date is stamped with the submit time.
fn with_joined_date(draft: &Guide) -> Guide {
    let mut guide = draft.clone();
    if guide.joined_date.trim().is_empty() {
        guide.joined_date = Utc::now().to_rfc3339();
    }
    guide
}

#[async_trait]
impl CrudResource for GuidesApi {
    type Record = Guide;
    type Key = i64;
    type Filter = GuideFilter;

    fn labels(&self) -> Labels {
        Labels {
            title: "Guide",
            noun: "guide",
            plural: "guides",
        }
    }

    fn key_of(record: &Guide) -> Option<i64> {
        record.id
    }

    async fn list(&self) -> Result<Vec<Guide>, ApiError> {
        self.all().await
    }

    async fn create(&self, draft: &Guide) -> Result<(), ApiError> {
        let _: Guide = self
            .client
            .send_json(Method::POST, &["api", GUIDES, GUIDES], &with_joined_date(draft))
            .await?;
        Ok(())
    }

    async fn update(&self, key: &i64, draft: &Guide) -> Result<(), ApiError> {
        let id = key.to_string();
        self.client
            .send_for_text(
                Method::PUT,
                &["api", GUIDES, GUIDES, id.as_str()],
                Some(&with_joined_date(draft)),
            )
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &i64) -> Result<(), ApiError> {
        let id = key.to_string();
        self.client
            .send_for_text::<()>(Method::DELETE, &["api", GUIDES, id.as_str()], None)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_blank_joined_date_is_stamped() {
        let stamped = with_joined_date(&Guide::default());
        assert!(chrono::DateTime::parse_from_rfc3339(&stamped.joined_date).is_ok());

        let kept = with_joined_date(&Guide {
            joined_date: "2023-04-01".into(),
            ..Default::default()
        });
        assert_eq!(kept.joined_date, "2023-04-01");
    }

    #[tokio::test]
    async fn test_create_and_update_use_nested_paths() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/guides/guides"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "guideId": 8 })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/guides/guides/8"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Guide '8' updated successfully!"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/guides/8"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Guide with ID '8' deleted successfully!"))
            .expect(1)
            .mount(&server)
            .await;

        let api = GuidesApi::new(ApiClient::new(&server.uri(), None).unwrap());
        let guide = Guide {
            name: "Meera".into(),
            ..Default::default()
        };
        api.create(&guide).await.unwrap();
        api.update(&8, &guide).await.unwrap();
        api.delete(&8).await.unwrap();
    }
}
