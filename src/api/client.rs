use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::error::ApiError;

/// Raw status and body of a call whose reply is judged by the caller
/// (the login endpoint answers 200 with a text verdict).
#[derive(Debug, Clone)]
pub struct TextReply {
    pub ok: bool,
    pub body: String,
}

/// Thin JSON-over-HTTP wrapper around the listing backend.
///
/// Cheap to clone: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    /// Create a client for the backend at `base_url` (e.g. `http://localhost:8000`).
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base = Url::parse(base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ApiError::InvalidBaseUrl(base_url.to_string()))?;

        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ApiError::Client)?;

        Ok(Self { http, base })
    }

    /// Join path segments onto the base URL, percent-encoding each one so a
    /// username like `a b/c` stays a single segment.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments);
        let body = self.send(self.http.get(url.clone()), &url).await?;
        decode(&url, &body)
    }

    pub async fn send_json<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        payload: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        let body = self
            .send(self.http.request(method, url.clone()).json(payload), &url)
            .await?;
        decode(&url, &body)
    }

    /// Send a JSON payload and return the plain-text reply of a successful call.
    pub async fn send_for_text<B>(
        &self,
        method: Method,
        segments: &[&str],
        payload: Option<&B>,
    ) -> Result<String, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments);
        let mut request = self.http.request(method, url.clone());
        if let Some(payload) = payload {
            request = request.json(payload);
        }
        self.send(request, &url).await
    }

    /// Send a JSON payload and hand back status and body without judging them.
    pub async fn exchange_text<B>(&self, segments: &[&str], payload: &B) -> Result<TextReply, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments);
        debug!("POST {}", url);
        let response = self
            .http
            .post(url.clone())
            .json(payload)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        let ok = response.status().is_success();
        let body = response.text().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;
        Ok(TextReply { ok, body })
    }

    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<String, ApiError> {
        debug!("Sending request to {}", url);
        let response = request.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            warn!("{} returned status: {}", url, status);
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        debug!("Received {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

fn decode<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_and_encodes_segments() {
        let client = ApiClient::new("http://localhost:8000", None).unwrap();
        assert_eq!(
            client.endpoint(&["api", "users", "a b/c"]).as_str(),
            "http://localhost:8000/api/users/a%20b%2Fc"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let client = ApiClient::new("http://example.test/backend/", None).unwrap();
        assert_eq!(
            client.endpoint(&["api", "buildings", "3"]).as_str(),
            "http://example.test/backend/api/buildings/3"
        );
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(matches!(
            ApiClient::new("mailto:agent@example.test", None),
            Err(ApiError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            ApiClient::new("not a url", None),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }
}
