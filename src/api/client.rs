use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Mutex;

use super::wire::{Entry, EntryPage, TokenResponse, UpdateBody};
use super::{ApiError, Gateway, ListQuery};
use crate::config::ServerConfig;
use crate::store::{Item, ItemDetail, ItemId, ItemUpdate};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Wallabag REST API client.
///
/// Authenticates with the OAuth2 password grant. The access token is fetched
/// lazily on the first call and cached for the session; a `401` clears it and
/// the call is repeated once with a fresh token.
pub struct WallabagClient {
    http: reqwest::Client,
    /// Server root without trailing slash.
    base: String,
    client_id: String,
    client_secret: SecretString,
    username: String,
    password: SecretString,
    token: Mutex<Option<Arc<SecretString>>>,
}

impl WallabagClient {
    pub fn new(server: &ServerConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Duration::from_secs(30))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base: server.url.trim_end_matches('/').to_string(),
            client_id: server.client_id.clone(),
            client_secret: SecretString::from(server.client_secret.clone()),
            username: server.username.clone(),
            password: SecretString::from(server.password.clone()),
            token: Mutex::new(None),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn request_token(&self) -> Result<SecretString, ApiError> {
        tracing::debug!(base = %self.base, "Requesting access token");
        let response = self
            .http
            .post(self.endpoint("/oauth/v2/token"))
            .form(&[
                ("grant_type", "password"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose_secret()),
                ("username", self.username.as_str()),
                ("password", self.password.expose_secret()),
            ])
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if status.is_client_error() {
            return Err(ApiError::Auth(format!(
                "token request rejected with status {}",
                status.as_u16()
            )));
        }
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status.as_u16()));
        }

        let token: TokenResponse = decode(response).await?;
        Ok(SecretString::from(token.access_token))
    }

    async fn token(&self) -> Result<Arc<SecretString>, ApiError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            return Ok(Arc::clone(token));
        }
        let token = Arc::new(self.request_token().await?);
        *cached = Some(Arc::clone(&token));
        Ok(token)
    }

    async fn send_once<F>(&self, build: &F) -> Result<Response, ApiError>
    where
        F: Fn(&str) -> RequestBuilder + Send + Sync,
    {
        let token = self.token().await?;
        build(token.expose_secret()).send().await.map_err(classify)
    }

    /// Send an authenticated request, refreshing the token once on `401`.
    async fn send_authorized<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn(&str) -> RequestBuilder + Send + Sync,
    {
        let mut response = self.send_once(&build).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::debug!("Access token rejected, requesting a new one");
            *self.token.lock().await = None;
            response = self.send_once(&build).await?;
        }

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status.as_u16()));
        }
        Ok(response)
    }
}

#[async_trait]
impl Gateway for WallabagClient {
    async fn list_items(&self, query: &ListQuery) -> Result<Vec<Item>, ApiError> {
        let mut params: Vec<(&str, String)> = vec![
            ("perPage", query.limit.to_string()),
            ("page", "1".to_string()),
            ("detail", "metadata".to_string()),
            ("sort", "created".to_string()),
            (
                "order",
                if query.oldest_first { "asc" } else { "desc" }.to_string(),
            ),
        ];
        if let Some(read) = query.read {
            params.push(("archive", u8::from(read).to_string()));
        }
        if let Some(starred) = query.starred {
            params.push(("starred", u8::from(starred).to_string()));
        }
        if !query.tags.is_empty() {
            params.push(("tags", query.tags.join(",")));
        }

        let url = self.endpoint("/api/entries.json");
        let response = self
            .send_authorized(|token| self.http.get(&url).bearer_auth(token).query(&params))
            .await?;

        let page: EntryPage = decode(response).await?;
        let items: Vec<Item> = page
            .embedded
            .items
            .into_iter()
            .map(Entry::into_item)
            .collect();
        tracing::info!(count = items.len(), "Fetched item list");
        Ok(items)
    }

    async fn get_item(&self, id: ItemId) -> Result<ItemDetail, ApiError> {
        let url = self.endpoint(&format!("/api/entries/{}.json", id));
        let response = self
            .send_authorized(|token| self.http.get(&url).bearer_auth(token))
            .await?;

        let entry: Entry = decode(response).await?;
        tracing::debug!(item_id = %id, "Fetched item");
        Ok(entry.into_detail())
    }

    async fn update_item(&self, id: ItemId, update: &ItemUpdate) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/api/entries/{}.json", id));
        let body = UpdateBody::from(update);
        self.send_authorized(|token| self.http.patch(&url).bearer_auth(token).json(&body))
            .await?;
        tracing::debug!(item_id = %id, ?update, "Updated item");
        Ok(())
    }
}

fn classify(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network(err)
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response.text().await.map_err(classify)?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn server_config(url: &str) -> ServerConfig {
        ServerConfig {
            url: url.to_string(),
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            username: "reader".to_string(),
            password: "hunter2".to_string(),
        }
    }

    async fn mount_token(server: &MockServer, token: &str) {
        Mock::given(method("POST"))
            .and(path("/oauth/v2/token"))
            .and(body_string_contains("grant_type=password"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": token,
                "expires_in": 3600,
                "token_type": "bearer"
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_list_items_preserves_order_and_sends_filters() {
        let server = MockServer::start().await;
        mount_token(&server, "tok").await;
        Mock::given(method("GET"))
            .and(path("/api/entries.json"))
            .and(header("authorization", "Bearer tok"))
            .and(query_param("perPage", "100"))
            .and(query_param("order", "desc"))
            .and(query_param("starred", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "page": 1,
                "_embedded": { "items": [
                    { "id": 9, "title": "Nine", "url": "https://a/9", "is_archived": 0, "is_starred": 1, "tags": [] },
                    { "id": 3, "title": "Three", "url": "https://a/3", "is_archived": 1, "is_starred": 1, "tags": [] }
                ]}
            })))
            .mount(&server)
            .await;

        let client = WallabagClient::new(&server_config(&server.uri())).unwrap();
        let query = ListQuery {
            starred: Some(true),
            ..ListQuery::default()
        };
        let items = client.list_items(&query).await.unwrap();

        let ids: Vec<i64> = items.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![9, 3]);
        assert!(items[1].read);
    }

    #[tokio::test]
    async fn test_get_item_returns_body() {
        let server = MockServer::start().await;
        mount_token(&server, "tok").await;
        Mock::given(method("GET"))
            .and(path("/api/entries/5.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 5, "title": "Five", "url": "https://a/5",
                "is_archived": 0, "is_starred": 0,
                "content": "<p>Body</p>", "domain_name": "a"
            })))
            .mount(&server)
            .await;

        let client = WallabagClient::new(&server_config(&server.uri())).unwrap();
        let detail = client.get_item(ItemId(5)).await.unwrap();

        assert_eq!(detail.content, "<p>Body</p>");
        assert_eq!(detail.domain_name.as_deref(), Some("a"));
        assert!(!detail.item.read);
    }

    #[tokio::test]
    async fn test_update_item_sends_archive_flag() {
        let server = MockServer::start().await;
        mount_token(&server, "tok").await;
        Mock::given(method("PATCH"))
            .and(path("/api/entries/5.json"))
            .and(body_json(serde_json::json!({ "archive": 1 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": 5 })))
            .expect(1)
            .mount(&server)
            .await;

        let client = WallabagClient::new(&server_config(&server.uri())).unwrap();
        let update = ItemUpdate {
            read: Some(true),
            starred: None,
        };
        client.update_item(ItemId(5), &update).await.unwrap();
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let server = MockServer::start().await;
        mount_token(&server, "tok").await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = WallabagClient::new(&server_config(&server.uri())).unwrap();
        let result = client
            .update_item(ItemId(1), &ItemUpdate::default())
            .await;

        assert!(matches!(result, Err(ApiError::HttpStatus(500))));
    }

    #[tokio::test]
    async fn test_rejected_credentials_map_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/v2/token"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let client = WallabagClient::new(&server_config(&server.uri())).unwrap();
        let result = client.list_items(&ListQuery::default()).await;

        assert!(matches!(result, Err(ApiError::Auth(_))));
    }

    #[tokio::test]
    async fn test_unauthorized_refreshes_token_once() {
        let server = MockServer::start().await;
        mount_token(&server, "tok").await;
        Mock::given(method("GET"))
            .and(path("/api/entries/2.json"))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&server)
            .await;

        let client = WallabagClient::new(&server_config(&server.uri())).unwrap();
        let result = client.get_item(ItemId(2)).await;

        assert!(matches!(result, Err(ApiError::HttpStatus(401))));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        mount_token(&server, "tok").await;
        Mock::given(method("GET"))
            .and(path("/api/entries.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = WallabagClient::new(&server_config(&server.uri())).unwrap();
        let result = client.list_items(&ListQuery::default()).await;

        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let client = WallabagClient::new(&server_config("http://127.0.0.1:9")).unwrap();
        let result = client.get_item(ItemId(1)).await;

        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
