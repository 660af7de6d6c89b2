//! HTTP Task Store
//!
//! `TaskStore` over the JSON API at a fixed base URL.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value;

use super::envelope;
use super::TaskStore;
use crate::error::{ClientError, ClientResult};
use crate::models::{Task, TaskDraft};

#[derive(Debug, Clone)]
pub struct HttpTaskStore {
    client: Client,
    base_url: String,
}

impl HttpTaskStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and unwrap the response envelope
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<Option<T>> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        let envelope = envelope::decode::<T>(&body)?;
        envelope.into_result(status.is_success())
    }

    /// Hit the welcome endpoint and return its greeting
    pub async fn ping(&self) -> ClientResult<String> {
        let response = self.client.get(self.url("/")).send().await?;
        let status = response.status();
        let body = response.text().await?;
        let envelope = envelope::decode::<IgnoredAny>(&body)?;
        let message = envelope.message.clone().unwrap_or_default();
        envelope.into_result(status.is_success())?;
        Ok(message)
    }
}

#[async_trait(?Send)]
impl TaskStore for HttpTaskStore {
    async fn list_tasks(&self) -> ClientResult<Vec<Task>> {
        let data = self.send::<Vec<Task>>(self.client.get(self.url("/api/todos"))).await?;
        Ok(data.unwrap_or_default())
    }

    async fn set_completed(&self, id: u32, completed: bool) -> ClientResult<Option<Task>> {
        let path = format!("/api/todo/{}/{}", id, completed);
        tracing::debug!(id, completed, "PATCH {}", path);
        let data = self.send::<Value>(self.client.patch(self.url(&path))).await?;
        // Some servers answer with an update summary instead of the task
        Ok(data.and_then(|value| serde_json::from_value::<Task>(value).ok()))
    }

    async fn create_task(&self, draft: &TaskDraft) -> ClientResult<Task> {
        let body = draft.validate()?;
        self.send::<Task>(self.client.post(self.url("/api/todo")).json(&body))
            .await?
            .ok_or_else(|| ClientError::Protocol("create response carried no task".to_string()))
    }

    async fn delete_task(&self, id: u32) -> ClientResult<()> {
        let path = format!("/api/todo/{}", id);
        self.send::<IgnoredAny>(self.client.delete(self.url(&path))).await?;
        Ok(())
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, HttpTaskStore) {
        let server = MockServer::start().await;
        let store = HttpTaskStore::new(&server.uri());
        (server, store)
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let store = HttpTaskStore::new("http://127.0.0.1:8001//");
        assert_eq!(store.base_url(), "http://127.0.0.1:8001");
        assert_eq!(store.url("/api/todos"), "http://127.0.0.1:8001/api/todos");
    }

    #[tokio::test]
    async fn test_list_tasks_returns_data() {
        let (server, store) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/todos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [
                    {"id": 1, "title": "Buy milk", "description": "", "completed": false},
                    {"id": 2, "title": "Walk dog", "completed": true}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tasks = store.list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "Buy milk");
        assert!(tasks[1].completed);
    }

    #[tokio::test]
    async fn test_list_tasks_missing_data_is_empty() {
        let (server, store) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/todos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": null})))
            .mount(&server)
            .await;

        assert!(store.list_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_tasks_remote_failure() {
        let (server, store) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/todos"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "success": false,
                "error": "database unavailable"
            })))
            .mount(&server)
            .await;

        let err = store.list_tasks().await.unwrap_err();
        assert_eq!(err, ClientError::Remote("database unavailable".to_string()));
    }

    #[tokio::test]
    async fn test_non_json_body_is_protocol_error() {
        let (server, store) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/todos"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        assert!(matches!(store.list_tasks().await, Err(ClientError::Protocol(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Port 1 is reserved and refuses connections
        let store = HttpTaskStore::new("http://127.0.0.1:1");
        assert!(matches!(store.list_tasks().await, Err(ClientError::Network(_))));
    }

    #[tokio::test]
    async fn test_set_completed_patches_path() {
        let (server, store) = setup().await;
        Mock::given(method("PATCH"))
            .and(path("/api/todo/7/true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"id": 7, "title": "Ship it", "completed": true}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let task = store.set_completed(7, true).await.unwrap().unwrap();
        assert_eq!(task.id, 7);
        assert!(task.completed);
    }

    #[tokio::test]
    async fn test_set_completed_accepts_update_summary() {
        let (server, store) = setup().await;
        Mock::given(method("PATCH"))
            .and(path("/api/todo/1/true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"MatchedCount": 1, "ModifiedCount": 1, "UpsertedCount": 0, "UpsertedID": null}
            })))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(store.set_completed(1, true).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_completed_remote_failure() {
        let (server, store) = setup().await;
        Mock::given(method("PATCH"))
            .and(path("/api/todo/9/true"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "success": false,
                "error": "update failed"
            })))
            .mount(&server)
            .await;

        let err = store.set_completed(9, true).await.unwrap_err();
        assert_eq!(err, ClientError::Remote("update failed".to_string()));
    }

    #[tokio::test]
    async fn test_create_task_posts_trimmed_body() {
        let (server, store) = setup().await;
        Mock::given(method("POST"))
            .and(path("/api/todo"))
            .and(body_json(json!({"title": "Buy milk", "description": "2 liters"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "data": {"id": 3, "title": "Buy milk", "description": "2 liters", "completed": false}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let task = store.create_task(&TaskDraft::new(" Buy milk ", "2 liters")).await.unwrap();
        assert_eq!(task.id, 3);
    }

    #[tokio::test]
    async fn test_create_blank_title_sends_nothing() {
        let (server, store) = setup().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let err = store.create_task(&TaskDraft::new("   ", "")).await.unwrap_err();
        assert_eq!(err, ClientError::Validation(ValidationError::EmptyTitle));
    }

    #[tokio::test]
    async fn test_delete_ignores_payload_shape() {
        let (server, store) = setup().await;
        Mock::given(method("DELETE"))
            .and(path("/api/todo/4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Todo deleted successfully",
                "data": {"DeletedCount": 1}
            })))
            .expect(1)
            .mount(&server)
            .await;

        store.delete_task(4).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let (server, store) = setup().await;
        Mock::given(method("DELETE"))
            .and(path("/api/todo/1"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "success": false,
                "error": "not found"
            })))
            .mount(&server)
            .await;

        let err = store.delete_task(1).await.unwrap_err();
        assert_eq!(err, ClientError::Remote("not found".to_string()));
    }

    #[tokio::test]
    async fn test_ping_returns_welcome_message() {
        let (server, store) = setup().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Welcome to the API",
                "data": null,
                "error": null
            })))
            .mount(&server)
            .await;

        assert_eq!(store.ping().await.unwrap(), "Welcome to the API");
    }
}
