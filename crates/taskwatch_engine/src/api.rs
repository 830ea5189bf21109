use std::time::Duration;

use reqwest::header::COOKIE;
use reqwest::Method;

use crate::cookies::{csrf_safe_method, csrf_token, CSRF_HEADER_NAME};
use crate::{ApiError, TaskId, TaskListPage};

/// Path of the task-list resource under the API base.
pub const TASK_LIST_PATH: &str = "/api/backgroundtask/";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Verbatim cookie-pair text sent as the `Cookie` header on every
    /// request (session auth). The CSRF token is read from it once.
    pub cookie_text: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            cookie_text: None,
        }
    }
}

#[async_trait::async_trait]
pub trait TaskApi: Send + Sync {
    async fn list_tasks(&self) -> Result<TaskListPage, ApiError>;
    async fn delete_task(&self, task_id: TaskId) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTaskApi {
    settings: ApiSettings,
    csrf: Option<String>,
}

impl ReqwestTaskApi {
    pub fn new(settings: ApiSettings) -> Self {
        let csrf = settings.cookie_text.as_deref().and_then(csrf_token);
        Self { settings, csrf }
    }

    fn build_client(&self) -> Result<reqwest::Client, ApiError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, ApiError> {
        let base = reqwest::Url::parse(&self.settings.base_url)
            .map_err(|err| ApiError::InvalidUrl(err.to_string()))?;
        base.join(path)
            .map_err(|err| ApiError::InvalidUrl(err.to_string()))
    }

    /// Ambient headers for every request: the stored cookie text, plus the
    /// CSRF token on any method that is not CSRF-safe. No token, no header.
    fn request(
        &self,
        client: &reqwest::Client,
        method: Method,
        url: reqwest::Url,
    ) -> reqwest::RequestBuilder {
        let mut builder = client.request(method.clone(), url);
        if let Some(cookie_text) = self.settings.cookie_text.as_deref() {
            builder = builder.header(COOKIE, cookie_text);
        }
        if !csrf_safe_method(&method) {
            if let Some(token) = self.csrf.as_deref() {
                builder = builder.header(CSRF_HEADER_NAME, token);
            }
        }
        builder
    }
}

#[async_trait::async_trait]
impl TaskApi for ReqwestTaskApi {
    async fn list_tasks(&self) -> Result<TaskListPage, ApiError> {
        let client = self.build_client()?;
        let url = self.endpoint(TASK_LIST_PATH)?;

        let response = self
            .request(&client, Method::GET, url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&body).map_err(|err| ApiError::MalformedBody(err.to_string()))
    }

    async fn delete_task(&self, task_id: TaskId) -> Result<(), ApiError> {
        let client = self.build_client()?;
        let url = self.endpoint(&format!("{TASK_LIST_PATH}{task_id}/"))?;

        let response = self
            .request(&client, Method::DELETE, url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        // 404 counts as deleted: the record is gone either way.
        if status.is_success() || status == reqwest::StatusCode::NOT_FOUND {
            Ok(())
        } else {
            Err(ApiError::HttpStatus(status.as_u16()))
        }
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout(err.to_string());
    }
    ApiError::Network(err.to_string())
}
