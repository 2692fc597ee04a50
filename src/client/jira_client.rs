use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::{ConnectionConfig, Credentials};
use crate::error::{JiraError, JiraResult};
use crate::logging::{log_debug, log_error};
use crate::models::{
    Issue, NewWorklog, SearchResponse, TransitionRequest, TransitionsResponse,
};

/// REST client for the tracker. Clones share one connection pool.
#[derive(Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    api_root: String,
    credentials: Credentials,
}

impl JiraClient {
    pub fn new(connection: &ConnectionConfig, credentials: Credentials) -> JiraResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_root: connection.api_root(),
            credentials,
        })
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub async fn list_issues(&self, jql: &str) -> JiraResult<SearchResponse> {
        let request = self.request(Method::GET, "search").query(&[("jql", jql)]);
        self.send_json(request).await
    }

    pub async fn get_issue(&self, key: &str) -> JiraResult<Issue> {
        let request = self.request(Method::GET, &format!("issue/{}", key));
        self.send_json(request).await
    }

    pub async fn list_transitions(&self, key: &str) -> JiraResult<TransitionsResponse> {
        let request = self.request(Method::GET, &format!("issue/{}/transitions", key));
        self.send_json(request).await
    }

    pub async fn create_worklog(&self, key: &str, time_spent: &str, started: &str) -> JiraResult<()> {
        let payload = NewWorklog {
            time_spent,
            started,
        };
        self.send_body(Method::POST, &format!("issue/{}/worklog", key), &payload)
            .await
    }

    pub async fn do_transition(&self, key: &str, transition_id: &str) -> JiraResult<()> {
        let payload = TransitionRequest::new(transition_id);
        self.send_body(Method::POST, &format!("issue/{}/transitions", key), &payload)
            .await
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url_for(path);
        log_debug(&format!("{} {}", method, url));
        self.http
            .request(method, url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> JiraResult<T> {
        let response = Self::check(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_body<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> JiraResult<()> {
        let request = self.request(method, path).json(body);
        Self::check(request.send().await?).await?;
        Ok(())
    }

    async fn check(response: Response) -> JiraResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str::<Value>(&text).ok();
        log_error(&format!("{} returned {}: {}", url, status, text));

        Err(JiraError::Api {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            body,
        })
    }
}
