//! Traq API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::api::{AuthApi, CalendarApi, ClientApi, ProjectApi, TaskApi, TimeEntryApi, UserApi};
use super::models::{
    CalendarEvent, CalendarEventCreate, CalendarEventFilter, CalendarEventUpdate, CalendarStats,
    CalendarUploadReport, Client as ClientModel, ClientCreate, ClientFilter, ClientUpdate,
    CurrentUser, LoginRequest, Priority, Project, ProjectCreate, ProjectFilter, ProjectUpdate,
    RefreshRequest, Task, TaskAssign, TaskCategory, TaskCreate, TaskFilter, TaskStatus,
    TaskStatusChange, TaskUpdate, TimeEntry, TimeEntryCreate, TimeEntryFilter, TimeEntryUpdate,
    TimeSummary, TimerStart, TimerStop, TokenPair, User, UserFilter,
};
use super::pagination::{Page, PaginationParams};
use super::Family;
use crate::error::{ApiError, Result};

/// Default Traq API base URL
const DEFAULT_API_URL: &str = "https://api.traq.app/api";

/// Rate limit: 10 requests per second
const RATE_LIMIT_PER_SECOND: u32 = 10;

/// Access-token lifetime assumed when the token payload is opaque
const FALLBACK_TOKEN_TTL_HOURS: i64 = 8;

/// Decode base64url (URL-safe base64 without padding)
fn base64_decode_url(input: &str) -> std::result::Result<Vec<u8>, String> {
    use base64::{engine::general_purpose, Engine as _};

    let standard_b64 = input.replace('-', "+").replace('_', "/");

    let padding = match standard_b64.len() % 4 {
        0 => "",
        2 => "==",
        3 => "=",
        _ => return Err("Invalid base64url length".to_string()),
    };

    let padded = format!("{}{}", standard_b64, padding);

    general_purpose::STANDARD
        .decode(&padded)
        .map_err(|e| e.to_string())
}

/// Extract the `exp` claim from a JWT access token.
///
/// Returns None for opaque tokens; callers fall back to a fixed TTL.
pub fn decode_token_expiry(token: &str) -> Option<DateTime<Utc>> {
    #[derive(Deserialize)]
    struct JwtPayload {
        exp: i64,
    }

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let payload_bytes = base64_decode_url(parts[1]).ok()?;
    let payload: JwtPayload = serde_json::from_slice(&payload_bytes).ok()?;
    DateTime::from_timestamp(payload.exp, 0)
}

/// Expiry for a freshly minted access token
fn token_expiry(access_token: &str) -> DateTime<Utc> {
    decode_token_expiry(access_token).unwrap_or_else(|| {
        log::debug!("Opaque access token, assuming {}h TTL", FALLBACK_TOKEN_TTL_HOURS);
        Utc::now() + chrono::Duration::hours(FALLBACK_TOKEN_TTL_HOURS)
    })
}

/// Structured error body returned by the API on non-2xx responses
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Snapshot of the current session, for persisting refreshed tokens
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Internal authentication state
#[derive(Debug, Clone, Default)]
struct AuthState {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

/// Traq API client
pub struct TraqClient {
    http: HttpClient,
    base_url: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    auth_state: Arc<RwLock<AuthState>>,
}

impl TraqClient {
    /// Create a new client. `base_url` falls back to the public API.
    pub fn new(base_url: Option<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(
            NonZeroU32::new(RATE_LIMIT_PER_SECOND).expect("rate limit is non-zero"),
        );
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            http,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            rate_limiter,
            auth_state: Arc::new(RwLock::new(AuthState::default())),
        })
    }

    /// Install a token pair, e.g. from the config file.
    pub async fn set_session(
        &self,
        access_token: String,
        refresh_token: String,
        expires_at: DateTime<Utc>,
    ) {
        let mut state = self.auth_state.write().await;
        state.access_token = Some(access_token);
        state.refresh_token = Some(refresh_token);
        state.expires_at = Some(expires_at);
    }

    /// Current tokens, if signed in. Used to persist refreshed sessions.
    pub async fn session_tokens(&self) -> Option<SessionTokens> {
        let state = self.auth_state.read().await;
        match (&state.access_token, &state.refresh_token, state.expires_at) {
            (Some(access), Some(refresh), Some(expires_at)) => Some(SessionTokens {
                access_token: access.clone(),
                refresh_token: refresh.clone(),
                expires_at,
            }),
            _ => None,
        }
    }

    /// Check if the access token is expired or expires within 5 minutes
    async fn is_token_expired(&self) -> bool {
        let state = self.auth_state.read().await;
        match state.expires_at {
            None => true,
            Some(expires_at) => {
                let buffer = chrono::Duration::minutes(5);
                expires_at - buffer < Utc::now()
            }
        }
    }

    /// Refresh the session using the stored refresh token, replacing the
    /// token pair held by this client.
    pub async fn refresh_session_tokens(&self) -> Result<()> {
        self.refresh_session().await.map(|_| ())
    }

    /// Mint a new token pair from the stored refresh token.
    async fn refresh_session(&self) -> Result<String> {
        let refresh_token = {
            let state = self.auth_state.read().await;
            state.refresh_token.clone().ok_or(ApiError::Unauthorized)?
        };

        let pair = self.refresh(&refresh_token).await?;
        let access = pair.access_token.clone();
        self.set_session(
            pair.access_token.clone(),
            pair.refresh_token,
            token_expiry(&pair.access_token),
        )
        .await;
        Ok(access)
    }

    /// Get a valid access token, refreshing proactively when near expiry.
    async fn get_valid_token(&self) -> Result<String> {
        if self.is_token_expired().await {
            let has_refresh = {
                let state = self.auth_state.read().await;
                state.refresh_token.is_some()
            };
            if has_refresh {
                return self.refresh_session().await;
            }
        }

        let state = self.auth_state.read().await;
        state
            .access_token
            .clone()
            .ok_or_else(|| ApiError::Unauthorized.into())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue one authenticated request.
    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        token: &str,
    ) -> Result<reqwest::Response> {
        let mut request = self
            .http
            .request(method, self.url(path))
            .header("Authorization", format!("Bearer {}", token));

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await.map_err(ApiError::from)?)
    }

    /// Authenticated JSON request with a single refresh-and-replay on 401.
    ///
    /// 401 is the re-authenticate signal: one refresh attempt, one replay,
    /// then the error surfaces to the caller.
    async fn request_json<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.rate_limiter.until_ready().await;

        let token = self.get_valid_token().await?;
        let response = self
            .execute(method.clone(), path, query, body, &token)
            .await?;

        let response = if response.status() == StatusCode::UNAUTHORIZED {
            let token = self.refresh_session().await?;
            self.execute(method, path, query, body, &token).await?
        } else {
            response
        };

        Self::decode_json(response).await
    }

    /// Authenticated request where the response body is ignored (DELETE).
    async fn request_empty<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.rate_limiter.until_ready().await;

        let token = self.get_valid_token().await?;
        let response = self
            .execute(method.clone(), path, &[], body, &token)
            .await?;

        let response = if response.status() == StatusCode::UNAUTHORIZED {
            let token = self.refresh_session().await?;
            self.execute(method, path, &[], body, &token).await?
        } else {
            response
        };

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::map_error(status, response).await.into())
        }
    }

    /// Parse a successful JSON response or map the error status.
    async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)).into())
        } else {
            Err(Self::map_error(status, response).await.into())
        }
    }

    /// Map a non-2xx response to the error taxonomy, preferring the
    /// server's `detail` message.
    async fn map_error(status: StatusCode, response: reqwest::Response) -> ApiError {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let detail = Self::error_detail(response).await;

        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => {
                ApiError::NotFound(detail.unwrap_or_else(|| "Resource not found".to_string()))
            }
            StatusCode::CONFLICT => {
                ApiError::Conflict(detail.unwrap_or_else(|| "Conflicting state".to_string()))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                ApiError::RateLimit(Duration::from_secs(retry_after.unwrap_or(60)))
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::BadRequest(detail.unwrap_or_else(|| "Bad request".to_string()))
            }
            status if status.is_server_error() => {
                ApiError::ServerError(detail.unwrap_or_else(|| format!("Server error: {}", status)))
            }
            status => ApiError::InvalidResponse(format!("Unexpected status code: {}", status)),
        }
    }

    /// The server reports errors as `{"detail": "..."}`.
    async fn error_detail(response: reqwest::Response) -> Option<String> {
        let text = response.text().await.ok()?;
        match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => Some(body.detail),
            Err(_) if !text.is_empty() => Some(text),
            Err(_) => None,
        }
    }

    // ========================================================================
    // Generic per-family operations
    // ========================================================================

    /// `GET /{family}/` with pagination and filter query params.
    async fn get_page<T: DeserializeOwned>(
        &self,
        family: Family,
        pagination: &PaginationParams,
        filter_pairs: Vec<(&'static str, String)>,
    ) -> Result<Page<T>> {
        let mut query = pagination.to_query_params();
        query.extend(filter_pairs);

        self.request_json(
            Method::GET,
            &format!("/{}/", family.path()),
            &query,
            None::<&()>,
        )
        .await
    }

    /// `GET /{family}/{id}`.
    async fn get_entity<T: DeserializeOwned>(&self, family: Family, id: i64) -> Result<T> {
        self.request_json(
            Method::GET,
            &format!("/{}/{}", family.path(), id),
            &[],
            None::<&()>,
        )
        .await
    }

    /// `POST /{family}/`.
    async fn create_entity<T, B>(&self, family: Family, payload: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_json(
            Method::POST,
            &format!("/{}/", family.path()),
            &[],
            Some(payload),
        )
        .await
    }

    /// `PUT /{family}/{id}`.
    async fn update_entity<T, B>(&self, family: Family, id: i64, payload: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_json(
            Method::PUT,
            &format!("/{}/{}", family.path(), id),
            &[],
            Some(payload),
        )
        .await
    }

    /// `DELETE /{family}/{id}` (soft delete server-side).
    async fn delete_entity(&self, family: Family, id: i64) -> Result<()> {
        self.request_empty(
            Method::DELETE,
            &format!("/{}/{}", family.path(), id),
            None::<&()>,
        )
        .await
    }
}

#[async_trait]
impl AuthApi for TraqClient {
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
        self.rate_limiter.until_ready().await;

        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(self.url("/auth/login-json"))
            .json(&body)
            .send()
            .await
            .map_err(ApiError::from)?;

        let pair: TokenPair = Self::decode_json(response).await?;
        self.set_session(
            pair.access_token.clone(),
            pair.refresh_token.clone(),
            token_expiry(&pair.access_token),
        )
        .await;

        Ok(pair)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        self.rate_limiter.until_ready().await;

        let body = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };

        let response = self
            .http
            .post(self.url("/auth/refresh"))
            .json(&body)
            .send()
            .await
            .map_err(ApiError::from)?;

        Self::decode_json(response).await
    }

    async fn me(&self) -> Result<CurrentUser> {
        self.request_json(Method::GET, "/auth/me", &[], None::<&()>)
            .await
    }

    async fn logout(&self) -> Result<()> {
        self.request_empty(Method::POST, "/auth/logout", None::<&()>)
            .await
    }
}

#[async_trait]
impl ClientApi for TraqClient {
    async fn list_clients(
        &self,
        pagination: &PaginationParams,
        filter: &ClientFilter,
    ) -> Result<Page<ClientModel>> {
        self.get_page(Family::Clients, pagination, filter.query_pairs())
            .await
    }

    async fn get_client(&self, id: i64) -> Result<ClientModel> {
        self.get_entity(Family::Clients, id).await
    }

    async fn create_client(&self, payload: ClientCreate) -> Result<ClientModel> {
        self.create_entity(Family::Clients, &payload).await
    }

    async fn update_client(&self, id: i64, payload: ClientUpdate) -> Result<ClientModel> {
        self.update_entity(Family::Clients, id, &payload).await
    }

    async fn delete_client(&self, id: i64) -> Result<()> {
        self.delete_entity(Family::Clients, id).await
    }
}

#[async_trait]
impl ProjectApi for TraqClient {
    async fn list_projects(
        &self,
        pagination: &PaginationParams,
        filter: &ProjectFilter,
    ) -> Result<Page<Project>> {
        self.get_page(Family::Projects, pagination, filter.query_pairs())
            .await
    }

    async fn get_project(&self, id: i64) -> Result<Project> {
        self.get_entity(Family::Projects, id).await
    }

    async fn create_project(&self, payload: ProjectCreate) -> Result<Project> {
        self.create_entity(Family::Projects, &payload).await
    }

    async fn update_project(&self, id: i64, payload: ProjectUpdate) -> Result<Project> {
        self.update_entity(Family::Projects, id, &payload).await
    }

    async fn delete_project(&self, id: i64) -> Result<()> {
        self.delete_entity(Family::Projects, id).await
    }
}

#[async_trait]
impl TaskApi for TraqClient {
    async fn list_tasks(
        &self,
        pagination: &PaginationParams,
        filter: &TaskFilter,
    ) -> Result<Page<Task>> {
        self.get_page(Family::Tasks, pagination, filter.query_pairs())
            .await
    }

    async fn get_task(&self, id: i64) -> Result<Task> {
        self.get_entity(Family::Tasks, id).await
    }

    async fn create_task(&self, payload: TaskCreate) -> Result<Task> {
        self.create_entity(Family::Tasks, &payload).await
    }

    async fn update_task(&self, id: i64, payload: TaskUpdate) -> Result<Task> {
        self.update_entity(Family::Tasks, id, &payload).await
    }

    async fn delete_task(&self, id: i64) -> Result<()> {
        self.delete_entity(Family::Tasks, id).await
    }

    async fn assign_task(&self, id: i64, user_id: i64) -> Result<Task> {
        self.request_json(
            Method::PUT,
            &format!("/tasks/{}/assign", id),
            &[],
            Some(&TaskAssign { assigned_to: user_id }),
        )
        .await
    }

    async fn set_task_status(&self, id: i64, status_id: i64) -> Result<Task> {
        self.request_json(
            Method::PUT,
            &format!("/tasks/{}/status", id),
            &[],
            Some(&TaskStatusChange { status_id }),
        )
        .await
    }

    async fn list_task_categories(&self) -> Result<Vec<TaskCategory>> {
        self.request_json(Method::GET, "/tasks/categories", &[], None::<&()>)
            .await
    }

    async fn list_task_statuses(&self) -> Result<Vec<TaskStatus>> {
        self.request_json(Method::GET, "/tasks/statuses", &[], None::<&()>)
            .await
    }

    async fn list_priorities(&self) -> Result<Vec<Priority>> {
        self.request_json(Method::GET, "/tasks/priorities", &[], None::<&()>)
            .await
    }
}

#[async_trait]
impl TimeEntryApi for TraqClient {
    async fn list_time_entries(
        &self,
        pagination: &PaginationParams,
        filter: &TimeEntryFilter,
    ) -> Result<Page<TimeEntry>> {
        self.get_page(Family::TimeEntries, pagination, filter.query_pairs())
            .await
    }

    async fn get_time_entry(&self, id: i64) -> Result<TimeEntry> {
        self.get_entity(Family::TimeEntries, id).await
    }

    async fn create_time_entry(&self, payload: TimeEntryCreate) -> Result<TimeEntry> {
        self.create_entity(Family::TimeEntries, &payload).await
    }

    async fn update_time_entry(&self, id: i64, payload: TimeEntryUpdate) -> Result<TimeEntry> {
        self.update_entity(Family::TimeEntries, id, &payload).await
    }

    async fn delete_time_entry(&self, id: i64) -> Result<()> {
        self.delete_entity(Family::TimeEntries, id).await
    }

    async fn start_timer(&self, payload: TimerStart) -> Result<TimeEntry> {
        self.request_json(
            Method::POST,
            "/time-entries/start-timer",
            &[],
            Some(&payload),
        )
        .await
    }

    async fn stop_timer(&self, payload: TimerStop) -> Result<TimeEntry> {
        self.request_json(
            Method::POST,
            "/time-entries/stop-timer",
            &[],
            Some(&payload),
        )
        .await
    }

    async fn active_timer(&self) -> Result<Option<TimeEntry>> {
        self.request_json(Method::GET, "/time-entries/active-timer", &[], None::<&()>)
            .await
    }

    async fn time_summary(&self) -> Result<TimeSummary> {
        self.request_json(Method::GET, "/time-entries/summary", &[], None::<&()>)
            .await
    }
}

#[async_trait]
impl UserApi for TraqClient {
    async fn list_users(
        &self,
        pagination: &PaginationParams,
        filter: &UserFilter,
    ) -> Result<Page<User>> {
        self.get_page(Family::Users, pagination, filter.query_pairs())
            .await
    }

    async fn get_user(&self, id: i64) -> Result<User> {
        self.get_entity(Family::Users, id).await
    }
}

#[async_trait]
impl CalendarApi for TraqClient {
    async fn list_calendar_events(
        &self,
        pagination: &PaginationParams,
        filter: &CalendarEventFilter,
    ) -> Result<Page<CalendarEvent>> {
        self.get_page(Family::Calendar, pagination, filter.query_pairs())
            .await
    }

    async fn get_calendar_event(&self, id: i64) -> Result<CalendarEvent> {
        self.get_entity(Family::Calendar, id).await
    }

    async fn create_calendar_event(&self, payload: CalendarEventCreate) -> Result<CalendarEvent> {
        self.create_entity(Family::Calendar, &payload).await
    }

    async fn update_calendar_event(
        &self,
        id: i64,
        payload: CalendarEventUpdate,
    ) -> Result<CalendarEvent> {
        self.update_entity(Family::Calendar, id, &payload).await
    }

    async fn delete_calendar_event(&self, id: i64) -> Result<()> {
        self.delete_entity(Family::Calendar, id).await
    }

    async fn upload_calendar(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<CalendarUploadReport> {
        self.rate_limiter.until_ready().await;

        let token = self.get_valid_token().await?;

        // multipart forms are consumed on send, so build one per attempt
        let build_form = |bytes: Vec<u8>, file_name: String| {
            reqwest::multipart::Form::new()
                .part("file", reqwest::multipart::Part::bytes(bytes).file_name(file_name))
        };

        let response = self
            .http
            .post(self.url("/calendar/upload"))
            .header("Authorization", format!("Bearer {}", token))
            .multipart(build_form(bytes.clone(), file_name.to_string()))
            .send()
            .await
            .map_err(ApiError::from)?;

        let response = if response.status() == StatusCode::UNAUTHORIZED {
            let token = self.refresh_session().await?;
            self.http
                .post(self.url("/calendar/upload"))
                .header("Authorization", format!("Bearer {}", token))
                .multipart(build_form(bytes, file_name.to_string()))
                .send()
                .await
                .map_err(ApiError::from)?
        } else {
            response
        };

        Self::decode_json(response).await
    }

    async fn calendar_stats(&self) -> Result<CalendarStats> {
        self.request_json(Method::GET, "/calendar/stats", &[], None::<&()>)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = TraqClient::new(Some("http://localhost:8000/api".to_string()));
        assert!(client.is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = TraqClient::new(Some("http://localhost:8000/api/".to_string())).unwrap();
        assert_eq!(client.url("/tasks/"), "http://localhost:8000/api/tasks/");
    }

    #[test]
    fn test_decode_token_expiry_opaque_token() {
        assert!(decode_token_expiry("not-a-jwt").is_none());
        assert!(decode_token_expiry("aaa.bbb.ccc").is_none());
    }

    #[test]
    fn test_decode_token_expiry_valid_jwt() {
        // {"exp": 4102444800} => 2100-01-01T00:00:00Z
        let payload = base64::Engine::encode(
            &base64::engine::general_purpose::URL_SAFE_NO_PAD,
            br#"{"exp": 4102444800}"#,
        );
        let token = format!("header.{}.sig", payload);

        let expiry = decode_token_expiry(&token).unwrap();
        assert_eq!(expiry.timestamp(), 4102444800);
    }

    #[tokio::test]
    async fn test_token_expiry_check() {
        let client = TraqClient::new(None).unwrap();

        // No session should count as expired
        assert!(client.is_token_expired().await);

        client
            .set_session(
                "access".to_string(),
                "refresh".to_string(),
                Utc::now() - chrono::Duration::hours(1),
            )
            .await;
        assert!(client.is_token_expired().await);

        client
            .set_session(
                "access".to_string(),
                "refresh".to_string(),
                Utc::now() + chrono::Duration::hours(1),
            )
            .await;
        assert!(!client.is_token_expired().await);

        // Expiring soon counts as expired
        client
            .set_session(
                "access".to_string(),
                "refresh".to_string(),
                Utc::now() + chrono::Duration::minutes(2),
            )
            .await;
        assert!(client.is_token_expired().await);
    }

    fn task_page_body() -> String {
        r#"{
            "items": [{
                "id": 1,
                "name": "Task 1",
                "project_id": 1,
                "category_id": 1,
                "priority_id": 2,
                "status_id": 1,
                "currency": "USD",
                "is_active": true,
                "created_at": "2025-03-10T09:00:00Z",
                "updated_at": "2025-03-10T09:00:00Z"
            }],
            "total_items": 1,
            "total_pages": 1,
            "current_page": 1,
            "has_next": false,
            "has_prev": false
        }"#
        .to_string()
    }

    #[tokio::test]
    async fn test_401_refreshes_once_and_replays() {
        let mut server = mockito::Server::new_async().await;

        // The stale token is rejected, the fresh one is accepted; header
        // matching keeps the two mocks unambiguous.
        let _rejected = server
            .mock("GET", "/tasks/")
            .match_query(mockito::Matcher::Any)
            .match_header("authorization", "Bearer stale-token")
            .with_status(401)
            .with_body(r#"{"detail": "Token revoked"}"#)
            .create_async()
            .await;

        let refresh = server
            .mock("POST", "/auth/refresh")
            .with_status(200)
            .with_body(
                r#"{"access_token": "fresh-token", "refresh_token": "r2", "token_type": "bearer"}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let replayed = server
            .mock("GET", "/tasks/")
            .match_query(mockito::Matcher::Any)
            .match_header("authorization", "Bearer fresh-token")
            .with_status(200)
            .with_body(task_page_body())
            .expect(1)
            .create_async()
            .await;

        let client = TraqClient::new(Some(server.url())).unwrap();
        client
            .set_session(
                "stale-token".to_string(),
                "r1".to_string(),
                Utc::now() + chrono::Duration::hours(1),
            )
            .await;

        let page = client
            .list_tasks(&PaginationParams::new(), &TaskFilter::default())
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        refresh.assert_async().await;
        replayed.assert_async().await;
    }

    #[tokio::test]
    async fn test_conflict_status_maps_with_detail() {
        let mut server = mockito::Server::new_async().await;

        let _start = server
            .mock("POST", "/time-entries/start-timer")
            .with_status(409)
            .with_body(r#"{"detail": "A timer is already running for this user"}"#)
            .create_async()
            .await;

        let client = TraqClient::new(Some(server.url())).unwrap();
        client
            .set_session(
                "token".to_string(),
                "refresh".to_string(),
                Utc::now() + chrono::Duration::hours(1),
            )
            .await;

        let err = client
            .start_timer(TimerStart {
                project_id: 1,
                task_id: 2,
                description: "work".to_string(),
                start_time: "09:00".to_string(),
            })
            .await
            .unwrap_err();

        match err {
            crate::error::Error::Api(ApiError::Conflict(detail)) => {
                assert!(detail.contains("already running"));
            }
            other => panic!("Expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unstructured_error_body_falls_back_to_text() {
        let mut server = mockito::Server::new_async().await;

        let _get = server
            .mock("GET", "/clients/1")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let client = TraqClient::new(Some(server.url())).unwrap();
        client
            .set_session(
                "token".to_string(),
                "refresh".to_string(),
                Utc::now() + chrono::Duration::hours(1),
            )
            .await;

        let err = client.get_client(1).await.unwrap_err();
        match err {
            crate::error::Error::Api(ApiError::ServerError(detail)) => {
                assert!(detail.contains("upstream exploded"));
            }
            other => panic!("Expected server error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_active_timer_null_body() {
        let mut server = mockito::Server::new_async().await;

        let _get = server
            .mock("GET", "/time-entries/active-timer")
            .with_status(200)
            .with_body("null")
            .create_async()
            .await;

        let client = TraqClient::new(Some(server.url())).unwrap();
        client
            .set_session(
                "token".to_string(),
                "refresh".to_string(),
                Utc::now() + chrono::Duration::hours(1),
            )
            .await;

        let active = client.active_timer().await.unwrap();
        assert!(active.is_none());
    }

    #[tokio::test]
    async fn test_session_tokens_roundtrip() {
        let client = TraqClient::new(None).unwrap();
        assert!(client.session_tokens().await.is_none());

        let expires = Utc::now() + chrono::Duration::hours(1);
        client
            .set_session("a".to_string(), "r".to_string(), expires)
            .await;

        let tokens = client.session_tokens().await.unwrap();
        assert_eq!(tokens.access_token, "a");
        assert_eq!(tokens.refresh_token, "r");
        assert_eq!(tokens.expires_at, expires);
    }
}
