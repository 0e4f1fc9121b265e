use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Due {
    pub string: String,
    pub is_recurring: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub content: String,
    pub description: String,
    pub priority: u8,
    pub due: Option<Due>,
    pub is_completed: bool,
}

#[derive(Deserialize)]
pub struct CreateTask {
    pub content: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_priority")]
    pub priority: u8,
    pub due_string: Option<String>,
}

fn default_priority() -> u8 {
    1
}

#[derive(Deserialize)]
pub struct UpdateTask {
    pub content: Option<String>,
    pub description: Option<String>,
    pub priority: Option<u8>,
    pub due_string: Option<String>,
}

#[derive(Deserialize)]
pub struct TokenRequest {
    pub client_id: String,
    pub client_secret: String,
    pub code: String,
}

#[derive(Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Deserialize)]
pub struct AuthorizeParams {
    pub client_id: String,
    pub scope: String,
    pub state: String,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub filter: Option<String>,
}

/// Credentials and redirect target the fake authorization server accepts.
/// `codes` are authorization codes valid from startup, each usable once.
#[derive(Clone, Debug)]
pub struct MockConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub codes: Vec<String>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            client_id: "mock-client-id".to_string(),
            client_secret: "mock-client-secret".to_string(),
            redirect_uri: "http://localhost:8080/callback".to_string(),
            codes: vec!["mock-code".to_string()],
        }
    }
}

#[derive(Default)]
struct Store {
    next_id: u64,
    tasks: BTreeMap<u64, Task>,
    codes: HashSet<String>,
    tokens: HashSet<String>,
}

#[derive(Clone)]
pub struct MockState {
    config: Arc<MockConfig>,
    store: Arc<RwLock<Store>>,
}

impl MockState {
    pub fn new(config: MockConfig) -> Self {
        let store = Store {
            next_id: 1,
            codes: config.codes.iter().cloned().collect(),
            ..Store::default()
        };
        Self {
            config: Arc::new(config),
            store: Arc::new(RwLock::new(store)),
        }
    }
}

pub fn app() -> Router {
    app_with_state(MockState::new(MockConfig::default()))
}

pub fn app_with_state(state: MockState) -> Router {
    let tasks = Router::new()
        .route("/rest/v2/tasks", get(list_tasks).post(create_task))
        .route(
            "/rest/v2/tasks/{id}",
            get(get_task).post(update_task).delete(delete_task),
        )
        .route("/rest/v2/tasks/{id}/close", post(close_task))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .route("/oauth/authorize", get(authorize))
        .route("/oauth/access_token", post(access_token))
        .merge(tasks)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_state(listener, MockState::new(MockConfig::default())).await
}

pub async fn run_with_state(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock todoist api listening");
    }
    axum::serve(listener, app_with_state(state)).await
}

async fn require_bearer(
    State(state): State<MockState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned)
        .ok_or(StatusCode::UNAUTHORIZED)?;
    if !state.store.read().await.tokens.contains(&token) {
        debug!("rejecting unknown bearer token");
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(next.run(request).await)
}

/// Auto-approves the consent screen: redirects straight back with a fresh code.
async fn authorize(
    State(state): State<MockState>,
    Query(params): Query<AuthorizeParams>,
) -> Result<Redirect, StatusCode> {
    if params.client_id != state.config.client_id || params.scope.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let code = Uuid::new_v4().simple().to_string();
    state.store.write().await.codes.insert(code.clone());
    let mut location =
        Url::parse(&state.config.redirect_uri).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    location
        .query_pairs_mut()
        .append_pair("code", &code)
        .append_pair("state", &params.state);
    Ok(Redirect::to(location.as_str()))
}

async fn access_token(
    State(state): State<MockState>,
    Json(input): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, StatusCode> {
    if input.client_id != state.config.client_id
        || input.client_secret != state.config.client_secret
    {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let mut store = state.store.write().await;
    if !store.codes.remove(&input.code) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let access_token = Uuid::new_v4().simple().to_string();
    store.tokens.insert(access_token.clone());
    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
    }))
}

async fn list_tasks(
    State(state): State<MockState>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Task>> {
    let store = state.store.read().await;
    let tasks = store
        .tasks
        .values()
        .filter(|t| !t.is_completed)
        .filter(|t| match &params.filter {
            Some(filter) => t
                .due
                .as_ref()
                .is_some_and(|due| due.string.eq_ignore_ascii_case(filter)),
            None => true,
        })
        .cloned()
        .collect();
    Json(tasks)
}

async fn create_task(
    State(state): State<MockState>,
    Json(input): Json<CreateTask>,
) -> Result<Json<Task>, StatusCode> {
    if input.content.is_empty() || !(1..=4).contains(&input.priority) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = state.store.write().await;
    let id = store.next_id;
    store.next_id += 1;
    let task = Task {
        id: id.to_string(),
        content: input.content,
        description: input.description,
        priority: input.priority,
        due: input.due_string.map(due_from),
        is_completed: false,
    };
    store.tasks.insert(id, task.clone());
    Ok(Json(task))
}

async fn get_task(
    State(state): State<MockState>,
    Path(id): Path<u64>,
) -> Result<Json<Task>, StatusCode> {
    let store = state.store.read().await;
    store.tasks.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_task(
    State(state): State<MockState>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateTask>,
) -> Result<Json<Task>, StatusCode> {
    if input.priority.is_some_and(|p| !(1..=4).contains(&p)) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = state.store.write().await;
    let task = store.tasks.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(content) = input.content {
        task.content = content;
    }
    if let Some(description) = input.description {
        task.description = description;
    }
    if let Some(priority) = input.priority {
        task.priority = priority;
    }
    if let Some(due_string) = input.due_string {
        task.due = Some(due_from(due_string));
    }
    Ok(Json(task.clone()))
}

async fn close_task(
    State(state): State<MockState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = state.store.write().await;
    let task = store.tasks.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    task.is_completed = true;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_task(
    State(state): State<MockState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = state.store.write().await;
    store
        .tasks
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

fn due_from(string: String) -> Due {
    Due {
        is_recurring: string.to_ascii_lowercase().starts_with("every"),
        string,
    }
}
