//! In-process stand-in for the Freshservice API that records every request.

#![allow(dead_code, clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, post};
use axum::Router;
use serde_json::{json, Value};

use kb_ticket_sync::config::{DEFAULT_TAG, FreshserviceConfig};

pub const API_KEY: &str = "key";
/// base64("key:X")
pub const EXPECTED_AUTH: &str = "Basic a2V5Olg=";
pub const FOLDER_ID: u64 = 77;
pub const GROUP_ID: u64 = 42;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: Value,
    pub authorization: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).expect("valid status");
        (status, self.body).into_response()
    }
}

pub struct MockState {
    pub requests: Mutex<Vec<Recorded>>,
    /// (id, title) of the articles in the folder
    pub articles: Mutex<Vec<(u64, String)>>,
    pub ticket_reply: Mutex<Reply>,
    pub create_article_reply: Mutex<Reply>,
    pub delete_reply: Mutex<Reply>,
    pub list_status: Mutex<u16>,
    /// Serve the first page for every page number
    pub ignore_page: Mutex<bool>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            articles: Mutex::new(Vec::new()),
            ticket_reply: Mutex::new(Reply::new(201, r#"{"ticket": {"id": 1}}"#)),
            create_article_reply: Mutex::new(Reply::new(201, r#"{"article": {"id": 5000}}"#)),
            delete_reply: Mutex::new(Reply::new(204, "")),
            list_status: Mutex::new(200),
            ignore_page: Mutex::new(false),
        }
    }
}

pub struct MockFreshservice {
    pub base_url: String,
    pub state: Arc<MockState>,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockFreshservice {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .route("/api/v2/tickets", post(record_ticket))
            .route(
                "/api/v2/solutions/articles",
                post(record_article_create).get(list_articles),
            )
            .route("/api/v2/solutions/articles/:id", delete(record_article_delete))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr: SocketAddr = listener.local_addr().expect("listener addr");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock freshservice");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            _handle: handle,
        }
    }

    pub fn settings(&self) -> FreshserviceConfig {
        FreshserviceConfig {
            api_key: API_KEY.to_string(),
            ticket_url: format!("{}/api/v2/tickets", self.base_url),
            knowledge_base_url: self.knowledge_base_url(),
            folder_id: FOLDER_ID,
            group_id: Some(GROUP_ID),
            tag: DEFAULT_TAG.to_string(),
            timeout_secs: 5,
        }
    }

    pub fn knowledge_base_url(&self) -> String {
        format!("{}/api/v2/solutions/articles", self.base_url)
    }

    pub fn with_articles(&self, count: u64) {
        let mut articles = self.state.articles.lock().unwrap();
        *articles = (0..count).map(|i| (1000 + i, format!("Article {i}"))).collect();
    }

    pub fn set_ticket_reply(&self, status: u16, body: &str) {
        *self.state.ticket_reply.lock().unwrap() = Reply::new(status, body);
    }

    pub fn set_create_article_reply(&self, status: u16, body: &str) {
        *self.state.create_article_reply.lock().unwrap() = Reply::new(status, body);
    }

    pub fn set_delete_reply(&self, status: u16, body: &str) {
        *self.state.delete_reply.lock().unwrap() = Reply::new(status, body);
    }

    pub fn set_list_status(&self, status: u16) {
        *self.state.list_status.lock().unwrap() = status;
    }

    pub fn ignore_page_parameter(&self) {
        *self.state.ignore_page.lock().unwrap() = true;
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn ticket_requests(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == "/api/v2/tickets")
            .collect()
    }
}

fn record(
    state: &MockState,
    method: Method,
    uri: &Uri,
    query: HashMap<String, String>,
    headers: &HeaderMap,
    body: &[u8],
) {
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(body).expect("request body is JSON")
    };
    let authorization = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(String::from);

    state.requests.lock().unwrap().push(Recorded {
        method,
        path: uri.path().to_string(),
        query,
        body,
        authorization,
    });
}

async fn record_ticket(
    State(state): State<Arc<MockState>>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    record(&state, Method::POST, &uri, HashMap::new(), &headers, &body);
    let reply = state.ticket_reply.lock().unwrap().clone();
    reply.into_response()
}

async fn record_article_create(
    State(state): State<Arc<MockState>>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    record(&state, Method::POST, &uri, HashMap::new(), &headers, &body);
    let reply = state.create_article_reply.lock().unwrap().clone();
    reply.into_response()
}

async fn record_article_delete(
    State(state): State<Arc<MockState>>,
    Path(_id): Path<u64>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    record(&state, Method::DELETE, &uri, HashMap::new(), &headers, &[]);
    let reply = state.delete_reply.lock().unwrap().clone();
    reply.into_response()
}

async fn list_articles(
    State(state): State<Arc<MockState>>,
    Query(query): Query<HashMap<String, String>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    record(&state, Method::GET, &uri, query.clone(), &headers, &[]);

    let status = *state.list_status.lock().unwrap();
    if status != 200 {
        return Reply::new(status, "access denied").into_response();
    }

    let per_page: usize = query
        .get("per_page")
        .and_then(|v| v.parse().ok())
        .unwrap_or(30);
    let page: usize = if *state.ignore_page.lock().unwrap() {
        1
    } else {
        query.get("page").and_then(|v| v.parse().ok()).unwrap_or(1)
    };

    let articles = state.articles.lock().unwrap();
    let items: Vec<Value> = articles
        .iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .map(|(id, title)| json!({"id": id, "title": title, "folder_id": FOLDER_ID}))
        .collect();

    (StatusCode::OK, json!({ "articles": items }).to_string()).into_response()
}
