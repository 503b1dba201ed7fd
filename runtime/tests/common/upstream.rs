//! Loopback stand-in for the structured article-list endpoint.

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const API_PATH: &str = "/bapi/composite/v1/public/cms/article/list/query";

struct StubState {
    status: StatusCode,
    body: String,
    delay: Duration,
    hits: AtomicUsize,
    last_query: Mutex<HashMap<String, String>>,
    last_user_agent: Mutex<Option<String>>,
}

/// Serves one canned response on [`API_PATH`] and records what it saw.
pub struct StubUpstream {
    pub url: String,
    state: Arc<StubState>,
}

impl StubUpstream {
    pub async fn json(body: serde_json::Value) -> Self {
        Self::start(200, body.to_string(), Duration::ZERO).await
    }

    pub async fn start(status: u16, body: String, delay: Duration) -> Self {
        let state = Arc::new(StubState {
            status: StatusCode::from_u16(status).unwrap(),
            body,
            delay,
            hits: AtomicUsize::new(0),
            last_query: Mutex::new(HashMap::new()),
            last_user_agent: Mutex::new(None),
        });
        let app = Router::new()
            .route(API_PATH, get(serve))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}{API_PATH}"),
            state,
        }
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn query(&self, key: &str) -> Option<String> {
        self.state.last_query.lock().unwrap().get(key).cloned()
    }

    pub fn user_agent(&self) -> Option<String> {
        self.state.last_user_agent.lock().unwrap().clone()
    }
}

async fn serve(
    State(state): State<Arc<StubState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.last_query.lock().unwrap() = query;
    let agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *state.last_user_agent.lock().unwrap() = agent;

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}
