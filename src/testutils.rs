//! Test helpers: an in-process OpenWeatherMap stand-in and a router spawner.

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use tokio::{net::TcpListener, task::JoinHandle};

use crate::config::WeatherConfig;

pub const SHANGHAI_BODY: &str = r#"{"name":"Shanghai","sys":{"country":"CN"},"weather":[{"description":"晴"}],"main":{"temp":20,"feels_like":19,"temp_min":18,"temp_max":22,"humidity":50,"pressure":1012},"wind":{"speed":3},"clouds":{"all":10}}"#;

/// Binds `router` on an ephemeral localhost port and serves it in the background.
pub async fn spawn_router(router: Router) -> (SocketAddr, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    (addr, handle)
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: Arc<String>,
    hits: Arc<AtomicUsize>,
    last_query: Arc<Mutex<Option<HashMap<String, String>>>>,
}

/// Serves a fixed status and body on `/data/2.5/weather`.
pub struct MockProvider {
    pub base_url: String,
    state: MockState,
    handle: JoinHandle<()>,
}

impl MockProvider {
    pub async fn start(status: StatusCode, body: &str) -> Self {
        let state = MockState {
            status,
            body: Arc::new(body.to_string()),
            hits: Arc::new(AtomicUsize::new(0)),
            last_query: Arc::new(Mutex::new(None)),
        };
        let router = Router::new()
            .route("/data/2.5/weather", get(current_weather))
            .with_state(state.clone());
        let (addr, handle) = spawn_router(router).await;

        Self {
            base_url: format!("http://{addr}/data/2.5"),
            state,
            handle,
        }
    }

    pub fn config(&self, api_key: &str) -> WeatherConfig {
        WeatherConfig::new(api_key, self.base_url.clone())
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> HashMap<String, String> {
        self.state
            .last_query
            .lock()
            .unwrap()
            .clone()
            .expect("provider was never called")
    }
}

impl Drop for MockProvider {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn current_weather(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.last_query.lock().unwrap() = Some(params);
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.as_str().to_owned(),
    )
}
