//! In-process stand-in for the remote metadata endpoints.

#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use song_resolver::catalog::remote::RemoteConfig;

pub const SONGS_FIXTURE: &str = include_str!("../fixtures/songs.json");
pub const ALIASES_FIXTURE: &str = include_str!("../fixtures/aliases.json");

/// Controllable metadata source; counts requests and records query strings
pub struct FakeSource {
    pub songs_status: AtomicU16,
    pub aliases_status: AtomicU16,
    pub songs_body: Mutex<String>,
    pub aliases_body: Mutex<String>,
    pub song_requests: AtomicUsize,
    pub alias_requests: AtomicUsize,
    pub last_song_query: Mutex<HashMap<String, String>>,
}

impl FakeSource {
    fn new() -> Self {
        Self {
            songs_status: AtomicU16::new(200),
            aliases_status: AtomicU16::new(200),
            songs_body: Mutex::new(SONGS_FIXTURE.to_string()),
            aliases_body: Mutex::new(ALIASES_FIXTURE.to_string()),
            song_requests: AtomicUsize::new(0),
            alias_requests: AtomicUsize::new(0),
            last_song_query: Mutex::new(HashMap::new()),
        }
    }

    pub fn set_songs_status(&self, status: u16) {
        self.songs_status.store(status, Ordering::SeqCst);
    }

    pub fn set_aliases_status(&self, status: u16) {
        self.aliases_status.store(status, Ordering::SeqCst);
    }

    pub fn set_songs_body(&self, body: &str) {
        *self.songs_body.lock().unwrap() = body.to_string();
    }

    pub fn song_requests(&self) -> usize {
        self.song_requests.load(Ordering::SeqCst)
    }

    pub fn alias_requests(&self) -> usize {
        self.alias_requests.load(Ordering::SeqCst)
    }
}

async fn songs_handler(
    State(source): State<Arc<FakeSource>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    source.song_requests.fetch_add(1, Ordering::SeqCst);
    *source.last_song_query.lock().unwrap() = query;
    let status = StatusCode::from_u16(source.songs_status.load(Ordering::SeqCst)).unwrap();
    let body = source.songs_body.lock().unwrap().clone();
    (status, body).into_response()
}

async fn aliases_handler(State(source): State<Arc<FakeSource>>) -> Response {
    source.alias_requests.fetch_add(1, Ordering::SeqCst);
    let status = StatusCode::from_u16(source.aliases_status.load(Ordering::SeqCst)).unwrap();
    let body = source.aliases_body.lock().unwrap().clone();
    (status, body).into_response()
}

/// A running fake source and the config pointing at it
pub struct FakeServer {
    pub source: Arc<FakeSource>,
    pub config: RemoteConfig,
}

/// Start a fake metadata source on an ephemeral port
pub async fn start_fake_source() -> FakeServer {
    let source = Arc::new(FakeSource::new());
    let app = Router::new()
        .route("/song/list", get(songs_handler))
        .route("/alias/list", get(aliases_handler))
        .with_state(Arc::clone(&source));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeServer {
        source,
        config: RemoteConfig {
            songs_url: format!("http://{addr}/song/list"),
            aliases_url: format!("http://{addr}/alias/list"),
            ..RemoteConfig::default()
        },
    }
}
