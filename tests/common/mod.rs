#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use leaders_scrap::session::Session;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// In-process stand-in for the country leaders API and the encyclopedia pages it links to.
pub struct FakeApi {
    pub base_url: String,
    state: Arc<FakeState>,
}

#[derive(Default)]
struct FakeState {
    countries: Vec<String>,
    leaders: HashMap<String, Value>,
    pages: HashMap<String, String>,
    issued_cookies: AtomicUsize,
    reject_next_leaders: AtomicUsize,
    leader_cookies: Mutex<Vec<String>>,
}

pub struct FakeApiBuilder {
    countries: Vec<String>,
    leaders: Vec<(String, Vec<Value>)>,
    pages: HashMap<String, String>,
    reject_next_leaders: usize,
}

impl FakeApiBuilder {
    pub fn new() -> Self {
        Self {
            countries: Vec::new(),
            leaders: Vec::new(),
            pages: HashMap::new(),
            reject_next_leaders: 0,
        }
    }

    /// `leaders` are leader objects without `wikipedia_url`; a `page` key names the
    /// page under `/wiki/` and is turned into the full URL once the server address is known.
    pub fn country(mut self, code: &str, leaders: Vec<Value>) -> Self {
        self.countries.push(code.to_string());
        self.leaders.push((code.to_string(), leaders));
        self
    }

    pub fn page(mut self, name: &str, html: &str) -> Self {
        self.pages.insert(name.to_string(), html.to_string());
        self
    }

    /// The next `n` leaders requests answer 403, as if the cookie had expired.
    pub fn reject_leaders(mut self, n: usize) -> Self {
        self.reject_next_leaders = n;
        self
    }

    pub async fn start(self) -> FakeApi {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind fake api");
        let base_url = format!("http://{}", listener.local_addr().expect("local addr"));

        let leaders = self
            .leaders
            .into_iter()
            .map(|(code, leaders)| {
                let leaders = leaders
                    .into_iter()
                    .map(|mut leader| {
                        if let Some(page) = leader.as_object_mut().and_then(|o| o.remove("page")) {
                            let url = format!("{base_url}/wiki/{}", page.as_str().unwrap_or_default());
                            leader["wikipedia_url"] = Value::String(url);
                        }
                        leader
                    })
                    .collect();
                (code, Value::Array(leaders))
            })
            .collect();

        let state = Arc::new(FakeState {
            countries: self.countries,
            leaders,
            pages: self.pages,
            reject_next_leaders: AtomicUsize::new(self.reject_next_leaders),
            ..FakeState::default()
        });

        let app = Router::new()
            .route("/cookie", get(cookie))
            .route("/countries", get(countries))
            .route("/leaders", get(leaders_handler))
            .route("/wiki/:name", get(wiki))
            .with_state(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake api server");
        });

        FakeApi { base_url, state }
    }
}

impl FakeApi {
    pub fn session(&self) -> Session {
        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .expect("build client");
        Session::with_client(client, self.base_url.as_str())
    }

    pub fn issued_cookies(&self) -> usize {
        self.state.issued_cookies.load(Ordering::SeqCst)
    }

    /// `Cookie` headers received by `/leaders`, in request order.
    pub fn leader_cookies(&self) -> Vec<String> {
        self.state.leader_cookies.lock().expect("cookie log").clone()
    }

    pub fn reject_leaders(&self, n: usize) {
        self.state.reject_next_leaders.store(n, Ordering::SeqCst);
    }
}

pub fn leader(first_name: &str, last_name: &str, page: &str) -> Value {
    json!({
        "id": format!("Q-{first_name}"),
        "first_name": first_name,
        "last_name": last_name,
        "birth_date": "1950-01-01",
        "page": page,
    })
}

pub fn bio_page(lead: &str) -> String {
    format!(
        r#"<html><body>
             <p class="mw-empty-elt"></p>
             <p>{lead}</p>
             <p>Later life of <b>someone else</b>.</p>
           </body></html>"#
    )
}

async fn cookie(State(state): State<Arc<FakeState>>) -> impl IntoResponse {
    let n = state.issued_cookies.fetch_add(1, Ordering::SeqCst) + 1;
    (
        StatusCode::OK,
        [(header::SET_COOKIE, format!("user_cookie=cookie-{n}; Path=/"))],
        "The cookie has been created",
    )
}

async fn countries(State(state): State<Arc<FakeState>>, headers: HeaderMap) -> Response {
    if !headers.contains_key(header::COOKIE) {
        return (StatusCode::FORBIDDEN, Json(json!({ "message": "The cookie is missing" }))).into_response();
    }
    Json(json!(state.countries)).into_response()
}

async fn leaders_handler(
    State(state): State<Arc<FakeState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let cookie = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.leader_cookies.lock().expect("cookie log").push(cookie);

    let rejected = state
        .reject_next_leaders
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok();
    if rejected {
        return (StatusCode::FORBIDDEN, Json(json!({ "message": "The cookie is expired" }))).into_response();
    }

    let country = query.get("country").cloned().unwrap_or_default();
    match state.leaders.get(&country) {
        Some(leaders) => Json(leaders.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "Unknown country" }))).into_response(),
    }
}

async fn wiki(State(state): State<Arc<FakeState>>, Path(name): Path<String>) -> Response {
    match state.pages.get(&name) {
        Some(html) => ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "no such page").into_response(),
    }
}
