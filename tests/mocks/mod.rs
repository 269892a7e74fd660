//! Mock prediction backend and maps API, plus a surface that records what the
//! page did.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use serde_json::{Value, json};
use tokio::task::JoinHandle;

use fare_estimator::api::{map_service, predict_service};
use fare_estimator::page::{MapController, Page, Surface, SummaryExporter};

pub const MAPS_KEY: &str = "test-key";

/// Three-point path used for every successful directions reply.
pub const ROUTE_POLYLINE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Busy(bool),
    Alert(String),
}

#[derive(Default)]
pub struct RecordingSurface {
    events: Mutex<Vec<SurfaceEvent>>,
}

impl RecordingSurface {
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::Alert(message) => Some(message),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn alert(&self, message: &str) {
        self.events.lock().unwrap().push(SurfaceEvent::Alert(message.to_string()));
    }

    fn set_busy(&self, busy: bool) {
        self.events.lock().unwrap().push(SurfaceEvent::Busy(busy));
    }
}

#[derive(Clone)]
pub enum PredictReply {
    Json(u16, Value),
    Raw(u16, &'static str),
}

#[derive(Clone)]
pub struct MockBackend {
    pub predict_hits: Arc<AtomicUsize>,
    pub directions_hits: Arc<AtomicUsize>,
    predict_reply: Arc<Mutex<PredictReply>>,
    directions_status: Arc<Mutex<String>>,
    last_predict_body: Arc<Mutex<Option<Value>>>,
    last_directions_query: Arc<Mutex<Option<HashMap<String, String>>>>,
    last_autocomplete_query: Arc<Mutex<Option<HashMap<String, String>>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            predict_hits: Arc::new(AtomicUsize::new(0)),
            directions_hits: Arc::new(AtomicUsize::new(0)),
            predict_reply: Arc::new(Mutex::new(PredictReply::Json(200, times_square_to_jfk()))),
            directions_status: Arc::new(Mutex::new("OK".to_string())),
            last_predict_body: Arc::new(Mutex::new(None)),
            last_directions_query: Arc::new(Mutex::new(None)),
            last_autocomplete_query: Arc::new(Mutex::new(None)),
        }
    }

    pub fn reply_with(&self, reply: PredictReply) {
        *self.predict_reply.lock().unwrap() = reply;
    }

    pub fn directions_status(&self, status: &str) {
        *self.directions_status.lock().unwrap() = status.to_string();
    }

    pub fn predict_hits(&self) -> usize {
        self.predict_hits.load(Ordering::SeqCst)
    }

    pub fn directions_hits(&self) -> usize {
        self.directions_hits.load(Ordering::SeqCst)
    }

    pub fn last_predict_body(&self) -> Option<Value> {
        self.last_predict_body.lock().unwrap().clone()
    }

    pub fn last_directions_query(&self) -> Option<HashMap<String, String>> {
        self.last_directions_query.lock().unwrap().clone()
    }

    pub fn last_autocomplete_query(&self) -> Option<HashMap<String, String>> {
        self.last_autocomplete_query.lock().unwrap().clone()
    }

    fn router(self) -> Router {
        Router::new()
            .route("/predict", post(predict))
            .route("/maps/api/directions/json", get(directions))
            .route("/maps/api/place/autocomplete/json", get(autocomplete))
            .with_state(self)
    }
}

pub fn times_square_to_jfk() -> Value {
    json!({
        "base_fare": 12.5,
        "total_amount": 18.75,
        "extra": 1,
        "congestion": 2.5,
        "mta": 0.5,
        "improvement": 0.3,
        "details": {
            "distance_miles": 15.2,
            "duration_minutes": 38,
            "pickup_dayofweek": 4,
            "pickup_hour": 14,
            "pickup_date": "2024-03-15"
        }
    })
}

async fn predict(State(mock): State<MockBackend>, Json(body): Json<Value>) -> Response {
    mock.predict_hits.fetch_add(1, Ordering::SeqCst);
    *mock.last_predict_body.lock().unwrap() = Some(body);

    let reply = mock.predict_reply.lock().unwrap().clone();
    match reply {
        PredictReply::Json(status, value) => (status_code(status), Json(value)).into_response(),
        PredictReply::Raw(status, text) => (status_code(status), text).into_response(),
    }
}

async fn directions(
    State(mock): State<MockBackend>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    mock.directions_hits.fetch_add(1, Ordering::SeqCst);
    *mock.last_directions_query.lock().unwrap() = Some(params);

    let status = mock.directions_status.lock().unwrap().clone();
    if status == "REQUEST_DENIED" {
        return Json(json!({
            "status": status,
            "routes": [],
            "error_message": "The provided API key is invalid."
        }));
    }
    if status != "OK" {
        return Json(json!({ "status": status, "routes": [] }));
    }

    Json(json!({
        "status": "OK",
        "routes": [{
            "summary": "I-495 E",
            "overview_polyline": { "points": ROUTE_POLYLINE },
            "legs": [{
                "start_location": { "lat": 40.758, "lng": -73.9855 },
                "end_location": { "lat": 40.6413, "lng": -73.7781 },
                "start_address": "Times Square, New York, NY, USA",
                "end_address": "JFK Airport, Queens, NY, USA",
                "distance": { "text": "15.2 mi", "value": 24462 },
                "duration": { "text": "38 mins", "value": 2280 }
            }]
        }]
    }))
}

async fn autocomplete(
    State(mock): State<MockBackend>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let input = params.get("input").cloned().unwrap_or_default();
    *mock.last_autocomplete_query.lock().unwrap() = Some(params);

    if input.is_empty() {
        return Json(json!({ "status": "ZERO_RESULTS", "predictions": [] }));
    }

    Json(json!({
        "status": "OK",
        "predictions": [
            { "description": format!("{input}, New York, NY, USA"), "place_id": "p1" },
            { "description": format!("{input} Station, New York, NY, USA"), "place_id": "p2" }
        ]
    }))
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap()
}

pub struct TestServer {
    pub base_url: String,
    pub mock: MockBackend,
    pub handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let mock = MockBackend::new();
        let app = mock.clone().router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}:{}", addr.ip(), addr.port());

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url,
            mock,
            handle,
        }
    }
}

/// A base url nothing is listening on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}:{}", addr.ip(), addr.port())
}

pub fn export_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fare-estimator-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn page(predict_url: &str, maps_url: &str, surface: Arc<RecordingSurface>) -> Page {
    let predict = predict_service::Client::new(predict_url).unwrap();
    let maps = map_service::Client::new(maps_url, MAPS_KEY).unwrap();

    Page::new(
        predict,
        MapController::initialize(maps),
        surface,
        SummaryExporter::new(export_dir()),
    )
}
