use thiserror::Error;

use crate::api::map_service::polyline::PolylineError;

pub const MISSING_INPUT_ALERT: &str = "Please enter both pickup and dropoff locations.";
pub const REQUEST_FAILURE_ALERT: &str =
    "Something went wrong! Please check your network or try again.";
pub const BACKEND_FALLBACK_ALERT: &str = "Prediction failed. Please try again.";

#[derive(Error, Debug)]
pub enum FareError {
    #[error("pickup or dropoff address is empty")]
    MissingInput,

    #[error("prediction request failed: {0}")]
    RequestFailure(#[from] reqwest::Error),

    #[error("undecodable prediction response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("prediction backend rejected the request (status {status:?}, message {message:?})")]
    Backend {
        status: Option<u16>,
        message: Option<String>,
    },
}

impl FareError {
    pub fn alert_message(&self) -> &str {
        match self {
            FareError::MissingInput => MISSING_INPUT_ALERT,
            FareError::RequestFailure(_) | FareError::Decode(_) => REQUEST_FAILURE_ALERT,
            FareError::Backend { message, .. } => message
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or(BACKEND_FALLBACK_ALERT),
        }
    }
}

#[derive(Error, Debug)]
pub enum RouteLookupFailure {
    #[error("{status}{}", detail(.message))]
    Status {
        status: String,
        message: Option<String>,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid request url: {0}")]
    Url(String),

    #[error("undecodable route path: {0}")]
    Polyline(#[from] PolylineError),
}

#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("places lookup returned status {status}{}", detail(.message))]
    Status {
        status: String,
        message: Option<String>,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid request url: {0}")]
    Url(String),
}

fn detail(message: &Option<String>) -> String {
    match message.as_deref() {
        Some(m) if !m.is_empty() => format!(": {m}"),
        _ => String::new(),
    }
}
