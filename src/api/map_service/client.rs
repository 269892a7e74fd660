use anyhow::anyhow;
use reqwest::Url;

use super::types::*;
use crate::error::{PlacesError, RouteLookupFailure};

const DIRECTIONS_PATH: &str = "/maps/api/directions/json";
const AUTOCOMPLETE_PATH: &str = "/maps/api/place/autocomplete/json";

#[derive(Clone)]
pub struct Client {
    inner: reqwest::Client,
    base: Url,
    key: String,
}

impl Client {
    pub fn new(base: &str, key: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::new();
        let base: Url = base
            .parse()
            .map_err(|e| anyhow!("{} is not a valid url: {}", base, e))?;

        Ok(Self {
            inner: client,
            base,
            key: key.to_string(),
        })
    }

    pub async fn directions(&self, q: &RouteQuery) -> Result<DirectionsRoute, RouteLookupFailure> {
        let mut url = self
            .base
            .join(DIRECTIONS_PATH)
            .map_err(|e| RouteLookupFailure::Url(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("origin", &q.origin)
            .append_pair("destination", &q.destination)
            .append_pair("mode", q.mode.as_str())
            .append_pair("key", &self.key);

        let response: DirectionsResponse = self
            .inner
            .get(url)
            .send()
            .await?
            .json()
            .await?;

        if response.status != "OK" {
            return Err(RouteLookupFailure::Status {
                status: response.status,
                message: response.error_message,
            });
        }

        response
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| RouteLookupFailure::Status {
                status: "ZERO_RESULTS".to_string(),
                message: None,
            })
    }

    pub async fn autocomplete(&self, input: &str, country: &str) -> Result<Vec<Prediction>, PlacesError> {
        let mut url = self
            .base
            .join(AUTOCOMPLETE_PATH)
            .map_err(|e| PlacesError::Url(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("input", input)
            .append_pair("components", &format!("country:{country}"))
            .append_pair("key", &self.key);

        let response: AutocompleteResponse = self
            .inner
            .get(url)
            .send()
            .await?
            .json()
            .await?;

        match response.status.as_str() {
            "OK" => Ok(response.predictions),
            "ZERO_RESULTS" => Ok(Vec::new()),
            _ => Err(PlacesError::Status {
                status: response.status,
                message: response.error_message,
            }),
        }
    }
}
