use anyhow::anyhow;
use reqwest::Url;

use super::types::*;
use crate::error::FareError;

#[derive(Clone)]
pub struct Client {
    inner: reqwest::Client,
    predict: Url,
}

impl Client {
    pub fn new(base: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::new();
        let base: Url = base
            .parse()
            .map_err(|e| anyhow!("{} is not a valid url: {}", base, e))?;

        let predict = base
            .join("/predict")
            .map_err(|e| anyhow!("error joining url: {e}"))?;

        Ok(Self {
            inner: client,
            predict,
        })
    }

    /// A body that does not decode fails the same way a dropped connection does.
    pub async fn predict(&self, r: &TripQuoteRequest) -> Result<TripQuoteResponse, FareError> {
        let response = self
            .inner
            .post(self.predict.clone())
            .json(r)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        let value: serde_json::Value = serde_json::from_slice(&body)
            .inspect_err(|e| log::debug!("undecodable /predict body ({status}): {e}"))?;

        if value.is_null() {
            return Err(FareError::Backend {
                status: Some(status.as_u16()),
                message: None,
            });
        }

        let quote: TripQuoteResponse = serde_json::from_value(value)?;
        if status.is_success() && !quote.error {
            return Ok(quote);
        }

        Err(FareError::Backend {
            status: Some(status.as_u16()),
            message: quote.message,
        })
    }
}
