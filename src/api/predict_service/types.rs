use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentType {
    #[default]
    #[serde(rename = "Credit Card")]
    Card,
    #[serde(rename = "Cash")]
    Cash,
}

#[derive(Error, Debug)]
#[error("unknown payment type '{0}', expected 'card' or 'cash'")]
pub struct UnknownPaymentType(pub String);

impl FromStr for PaymentType {
    type Err = UnknownPaymentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" | "credit" | "credit card" => Ok(PaymentType::Card),
            "cash" => Ok(PaymentType::Cash),
            _ => Err(UnknownPaymentType(s.to_string())),
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentType::Card => f.write_str("card"),
            PaymentType::Cash => f.write_str("cash"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripQuoteRequest {
    pub pickup_address: String,
    pub dropoff_address: String,
    pub payment_type: PaymentType,
}

/// Numbers are decoded leniently: JSON numbers and numeric strings are kept,
/// anything else (null, missing, garbage, NaN) becomes `None` so the
/// presenter can degrade it to its "not available" marker.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TripQuoteResponse {
    #[serde(default, deserialize_with = "lenient_number")]
    pub base_fare: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub extra: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub congestion: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub tolls: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub mta: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub improvement: Option<f64>,
    #[serde(default, deserialize_with = "lenient_details")]
    pub details: Option<TripDetails>,
    #[serde(default, deserialize_with = "truthy")]
    pub error: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TripDetails {
    #[serde(default, deserialize_with = "lenient_number")]
    pub distance_miles: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub duration_minutes: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pickup_dayofweek: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pickup_hour: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pickup_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rate_code: Option<String>,
}

pub(crate) fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

// The backend puts an exception string under `details` on 500s; anything that
// is not an object counts as missing.
fn lenient_details<'de, D>(deserializer: D) -> Result<Option<TripDetails>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(v @ Value::Object(_)) => serde_json::from_value(v).ok(),
        _ => None,
    })
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    })
}
