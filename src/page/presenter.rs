use crate::api::predict_service::{TripDetails, TripQuoteResponse};

pub const NOT_AVAILABLE: &str = "N/A";

const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultsView {
    pub fare_amount: String,
    pub total_amount: String,
    pub base_fare: String,
    pub extra: String,
    pub congestion: String,
    pub mta_tax: String,
    pub improvement: String,
    pub tolls: String,
    pub distance: String,
    pub duration: String,
    pub pickup_day: String,
    pub pickup_hour: String,
    pub pickup_date: String,
    pub rate_code: String,
}

impl ResultsView {
    pub fn blank() -> Self {
        Self::default()
    }
}

pub fn render(quote: &TripQuoteResponse) -> ResultsView {
    let details = quote.details.clone().unwrap_or_default();

    ResultsView {
        fare_amount: format_currency(quote.base_fare),
        total_amount: format_currency(quote.total_amount),
        base_fare: format_currency(quote.base_fare),
        extra: format_currency(quote.extra),
        congestion: format_currency(quote.congestion),
        mta_tax: format_currency(quote.mta),
        improvement: format_currency(quote.improvement),
        tolls: format_currency(quote.tolls),
        ..render_details(&details)
    }
}

fn render_details(details: &TripDetails) -> ResultsView {
    ResultsView {
        distance: format_distance(details.distance_miles),
        duration: format_duration(details.duration_minutes),
        pickup_day: format_day(details.pickup_dayofweek),
        pickup_hour: format_hour(details.pickup_hour),
        pickup_date: format_text(details.pickup_date.as_deref()),
        rate_code: format_text(details.rate_code.as_deref()),
        ..ResultsView::default()
    }
}

/// Absent or non-finite amounts print as `$0.00`.
pub fn format_currency(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return "$0.00".to_string();
    };

    let (int, frac) = round_cents(value.abs());
    let sign = if value < 0.0 { "-" } else { "" };

    format!("{sign}${}.{frac}", group_thousands(&int))
}

// Rounds the shortest decimal form of `amount`, half away from zero, so 1.005
// becomes 1.01 even though the nearest double is just below it.
fn round_cents(amount: f64) -> (String, String) {
    let repr = amount.to_string();
    let (int, frac) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<char> = int
        .chars()
        .chain(frac.chars().chain(std::iter::repeat('0')).take(2))
        .collect();

    if frac.chars().nth(2).is_some_and(|d| d >= '5') {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == '9' {
                *d = '0';
            } else {
                *d = char::from(*d as u8 + 1);
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, '1');
        }
    }

    let cents = digits.split_off(digits.len() - 2);
    (digits.into_iter().collect(), cents.into_iter().collect())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn format_distance(miles: Option<f64>) -> String {
    match miles.filter(|m| m.is_finite()) {
        Some(miles) => format!("{miles:.2} miles"),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_duration(minutes: Option<f64>) -> String {
    match minutes.filter(|m| m.is_finite()) {
        // half-up, like Math.round
        Some(minutes) => format!("{} mins", (minutes + 0.5).floor() as i64),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// 0 is Monday, 6 is Sunday.
pub fn format_day(day: Option<f64>) -> String {
    whole(day)
        .and_then(|d| usize::try_from(d).ok())
        .and_then(|d| DAYS.get(d))
        .map(|d| d.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn format_hour(hour: Option<f64>) -> String {
    match whole(hour) {
        Some(0) => "12 AM".to_string(),
        Some(12) => "12 PM".to_string(),
        Some(h @ 1..=11) => format!("{h} AM"),
        Some(h @ 13..=23) => format!("{} PM", h - 12),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn format_text(text: Option<&str>) -> String {
    text.filter(|t| !t.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

fn whole(value: Option<f64>) -> Option<i64> {
    value
        .filter(|v| v.is_finite() && v.fract() == 0.0)
        .map(|v| v as i64)
}
