use thiserror::Error;

use crate::api::LatLng;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PolylineError {
    #[error("invalid polyline character at byte {0}")]
    InvalidChar(usize),

    #[error("polyline ends in the middle of a value")]
    Truncated,
}

pub fn decode(encoded: &str) -> Result<Vec<LatLng>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut pos = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::new();

    while pos < bytes.len() {
        lat += next_value(bytes, &mut pos)?;
        lng += next_value(bytes, &mut pos)?;
        points.push(LatLng::new(lat as f64 / 1e5, lng as f64 / 1e5));
    }

    Ok(points)
}

fn next_value(bytes: &[u8], pos: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let Some(&byte) = bytes.get(*pos) else {
            return Err(PolylineError::Truncated);
        };
        if !(63..127).contains(&byte) || shift > 60 {
            return Err(PolylineError::InvalidChar(*pos));
        }
        *pos += 1;

        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 == 1 { !(result >> 1) } else { result >> 1 })
}
