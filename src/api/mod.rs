pub mod map_service;
pub mod predict_service;
pub mod types;

pub use types::LatLng;
