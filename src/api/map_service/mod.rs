pub mod client;
pub mod polyline;
pub mod types;

pub use client::Client;
pub use types::*;
