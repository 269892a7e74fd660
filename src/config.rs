use std::env::VarError;
use std::path::PathBuf;

use anyhow::anyhow;

pub const REQUIRED_VARIABLES: &[&str] = &["FARE_API_URL", "GOOGLE_MAPS_API_KEY"];

pub const DEFAULT_MAPS_API_URL: &str = "https://maps.googleapis.com";

pub struct Config {
    pub fare_api_url: String,
    pub maps_api_url: String,
    pub maps_api_key: String,
    pub export_dir: PathBuf,
}

impl Config {
    pub fn env() -> anyhow::Result<Self> {
        let fare_api_url = env("FARE_API_URL")?;
        let maps_api_key = env("GOOGLE_MAPS_API_KEY")?;
        let maps_api_url = optional_env("MAPS_API_URL")?
            .unwrap_or_else(|| DEFAULT_MAPS_API_URL.to_string());
        let export_dir = optional_env("EXPORT_DIR")?
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            fare_api_url,
            maps_api_url,
            maps_api_key,
            export_dir,
        })
    }

    pub fn log(&self) {
        log::info!("FARE_API_URL={}", self.fare_api_url);
        log::info!("MAPS_API_URL={}", self.maps_api_url);
        log::info!("GOOGLE_MAPS_API_KEY={}", mask(&self.maps_api_key));
        log::info!("EXPORT_DIR={}", self.export_dir.display());
    }
}

fn env(name: &str) -> anyhow::Result<String> {
    std::env::var(name).map_err(|e| match e {
        VarError::NotPresent => anyhow!("{name} not set"),
        VarError::NotUnicode(_) => anyhow!("{name} value is not valid unicode"),
    })
}

fn optional_env(name: &str) -> anyhow::Result<Option<String>> {
    match std::env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(anyhow!("{name} value is not valid unicode")),
    }
}

fn mask(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }

    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{tail}", "*".repeat(count - 4))
}
