use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub quiet: bool,
}

/// OCR service credentials, read from a JSON file and handed to the client
/// constructor. Nothing is read from the process environment.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub api_key: String,
}

pub fn load_credentials(path: &Path) -> Result<Credentials, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let credentials: Credentials = serde_json::from_str(&raw)?;
    if credentials.api_key.trim().is_empty() {
        return Err(AppError::General(format!(
            "credentials file has an empty api_key: {}",
            path.display()
        )));
    }
    Ok(credentials)
}

pub fn default_credentials_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "cardlot")
        .map(|dirs| dirs.config_dir().join("credentials.json"))
}
