//! Credential loading for the API-backed downloaders.
//!
//! Tokens are read once at command startup and passed into the client that
//! needs them, so a missing credential surfaces as a typed error before any
//! network traffic.

use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("NOAA_API_TOKEN not found in .env file or environment")]
    MissingNoaaToken,
}

/// Loads variables from a `.env` file into the process environment, if one
/// exists. Absence of the file is not an error.
pub fn load_dotenv() {
    dotenv::dotenv().ok();
}

/// The NOAA CDO API token. Required by the `weather` command.
pub fn noaa_token() -> Result<String, ConfigError> {
    env::var("NOAA_API_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty())
        .ok_or(ConfigError::MissingNoaaToken)
}

/// The Census API key. Optional; requests without it are rate limited.
pub fn census_api_key() -> Option<String> {
    env::var("CENSUS_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty())
}

// -- Tests -------------------------------------------------------------------
