use std::env::var;

use dotenvy::dotenv;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Host-provided settings: where the message API lives, the key to present,
/// and the engine's timing knobs.
pub struct Config {
    pub create_endpoint: String,
    pub messages_endpoint: String,
    pub api_key: String,
    pub request_timeout_secs: u64,
    pub poll_interval_secs: u64,
}

impl Config {
    pub fn try_parse() -> Result<Config, &'static str> {
        let _ = dotenv();

        Ok(Config {
            create_endpoint: var("DX_API_CREATE_ENDPOINT")
                .map_err(|_| "An error occured while getting DX_API_CREATE_ENDPOINT env param")?,
            messages_endpoint: var("DX_API_MESSAGES_ENDPOINT")
                .map_err(|_| "An error occured while getting DX_API_MESSAGES_ENDPOINT env param")?,
            api_key: var("DX_API_KEY")
                .map_err(|_| "An error occured while getting DX_API_KEY env param")?,
            request_timeout_secs: parse_or_default(
                "DX_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            poll_interval_secs: parse_or_default(
                "DX_POLL_INTERVAL_SECS",
                DEFAULT_POLL_INTERVAL_SECS,
            )?,
        })
    }
}

fn parse_or_default(name: &str, default: u64) -> Result<u64, &'static str> {
    match var(name) {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|_| "An error occured while parsing a numeric env param"),
        Err(_) => Ok(default),
    }
}
