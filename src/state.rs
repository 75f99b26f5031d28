// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::provider::ProviderClient;
use crate::services::relay::ChatRelay;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub relay: ChatRelay,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let provider = ProviderClient::new(config.api_url.clone(), config.upstream_timeout)?;
        Ok(Self {
            relay: ChatRelay::new(config.api_key.clone(), provider),
        })
    }
}
