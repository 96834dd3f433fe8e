//! Shared, cloneable state handed to every request handler.

use std::sync::Arc;

use reqwest::Client;

use crate::config::LocatorConfig;

#[derive(Clone)]
pub struct LocatorState(Arc<Inner>);

struct Inner {
    config: LocatorConfig,
    client: Client,
}

impl LocatorState {
    pub fn new(config: LocatorConfig) -> Self {
        let client = Client::builder()
            .build()
            .expect("reqwest client with default TLS config always builds");
        Self(Arc::new(Inner { config, client }))
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.0.config
    }

    pub fn client(&self) -> &Client {
        &self.0.client
    }
}
