use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, warn};

use crate::app::config::Config;
use crate::models::fee_request::FeeRequest;
use crate::store::Entity;

/// Best-effort push of the current fee request snapshot to a callback URL.
/// Cannot fail from the caller's point of view: the call is awaited so two
/// notifications for the same request stay ordered, but the outcome never
/// reaches the caller.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, url: &str, snapshot: &Entity<FeeRequest>);
}

pub struct CallbackNotifier {
    client: Client,
}

impl CallbackNotifier {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

#[async_trait]
impl Notifier for CallbackNotifier {
    async fn notify(&self, url: &str, snapshot: &Entity<FeeRequest>) {
        match self.client.post(url).json(snapshot).send().await {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => {
                warn!(
                    "Fee state callback to {} returned HTTP {}",
                    url,
                    response.status()
                );
            }
            Err(e) => {
                error!("Failed to deliver fee state callback to {}: {}", url, e);
            }
        }
    }
}
