use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::app::config::Config;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebitRequest {
    pub from_user_id: String,
    pub to_user_id: String,
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Error)]
pub enum LedgerError {
    /// The transaction system failed the call in a recognized way. The
    /// message is safe to store and forward.
    #[error("{0}")]
    Service(String),
    /// Anything else; the detail never reaches stored records.
    #[error("{0}")]
    Other(String),
}

/// Remote money movement against the transaction system. Each call is a
/// single attempt with a bounded timeout; a timeout is just a failed call.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn debit_account(&self, debit: &DebitRequest) -> Result<(), LedgerError>;
    async fn remove_pending_flag(&self, transaction_id: &str) -> Result<(), LedgerError>;
}

pub struct TransactionClient {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReleaseLockRequest<'a> {
    transaction_id: &'a str,
}

impl TransactionClient {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.transaction_service_url.clone(),
        }
    }

    async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        failure_message: &str,
    ) -> Result<(), LedgerError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            error!("Transaction service call to {} failed: {}", url, e);
            LedgerError::Service(failure_message.to_string())
        })?;

        if response.status().is_success() {
            Ok(())
        } else {
            error!(
                "Transaction service call to {} returned HTTP {}",
                url,
                response.status()
            );
            Err(LedgerError::Service(failure_message.to_string()))
        }
    }
}

#[async_trait]
impl LedgerClient for TransactionClient {
    async fn debit_account(&self, debit: &DebitRequest) -> Result<(), LedgerError> {
        self.post("/debit", debit, "Debit account failed.").await
    }

    async fn remove_pending_flag(&self, transaction_id: &str) -> Result<(), LedgerError> {
        self.post(
            "/releaselock",
            &ReleaseLockRequest { transaction_id },
            "Remove pending flag from transaction failed.",
        )
        .await
    }
}
