use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use platform_fee_api::app::config::Config;
use platform_fee_api::app::router::{router, AppState};
use platform_fee_api::models::fee_request::FeeRequest;
use platform_fee_api::models::fee_rule::FeeRule;
use platform_fee_api::services::{
    CallbackNotifier, ConfigPlatformDirectory, PlatformFeeService, TransactionClient,
};
use platform_fee_api::store::{EntityStore, InMemoryStore};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    info!(
        "Starting platform fee API server on port {}",
        config.server_port
    );

    let fee_rules: Arc<dyn EntityStore<FeeRule>> = Arc::new(InMemoryStore::new("rule_"));
    let fee_requests: Arc<dyn EntityStore<FeeRequest>> = Arc::new(InMemoryStore::new("fee_"));

    let platform_fees = Arc::new(PlatformFeeService::new(
        fee_rules.clone(),
        fee_requests.clone(),
        Arc::new(ConfigPlatformDirectory::new(&config)),
        Arc::new(TransactionClient::new(&config)),
        Arc::new(CallbackNotifier::new(&config)),
    ));

    let app = router(AppState {
        platform_fees,
        fee_rules,
        fee_requests,
        platform_user_id: config.platform_user_id.clone(),
    });

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = TcpListener::bind(&addr).await.unwrap();
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await.unwrap();
}
