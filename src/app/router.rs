use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{fee_rules, health, platform_fees};
use crate::models::fee_request::FeeRequest;
use crate::models::fee_rule::FeeRule;
use crate::services::PlatformFeeService;
use crate::store::EntityStore;

#[derive(Clone)]
pub struct AppState {
    pub platform_fees: Arc<PlatformFeeService>,
    pub fee_rules: Arc<dyn EntityStore<FeeRule>>,
    pub fee_requests: Arc<dyn EntityStore<FeeRequest>>,
    pub platform_user_id: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ping", get(health::ping))
        .route(
            "/platform-fees",
            post(platform_fees::charge_platform_fee).get(platform_fees::list_platform_fees),
        )
        .route(
            "/fee-rules",
            post(fee_rules::create_fee_rule).get(fee_rules::list_fee_rules),
        )
        .route("/fee-rules/:id", get(fee_rules::get_fee_rule))
        .with_state(state)
}
