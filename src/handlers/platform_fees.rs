use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::Value;
use tracing::{error, info};

use crate::app::router::AppState;
use crate::models::fee_request::{FeeChargeInput, FeeRequest};
use crate::services::ServiceError;
use crate::store::{Entity, EntityStore};

use super::error_response;

pub async fn charge_platform_fee(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let input: FeeChargeInput = match serde_json::from_value(payload) {
        Ok(input) => input,
        Err(e) => {
            error!("Invalid platform fee request: {}", e);
            return Err(error_response(&ServiceError::Validation(
                "Platform fee is improperly formatted.".to_string(),
            )));
        }
    };

    info!(
        "Received platform fee charge for invoice {}",
        input.invoice_id
    );

    match state
        .platform_fees
        .charge_platform_fee(input, &state.platform_user_id)
        .await
    {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(error_response(&e)),
    }
}

pub async fn list_platform_fees(State(state): State<AppState>) -> Json<Vec<Entity<FeeRequest>>> {
    Json(state.fee_requests.scan().await)
}
