use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::Value;
use tracing::error;

use crate::app::router::AppState;
use crate::models::fee_rule::FeeRule;
use crate::services::ServiceError;
use crate::store::{Entity, EntityStore};

use super::error_response;

pub async fn create_fee_rule(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Entity<FeeRule>>, (StatusCode, Json<Value>)> {
    let rule: FeeRule = match serde_json::from_value(payload) {
        Ok(rule) => rule,
        Err(e) => {
            error!("Invalid fee rule: {}", e);
            return Err(error_response(&ServiceError::Validation(
                "Fee rule is improperly formatted.".to_string(),
            )));
        }
    };
    Ok(Json(state.fee_rules.create(rule).await))
}

pub async fn get_fee_rule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Entity<FeeRule>>, (StatusCode, Json<Value>)> {
    match state.fee_rules.read(&id).await {
        Some(rule) => Ok(Json(rule)),
        None => Err(error_response(&ServiceError::NotFound(format!(
            "Cannot find fee rule with ID {id}."
        )))),
    }
}

pub async fn list_fee_rules(State(state): State<AppState>) -> Json<Vec<Entity<FeeRule>>> {
    Json(state.fee_rules.scan().await)
}
