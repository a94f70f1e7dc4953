use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use platform_fee_api::app::router::{router, AppState};
use platform_fee_api::models::fee_request::FeeRequest;
use platform_fee_api::models::fee_rule::FeeRule;
use platform_fee_api::services::{
    DebitRequest, LedgerClient, LedgerError, Notifier, PlatformDirectory, PlatformFeeService,
    PlatformSettings,
};
use platform_fee_api::store::{Entity, EntityStore, InMemoryStore};

const PLATFORM_USER_ID: &str = "someHardCodedUserId";

struct StaticDirectory;

#[async_trait]
impl PlatformDirectory for StaticDirectory {
    async fn platform_config(&self, user_id: &str) -> PlatformSettings {
        PlatformSettings {
            id: user_id.to_string(),
            fee_charge_state_callback_url: "https://callback.test/fees".to_string(),
        }
    }
}

#[derive(Default)]
struct StubLedger {
    debits: Mutex<Vec<DebitRequest>>,
    fail_debit: bool,
}

#[async_trait]
impl LedgerClient for StubLedger {
    async fn debit_account(&self, debit: &DebitRequest) -> Result<(), LedgerError> {
        self.debits.lock().unwrap().push(debit.clone());
        if self.fail_debit {
            Err(LedgerError::Service("Debit account failed.".to_string()))
        } else {
            Ok(())
        }
    }

    async fn remove_pending_flag(&self, _transaction_id: &str) -> Result<(), LedgerError> {
        Ok(())
    }
}

struct SilentNotifier;

#[async_trait]
impl Notifier for SilentNotifier {
    async fn notify(&self, _url: &str, _snapshot: &Entity<FeeRequest>) {}
}

fn app_with(ledger: Arc<StubLedger>) -> (axum::Router, AppState) {
    let fee_rules: Arc<dyn EntityStore<FeeRule>> = Arc::new(InMemoryStore::new("rule_"));
    let fee_requests: Arc<dyn EntityStore<FeeRequest>> = Arc::new(InMemoryStore::new("fee_"));
    let platform_fees = Arc::new(PlatformFeeService::new(
        fee_rules.clone(),
        fee_requests.clone(),
        Arc::new(StaticDirectory),
        ledger,
        Arc::new(SilentNotifier),
    ));
    let state = AppState {
        platform_fees,
        fee_rules,
        fee_requests,
        platform_user_id: PLATFORM_USER_ID.to_string(),
    };
    (router(state.clone()), state)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn flat_rule_body() -> Value {
    json!({
        "name": "Default",
        "description": "Default Platform Fee",
        "route": { "unit": "flat", "amount": 1234.0, "currency": "IDR" }
    })
}

async fn create_rule(state: &AppState) -> String {
    let response = router(state.clone())
        .oneshot(post_json("/fee-rules", flat_rule_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_and_ping_respond() {
    let (app, _) = app_with(Arc::new(StubLedger::default()));
    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "UP");

    let response = app.oneshot(get("/ping")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["message"], "Pong!");
}

#[tokio::test]
async fn fee_rule_crud_round_trip() {
    let (_, state) = app_with(Arc::new(StubLedger::default()));
    let rule_id = create_rule(&state).await;
    assert!(rule_id.starts_with("rule_"));

    let response = router(state.clone())
        .oneshot(get(&format!("/fee-rules/{rule_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["name"], "Default");
    assert_eq!(body["route"]["unit"], "flat");

    let response = router(state.clone())
        .oneshot(get("/fee-rules/rule_missing"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = router(state.clone()).oneshot(get("/fee-rules")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_fee_rule_is_rejected() {
    let (app, _) = app_with(Arc::new(StubLedger::default()));
    let response = app
        .oneshot(post_json(
            "/fee-rules",
            json!({ "name": "Broken", "route": { "unit": "per_item", "amount": 1, "currency": "IDR" } }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["message"],
        "Fee rule is improperly formatted."
    );
}

#[tokio::test]
async fn charging_a_fee_end_to_end() {
    let ledger = Arc::new(StubLedger::default());
    let (_, state) = app_with(ledger.clone());
    let rule_id = create_rule(&state).await;

    let response = router(state.clone())
        .oneshot(post_json(
            "/platform-fees",
            json!({
                "ruleId": rule_id,
                "forUserId": "123",
                "paidAmount": 1000.0,
                "paidCurrency": "IDR",
                "invoiceId": "1234"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let debits = ledger.debits.lock().unwrap();
    assert_eq!(debits.len(), 1);
    assert_eq!(debits[0].amount, 1234.0);
    assert_eq!(debits[0].to_user_id, PLATFORM_USER_ID);
    drop(debits);

    let response = router(state.clone()).oneshot(get("/platform-fees")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let requests = body.as_array().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["state"], "SUCCESS");
    assert_eq!(requests[0]["calculatedFee"]["amount"], 1234.0);
    assert!(requests[0]["id"].as_str().unwrap().starts_with("fee_"));
}

#[tokio::test]
async fn malformed_charge_body_is_a_400() {
    let (app, _) = app_with(Arc::new(StubLedger::default()));
    let response = app
        .oneshot(post_json("/platform-fees", json!({ "ruleId": "rule_foo" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["message"],
        "Platform fee is improperly formatted."
    );
}

#[tokio::test]
async fn unknown_rule_is_a_400_and_nothing_is_recorded() {
    let (_, state) = app_with(Arc::new(StubLedger::default()));
    let response = router(state.clone())
        .oneshot(post_json(
            "/platform-fees",
            json!({
                "ruleId": "rule_missing",
                "forUserId": "123",
                "paidAmount": 1000.0,
                "paidCurrency": "IDR",
                "invoiceId": "1234"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = router(state.clone()).oneshot(get("/platform-fees")).await.unwrap();
    assert!(json_body(response).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn ledger_failure_surfaces_as_a_500_with_a_generic_body() {
    let ledger = Arc::new(StubLedger {
        fail_debit: true,
        ..Default::default()
    });
    let (_, state) = app_with(ledger);
    let rule_id = create_rule(&state).await;

    let response = router(state.clone())
        .oneshot(post_json(
            "/platform-fees",
            json!({
                "ruleId": rule_id,
                "forUserId": "123",
                "paidAmount": 1000.0,
                "paidCurrency": "IDR",
                "invoiceId": "1234"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await["message"],
        "An unexpected error has occurred."
    );

    // the attempt is still on record, reconciled to ERROR
    let response = router(state.clone()).oneshot(get("/platform-fees")).await.unwrap();
    let body = json_body(response).await;
    let requests = body.as_array().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["state"], "ERROR");
    assert_eq!(
        requests[0]["extraInfo"],
        "Fee charge failed. Reason: Debit account failed."
    );
}
