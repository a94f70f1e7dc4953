use serde::{Deserialize, Serialize};

/// Caller-supplied payload for one charge attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeChargeInput {
    pub rule_id: String,
    pub for_user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_transaction_id: Option<String>,
    pub paid_amount: f64,
    pub paid_currency: String,
    pub invoice_id: String,
}

/// Lifecycle of a fee request. Forward only: PENDING is initial, SUCCESS and
/// ERROR are terminal and a terminal record is never touched again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeRequestState {
    Pending,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedFee {
    pub amount: f64,
    pub currency: String,
}

/// The persisted record of one charge attempt. The charge payload and the
/// calculated fee are fixed at creation; only `state` and `extra_info` change
/// on the single transition to a terminal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRequest {
    #[serde(flatten)]
    pub charge: FeeChargeInput,
    pub state: FeeRequestState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_info: Option<String>,
    pub calculated_fee: CalculatedFee,
}
