pub mod fee_request;
pub mod fee_rule;
