use serde::{Deserialize, Serialize};

/// How a fee rule's amount is interpreted. A closed set: rules with any
/// other unit are rejected at deserialization, so a corrupt unit can never
/// reach the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeUnit {
    Flat,
    Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeRuleRoute {
    pub unit: FeeUnit,
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeRule {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub route: FeeRuleRoute,
}
