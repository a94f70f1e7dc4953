use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::models::fee_request::{CalculatedFee, FeeChargeInput, FeeRequest, FeeRequestState};
use crate::models::fee_rule::{FeeRule, FeeRuleRoute, FeeUnit};
use crate::services::notifier::Notifier;
use crate::services::platform_directory::PlatformDirectory;
use crate::services::transaction_client::{DebitRequest, LedgerClient, LedgerError};
use crate::store::{EntityStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Internal(String),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        // the saga only ever updates an id it just created, so a missing
        // record here is an invariant violation, not a caller mistake
        ServiceError::Internal(e.to_string())
    }
}

/// Amount owed for one charge under a given rule. Percent fees always round
/// up so the platform never short-charges itself.
pub fn amount_to_charge(paid_amount: f64, route: &FeeRuleRoute) -> f64 {
    match route.unit {
        FeeUnit::Flat => route.amount,
        FeeUnit::Percent => (paid_amount * route.amount / 100.0).ceil(),
    }
}

/// Orchestrates one platform fee charge end to end: resolve the rule,
/// record the attempt, move the money, reconcile the record, and report
/// every state change to the platform's callback.
///
/// All collaborators arrive through the constructor, so tests substitute any
/// of them without global state.
pub struct PlatformFeeService {
    fee_rules: Arc<dyn EntityStore<FeeRule>>,
    fee_requests: Arc<dyn EntityStore<FeeRequest>>,
    directory: Arc<dyn PlatformDirectory>,
    ledger: Arc<dyn LedgerClient>,
    notifier: Arc<dyn Notifier>,
}

impl PlatformFeeService {
    pub fn new(
        fee_rules: Arc<dyn EntityStore<FeeRule>>,
        fee_requests: Arc<dyn EntityStore<FeeRequest>>,
        directory: Arc<dyn PlatformDirectory>,
        ledger: Arc<dyn LedgerClient>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            fee_rules,
            fee_requests,
            directory,
            ledger,
            notifier,
        }
    }

    /// Charges `input.paid_amount`'s fee from `input.for_user_id` to the
    /// platform user. The fee request record is created in PENDING state
    /// before any money moves, so an accepted attempt is always visible even
    /// if the remote calls never come back. On a ledger failure the record is
    /// reconciled to ERROR, the callback is notified, and the original error
    /// is re-raised.
    pub async fn charge_platform_fee(
        &self,
        input: FeeChargeInput,
        platform_user_id: &str,
    ) -> Result<(), ServiceError> {
        let (rule, settings) = tokio::join!(
            self.fee_rules.read(&input.rule_id),
            self.directory.platform_config(platform_user_id),
        );
        let rule = rule.ok_or_else(|| {
            ServiceError::Validation(format!(
                "Cannot find fee rule with ruleId {}",
                input.rule_id
            ))
        })?;
        if rule.data.route.currency != input.paid_currency {
            return Err(ServiceError::Validation(format!(
                "Cannot use fee rule {} to charge platform fee due to currency mismatch. \
                 Fee rule currency: {} | Payment currency: {}",
                rule.id, rule.data.route.currency, input.paid_currency
            )));
        }

        let calculated_fee = CalculatedFee {
            amount: amount_to_charge(input.paid_amount, &rule.data.route),
            currency: rule.data.route.currency.clone(),
        };
        let debit = DebitRequest {
            from_user_id: input.for_user_id.clone(),
            to_user_id: platform_user_id.to_string(),
            amount: calculated_fee.amount,
            currency: calculated_fee.currency.clone(),
        };
        let blocked_transaction_id = input.blocked_transaction_id.clone();

        // durability checkpoint: from here on the attempt is on record no
        // matter what the remote calls do
        let fee_request = self
            .fee_requests
            .create(FeeRequest {
                charge: input,
                state: FeeRequestState::Pending,
                extra_info: None,
                calculated_fee,
            })
            .await;
        let callback_url = &settings.fee_charge_state_callback_url;
        self.notifier.notify(callback_url, &fee_request).await;

        match self
            .run_ledger_steps(&debit, blocked_transaction_id.as_deref())
            .await
        {
            Ok(()) => {
                let mut data = fee_request.data;
                data.state = FeeRequestState::Success;
                let updated = self.fee_requests.update(&fee_request.id, data).await?;
                self.notifier.notify(callback_url, &updated).await;
                info!("Platform fee {} charged successfully", fee_request.id);
                Ok(())
            }
            Err(e) => {
                error!("Platform fee {} charge failed: {}", fee_request.id, e);
                let mut data = fee_request.data;
                data.state = FeeRequestState::Error;
                data.extra_info = Some(match &e {
                    LedgerError::Service(message) => {
                        format!("Fee charge failed. Reason: {message}")
                    }
                    LedgerError::Other(_) => {
                        "Fee charge failed. Unknown exception occurred - please get in touch \
                         with support."
                            .to_string()
                    }
                });
                let updated = self.fee_requests.update(&fee_request.id, data).await?;
                self.notifier.notify(callback_url, &updated).await;
                Err(ServiceError::Ledger(e))
            }
        }
    }

    async fn run_ledger_steps(
        &self,
        debit: &DebitRequest,
        blocked_transaction_id: Option<&str>,
    ) -> Result<(), LedgerError> {
        self.ledger.debit_account(debit).await?;
        // a hold is only released once the debit actually went through; a
        // failed debit must leave the hold in place
        if let Some(transaction_id) = blocked_transaction_id {
            self.ledger.remove_pending_flag(transaction_id).await?;
        }
        Ok(())
    }
}
