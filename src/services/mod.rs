pub mod notifier;
pub mod platform_directory;
pub mod platform_fee_service;
pub mod transaction_client;

pub use notifier::{CallbackNotifier, Notifier};
pub use platform_directory::{ConfigPlatformDirectory, PlatformDirectory, PlatformSettings};
pub use platform_fee_service::{PlatformFeeService, ServiceError};
pub use transaction_client::{DebitRequest, LedgerClient, LedgerError, TransactionClient};
