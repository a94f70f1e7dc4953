use async_trait::async_trait;

use crate::app::config::Config;

#[derive(Debug, Clone)]
pub struct PlatformSettings {
    pub id: String,
    pub fee_charge_state_callback_url: String,
}

/// Resolves a platform user's configuration, notably where fee state changes
/// should be reported. Read-only; assumed to succeed for a valid user.
#[async_trait]
pub trait PlatformDirectory: Send + Sync {
    async fn platform_config(&self, user_id: &str) -> PlatformSettings;
}

/// Directory backed by static configuration. Platform settings are not
/// persisted per user yet; every platform reports to the shared callback
/// endpoint of the platform service.
pub struct ConfigPlatformDirectory {
    platform_service_url: String,
}

impl ConfigPlatformDirectory {
    pub fn new(config: &Config) -> Self {
        Self {
            platform_service_url: config.platform_service_url.clone(),
        }
    }
}

#[async_trait]
impl PlatformDirectory for ConfigPlatformDirectory {
    async fn platform_config(&self, user_id: &str) -> PlatformSettings {
        PlatformSettings {
            id: user_id.to_string(),
            fee_charge_state_callback_url: format!("{}/callback", self.platform_service_url),
        }
    }
}
