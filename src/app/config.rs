use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub transaction_service_url: String,
    pub platform_service_url: String,
    pub platform_user_id: String,
    pub request_timeout_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            transaction_service_url: env::var("TRANSACTION_SERVICE_URL")
                .unwrap_or_else(|_| "http://transaction-service:8080".to_string()),
            platform_service_url: env::var("PLATFORM_SERVICE_URL")
                .unwrap_or_else(|_| "http://platform-service:8080".to_string()),
            platform_user_id: env::var("PLATFORM_USER_ID")
                .unwrap_or_else(|_| "platform_root".to_string()),
            request_timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
        }
    }
}
