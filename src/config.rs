use std::time::Duration;

/// Tuning for the backend client and the entity stores.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the GRC backend, no trailing slash.
    pub base_url: String,
    /// Default rows per table page.
    pub per_page: usize,
    /// Initial-load retry attempts before surfacing a terminal error.
    pub retry_attempts: u32,
    /// Backoff base; attempt N waits base × N.
    pub retry_base: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: "http://127.0.0.1:3000/api".to_string(),
            per_page: 10,
            retry_attempts: 3,
            retry_base: Duration::from_secs(2),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Load from environment, falling back to defaults per knob.
    /// Reads .env first so local overrides work without exported vars.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = ClientConfig::default();

        let base_url = std::env::var("RISKBOARD_API_URL")
            .unwrap_or(defaults.base_url)
            .trim_end_matches('/')
            .to_string();

        let per_page = env_number("RISKBOARD_PER_PAGE", defaults.per_page as u64)
            .clamp(1, 100) as usize;
        let retry_attempts = env_number("RISKBOARD_RETRY_ATTEMPTS", defaults.retry_attempts as u64) as u32;
        let retry_base = Duration::from_millis(env_number(
            "RISKBOARD_RETRY_BASE_MS",
            defaults.retry_base.as_millis() as u64,
        ));
        let request_timeout = Duration::from_millis(env_number(
            "RISKBOARD_TIMEOUT_MS",
            defaults.request_timeout.as_millis() as u64,
        ));

        ClientConfig { base_url, per_page, retry_attempts, retry_base, request_timeout }
    }
}

fn env_number(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(val) => match val.parse::<u64>() {
            Ok(n) => n,
            Err(_) => {
                log::warn!("{key}={val} is not a number, using {default}");
                default
            }
        },
        Err(_) => default,
    }
}
