use crate::error::{FilinglensError, Result};

#[derive(Clone, Debug)]
pub struct FilinglensConfig {
    pub user_agent: String,
    pub bind_addr: String,
    pub request_timeout_secs: u64,
}

impl FilinglensConfig {
    /// SEC requires a descriptive User-Agent with contact details, so the
    /// value must be supplied explicitly rather than defaulted.
    pub fn from_env() -> Result<Self> {
        let user_agent = std::env::var("FILINGLENS_USER_AGENT").map_err(|_| {
            FilinglensError::Configuration(
                "FILINGLENS_USER_AGENT environment variable not set (SEC requires \
                 an identifying user agent, e.g. 'name app (email@example.com)')"
                    .to_string(),
            )
        })?;

        let bind_addr = std::env::var("FILINGLENS_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8000".to_string());

        let request_timeout_secs = match std::env::var("FILINGLENS_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                FilinglensError::Configuration(format!(
                    "FILINGLENS_TIMEOUT_SECS must be an integer, got: {}",
                    raw
                ))
            })?,
            Err(_) => 30,
        };

        Ok(Self {
            user_agent,
            bind_addr,
            request_timeout_secs,
        })
    }
}
