use std::time::Duration;

use log::*;
use ppg_common::{signature::SignatureScheme, Secret};

const LIVE_API_URL: &str = "https://www.payssion.com/api/v1";
const SANDBOX_API_URL: &str = "http://sandbox.payssion.com/api/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct PayssionConfig {
    pub api_key: String,
    pub api_secret: Secret<String>,
    /// Sandbox mode routes all calls to the provider's test host.
    pub sandbox: bool,
    /// Scheme used to produce the `api_sig` field on outbound requests.
    pub signature_scheme: SignatureScheme,
    /// Hard deadline on every provider call. Expiry is reported as a request failure.
    pub timeout: Duration,
}

impl Default for PayssionConfig {
    fn default() -> Self {
        Self {
            api_key: String::default(),
            api_secret: Secret::default(),
            sandbox: false,
            signature_scheme: SignatureScheme::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl PayssionConfig {
    pub fn new_from_env_or_default() -> Self {
        let api_key = std::env::var("PPG_API_KEY").unwrap_or_else(|_| {
            warn!("PPG_API_KEY not set. Provider calls will be rejected until it is configured.");
            String::default()
        });
        let api_secret = Secret::new(std::env::var("PPG_API_SECRET").unwrap_or_else(|_| {
            warn!("PPG_API_SECRET not set. Request signatures will not be accepted by the provider.");
            String::default()
        }));
        let sandbox = std::env::var("PPG_MODE").map(|s| s.eq_ignore_ascii_case("sandbox")).unwrap_or(false);
        let signature_scheme = std::env::var("PPG_SIGNATURE_SCHEME")
            .ok()
            .and_then(|s| {
                s.parse::<SignatureScheme>()
                    .map_err(|e| warn!("{e}. Using the default signature scheme instead."))
                    .ok()
            })
            .unwrap_or_default();
        let timeout = std::env::var("PPG_PROVIDER_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        Self { api_key, api_secret, sandbox, signature_scheme, timeout }
    }

    pub fn base_url(&self) -> &'static str {
        if self.sandbox {
            SANDBOX_API_URL
        } else {
            LIVE_API_URL
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sandbox_selects_test_host() {
        let mut config = PayssionConfig::default();
        assert_eq!(config.base_url(), "https://www.payssion.com/api/v1");
        config.sandbox = true;
        assert_eq!(config.base_url(), "http://sandbox.payssion.com/api/v1");
    }
}
