use std::{env, str::FromStr};

use log::*;
use payssion_api::is_supported_payment_method;
use ppg_common::{signature::SignatureScheme, Secret, SETTLEMENT_CURRENCY_CODE};
use thiserror::Error;

/// Fee the provider retains on settled payments, in basis points.
const DEFAULT_FEE_BPS: i64 = 300;

/// Configuration for the gateway core. This replaces the ambient per-request metadata the host passes around:
/// every component receives the configuration explicitly.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    pub api_secret: Secret<String>,
    pub mode: GatewayMode,
    /// The local payment method offered at checkout, e.g. "gcash_ph". Must be in the supported catalogue.
    pub pm_id: String,
    pub signature_scheme: SignatureScheme,
    /// Provider fee deducted from return-path amounts, in basis points.
    pub fee_bps: i64,
    /// All settlements happen in this single currency; the gateway has no multi-currency support.
    pub settlement_currency: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: String::default(),
            api_secret: Secret::default(),
            mode: GatewayMode::Live,
            pm_id: String::default(),
            signature_scheme: SignatureScheme::default(),
            fee_bps: DEFAULT_FEE_BPS,
            settlement_currency: SETTLEMENT_CURRENCY_CODE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayMode {
    Live,
    Sandbox,
}

#[derive(Debug, Clone, Error)]
#[error("Invalid gateway mode: {0}. Expected 'live' or 'sandbox'")]
pub struct GatewayModeError(String);

impl FromStr for GatewayMode {
    type Err = GatewayModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "sandbox" => Ok(Self::Sandbox),
            other => Err(GatewayModeError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("The API key must not be empty")]
    EmptyApiKey,
    #[error("The API secret must not be empty")]
    EmptyApiSecret,
    #[error("{0} is not a supported payment method")]
    UnsupportedPaymentMethod(String),
}

impl GatewayConfig {
    pub fn from_env_or_default() -> Self {
        let api_key = env::var("PPG_API_KEY").unwrap_or_else(|_| {
            error!("🪛️ PPG_API_KEY is not set. Notification signatures cannot be verified without it.");
            String::default()
        });
        let api_secret = Secret::new(env::var("PPG_API_SECRET").unwrap_or_else(|_| {
            error!("🪛️ PPG_API_SECRET is not set. Notification signatures cannot be verified without it.");
            String::default()
        }));
        let mode = env::var("PPG_MODE")
            .ok()
            .and_then(|s| s.parse::<GatewayMode>().map_err(|e| warn!("🪛️ {e}. Using live mode.")).ok())
            .unwrap_or(GatewayMode::Live);
        let pm_id = env::var("PPG_PAYMENT_METHOD").unwrap_or_else(|_| {
            warn!("🪛️ PPG_PAYMENT_METHOD is not set. Payment creation requests will be rejected by the provider.");
            String::default()
        });
        let signature_scheme = env::var("PPG_SIGNATURE_SCHEME")
            .ok()
            .and_then(|s| {
                s.parse::<SignatureScheme>().map_err(|e| warn!("🪛️ {e}. Using the default scheme.")).ok()
            })
            .unwrap_or_default();
        let fee_bps = env::var("PPG_FEE_BPS").ok().and_then(|s| s.parse::<i64>().ok()).unwrap_or(DEFAULT_FEE_BPS);
        Self {
            api_key,
            api_secret,
            mode,
            pm_id,
            signature_scheme,
            fee_bps,
            settlement_currency: SETTLEMENT_CURRENCY_CODE.to_string(),
        }
    }

    /// Validates the settings the way the host does before persisting them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        if self.api_secret.reveal().is_empty() {
            return Err(ConfigError::EmptyApiSecret);
        }
        if !is_supported_payment_method(&self.pm_id) {
            return Err(ConfigError::UnsupportedPaymentMethod(self.pm_id.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn valid_config() -> GatewayConfig {
        GatewayConfig {
            api_key: "key".to_string(),
            api_secret: Secret::new("secret".to_string()),
            pm_id: "gcash_ph".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn validation_accepts_a_complete_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validation_rejects_missing_credentials() {
        let config = GatewayConfig { api_key: String::new(), ..valid_config() };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyApiKey)));
        let config = GatewayConfig { api_secret: Secret::default(), ..valid_config() };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyApiSecret)));
    }

    #[test]
    fn validation_rejects_unknown_payment_methods() {
        let config = GatewayConfig { pm_id: "carrier_pigeon".to_string(), ..valid_config() };
        assert!(matches!(config.validate(), Err(ConfigError::UnsupportedPaymentMethod(_))));
    }

    #[test]
    fn mode_parsing() {
        assert_eq!("sandbox".parse::<GatewayMode>().unwrap(), GatewayMode::Sandbox);
        assert_eq!("Live".parse::<GatewayMode>().unwrap(), GatewayMode::Live);
        assert!("test".parse::<GatewayMode>().is_err());
    }
}
