//! Storefront tuning configuration.

use std::path::Path;
use std::time::Duration;

use kyshop_commerce::Currency;
use serde::{Deserialize, Serialize};

use crate::carousel::CarouselTiming;
use crate::scroll::ScrollSettings;
use crate::UiError;

/// Environment variable overriding `identity.url`.
pub const IDENTITY_URL_ENV: &str = "KYSHOP_IDENTITY_URL";
/// Environment variable overriding `identity.anon_key`.
pub const IDENTITY_KEY_ENV: &str = "KYSHOP_IDENTITY_KEY";

/// Storefront configuration file (`kyshop.toml` or `kyshop.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Hero carousel timing.
    #[serde(default)]
    pub carousel: CarouselConfig,

    /// Category strip scrolling.
    #[serde(default)]
    pub scroll: ScrollConfig,

    /// Purchase processing.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Identity service endpoint.
    #[serde(default)]
    pub identity: IdentityConfig,
}

impl StorefrontConfig {
    /// Load config from a file. JSON by `.json` extension, TOML otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, UiError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            UiError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::parse(&content, is_json(path))
    }

    /// Parse config text.
    pub fn parse(content: &str, json: bool) -> Result<Self, UiError> {
        let config: Self = if json {
            serde_json::from_str(content)?
        } else {
            toml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), UiError> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content).map_err(|e| {
            UiError::Config(format!("Failed to write config file {}: {e}", path.display()))
        })
    }

    /// Reject values the state machines cannot run with.
    pub fn validate(&self) -> Result<(), UiError> {
        if self.carousel.interval_ms == 0 {
            return Err(UiError::Config("carousel.interval_ms must be positive".into()));
        }
        if !(self.scroll.step > 0.0) {
            return Err(UiError::Config("scroll.step must be positive".into()));
        }
        if !(self.scroll.tolerance >= 0.0) {
            return Err(UiError::Config("scroll.tolerance must not be negative".into()));
        }
        if Currency::from_code(&self.checkout.currency).is_none() {
            return Err(UiError::Config(format!(
                "Unknown currency: {}",
                self.checkout.currency
            )));
        }
        Ok(())
    }

    /// Apply `KYSHOP_IDENTITY_URL` / `KYSHOP_IDENTITY_KEY`.
    pub fn with_env_overrides(mut self) -> Self {
        self.identity = self.identity.with_env_overrides();
        self
    }

    pub fn carousel_timing(&self) -> CarouselTiming {
        CarouselTiming {
            interval: Duration::from_millis(self.carousel.interval_ms),
            resume_after: Duration::from_millis(self.carousel.resume_after_ms),
        }
    }

    pub fn scroll_settings(&self) -> ScrollSettings {
        ScrollSettings {
            tolerance: self.scroll.tolerance,
            step: self.scroll.step,
            smooth: Duration::from_millis(self.scroll.smooth_ms),
        }
    }

    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.checkout.processing_delay_ms)
    }

    /// Checkout currency. Falls back to PHP for an unknown code.
    pub fn currency(&self) -> Currency {
        Currency::from_code(&self.checkout.currency).unwrap_or_default()
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Hero carousel timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Time between automatic advances.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Cooldown after a manual navigation before auto-play resumes.
    #[serde(default = "default_resume_after_ms")]
    pub resume_after_ms: u64,
}

fn default_interval_ms() -> u64 {
    5_000
}

fn default_resume_after_ms() -> u64 {
    5_000
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            resume_after_ms: default_resume_after_ms(),
        }
    }
}

/// Category strip scrolling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Right arrow hides this close to the end.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Distance moved per arrow click.
    #[serde(default = "default_step")]
    pub step: f64,

    /// Smooth scroll duration.
    #[serde(default = "default_smooth_ms")]
    pub smooth_ms: u64,
}

fn default_tolerance() -> f64 {
    10.0
}

fn default_step() -> f64 {
    300.0
}

fn default_smooth_ms() -> u64 {
    300
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            step: default_step(),
            smooth_ms: default_smooth_ms(),
        }
    }
}

/// Purchase processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Delay of the simulated payment gateway.
    #[serde(default = "default_processing_delay_ms")]
    pub processing_delay_ms: u64,

    /// ISO currency code for display.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_processing_delay_ms() -> u64 {
    2_000
}

fn default_currency() -> String {
    Currency::default().code().to_string()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: default_processing_delay_ms(),
            currency: default_currency(),
        }
    }
}

/// Identity service endpoint. Both values are empty when unconfigured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Service URL.
    #[serde(default)]
    pub url: String,

    /// Public (anonymous) API key.
    #[serde(default)]
    pub anon_key: String,
}

impl IdentityConfig {
    /// Read both values from the environment only.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Replace values with the environment variables that are set.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(IDENTITY_URL_ENV).ok(),
            std::env::var(IDENTITY_KEY_ENV).ok(),
        )
    }

    fn with_overrides(mut self, url: Option<String>, anon_key: Option<String>) -> Self {
        if let Some(url) = url.filter(|v| !v.is_empty()) {
            self.url = url;
        }
        if let Some(key) = anon_key.filter(|v| !v.is_empty()) {
            self.anon_key = key;
        }
        self
    }

    /// Whether a remote identity service is configured.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }
}

/// Generate a default kyshop.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Ky Shop storefront configuration

[carousel]
interval_ms = {interval}
resume_after_ms = {resume}

[scroll]
tolerance = {tolerance:.1}
step = {step:.1}
smooth_ms = {smooth}

[checkout]
processing_delay_ms = {delay}
currency = "{currency}"

[identity]
# Overridden by {url_env} / {key_env}
url = ""
anon_key = ""
"#,
        interval = default_interval_ms(),
        resume = default_resume_after_ms(),
        tolerance = default_tolerance(),
        step = default_step(),
        smooth = default_smooth_ms(),
        delay = default_processing_delay_ms(),
        currency = default_currency(),
        url_env = IDENTITY_URL_ENV,
        key_env = IDENTITY_KEY_ENV,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_file_parses_to_defaults() {
        let config = StorefrontConfig::parse(&generate_default_config(), false).unwrap();
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_missing_sections_fall_back() {
        let config = StorefrontConfig::parse("[carousel]\ninterval_ms = 8000\n", false).unwrap();
        assert_eq!(config.carousel.interval_ms, 8_000);
        assert_eq!(config.carousel.resume_after_ms, 5_000);
        assert_eq!(config.scroll, ScrollConfig::default());
        assert_eq!(config.checkout.currency, "PHP");
        assert!(!config.identity.is_configured());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = StorefrontConfig::default();
        config.scroll.step = 240.0;
        config.identity.url = "https://id.kyshop.ph".to_string();

        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(StorefrontConfig::parse(&text, false).unwrap(), config);
    }

    #[test]
    fn test_json_config() {
        let config =
            StorefrontConfig::parse(r#"{"checkout": {"currency": "USD"}}"#, true).unwrap();
        assert_eq!(config.currency(), Currency::USD);
        assert_eq!(config.processing_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_validation() {
        let err = StorefrontConfig::parse("[carousel]\ninterval_ms = 0\n", false).unwrap_err();
        assert!(matches!(err, UiError::Config(_)));

        let err = StorefrontConfig::parse("[checkout]\ncurrency = \"XYZ\"\n", false).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: Unknown currency: XYZ");
    }

    #[test]
    fn test_identity_overrides() {
        let identity = IdentityConfig {
            url: "https://file.example".to_string(),
            anon_key: "file-key".to_string(),
        }
        .with_overrides(Some("https://env.example".to_string()), Some(String::new()));

        assert_eq!(identity.url, "https://env.example");
        assert_eq!(identity.anon_key, "file-key");
        assert!(identity.is_configured());
    }

    #[test]
    fn test_derived_settings() {
        let config = StorefrontConfig::default();
        assert_eq!(config.carousel_timing(), CarouselTiming::default());
        assert_eq!(config.scroll_settings(), ScrollSettings::default());
    }
}
