//! # Storefront Configuration
//!
//! Configuration management for the state layer.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Load order (later overrides earlier)                                   │
//! │                                                                         │
//! │  1. Defaults (this file)                                                │
//! │  2. storefront.toml (explicit path or platform config dir)              │
//! │  3. Environment variables (STOREFRONT_*)                                │
//! │  4. validate()  (load_or_default resets only the invalid sections)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [admin]
//! email = "owner@shop.example"
//! password = "change-me"
//!
//! [checkout]
//! shipping_fee_cents = 500
//! currency_symbol = "$"
//!
//! [storage]
//! path = "/var/lib/storefront/storefront.json"
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use storefront_core::{Money, DEFAULT_SHIPPING_FEE};

use crate::error::{StoreError, StoreResult};

const CONFIG_FILE_NAME: &str = "storefront.toml";
const STORAGE_FILE_NAME: &str = "storefront.json";

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "storefront", "storefront")
}

// =============================================================================
// Admin Credentials
// =============================================================================

/// The admin login pair. Compared in plaintext.
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_email")]
    pub email: String,

    #[serde(default = "default_admin_password")]
    pub password: String,
}

fn default_admin_email() -> String {
    "admin@storefront.local".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

impl Default for AdminConfig {
    fn default() -> Self {
        AdminConfig {
            email: default_admin_email(),
            password: default_admin_password(),
        }
    }
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Checkout Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// Flat shipping fee added to every order, in cents.
    #[serde(default = "default_shipping_fee_cents")]
    pub shipping_fee_cents: i64,

    /// Symbol used when formatting amounts for display.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_shipping_fee_cents() -> i64 {
    DEFAULT_SHIPPING_FEE.cents()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        CheckoutSettings {
            shipping_fee_cents: default_shipping_fee_cents(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl CheckoutSettings {
    pub fn shipping_fee(&self) -> Money {
        Money::from_cents(self.shipping_fee_cents)
    }

    pub fn format(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Location of the JSON storage file.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join(STORAGE_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(STORAGE_FILE_NAME))
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            path: default_storage_path(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub admin: AdminConfig,

    #[serde(default)]
    pub checkout: CheckoutSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        Self::load_with(config_path, env_var)
    }

    /// Loads config, repairing or replacing whatever fails.
    ///
    /// A config that parses but fails validation keeps its valid sections
    /// and resets only the invalid ones, so a bad shipping fee never costs
    /// the configured admin credentials.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load_or_default_with(config_path, env_var)
    }

    fn load_with(
        config_path: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> StoreResult<Self> {
        let config = Self::read_with(config_path, lookup)?;
        config.validate()?;
        Ok(config)
    }

    fn load_or_default_with(
        config_path: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        match Self::read_with(config_path, lookup) {
            Ok(mut config) => {
                config.repair_invalid_sections();
                config
            }
            Err(e) => {
                error!("Failed to read storefront config: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Defaults, then the TOML file, then environment overrides. No validation.
    fn read_with(
        config_path: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        Ok(config)
    }

    fn repair_invalid_sections(&mut self) {
        if let Err(e) = self.validate_admin() {
            warn!("{}. Using default admin section.", e);
            self.admin = AdminConfig::default();
        }
        if let Err(e) = self.validate_checkout() {
            warn!("{}. Using default checkout section.", e);
            self.checkout = CheckoutSettings::default();
        }
        if let Err(e) = self.validate_storage() {
            warn!("{}. Using default storage section.", e);
            self.storage = StorageSettings::default();
        }
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    pub fn validate(&self) -> StoreResult<()> {
        self.validate_admin()?;
        self.validate_checkout()?;
        self.validate_storage()
    }

    fn validate_admin(&self) -> StoreResult<()> {
        let email = self.admin.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(StoreError::InvalidConfig(format!(
                "admin.email must be an email address, got: '{}'",
                self.admin.email
            )));
        }

        if self.admin.password.is_empty() {
            return Err(StoreError::InvalidConfig(
                "admin.password must not be empty".into(),
            ));
        }

        Ok(())
    }

    fn validate_checkout(&self) -> StoreResult<()> {
        if self.checkout.shipping_fee_cents < 0 {
            return Err(StoreError::InvalidConfig(
                "checkout.shipping_fee_cents must not be negative".into(),
            ));
        }

        Ok(())
    }

    fn validate_storage(&self) -> StoreResult<()> {
        if self.storage.path.as_os_str().is_empty() {
            return Err(StoreError::InvalidConfig(
                "storage.path must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies `STOREFRONT_*` overrides from any variable source.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(email) = lookup("STOREFRONT_ADMIN_EMAIL") {
            debug!(email = %email, "Overriding admin email from environment");
            self.admin.email = email;
        }

        if let Some(password) = lookup("STOREFRONT_ADMIN_PASSWORD") {
            debug!("Overriding admin password from environment");
            self.admin.password = password;
        }

        if let Some(fee) = lookup("STOREFRONT_SHIPPING_FEE_CENTS") {
            match fee.trim().parse::<i64>() {
                Ok(cents) => self.checkout.shipping_fee_cents = cents,
                Err(_) => warn!(value = %fee, "Ignoring invalid STOREFRONT_SHIPPING_FEE_CENTS"),
            }
        }

        if let Some(symbol) = lookup("STOREFRONT_CURRENCY_SYMBOL") {
            self.checkout.currency_symbol = symbol;
        }

        if let Some(path) = lookup("STOREFRONT_STORAGE_PATH") {
            debug!(path = %path, "Overriding storage path from environment");
            self.storage.path = PathBuf::from(path);
        }
    }

    /// `storefront.toml` in the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = StorefrontConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.checkout.shipping_fee(), DEFAULT_SHIPPING_FEE);
        assert_eq!(config.admin.email, "admin@storefront.local");
    }

    #[test]
    fn test_load_from_file_with_partial_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(
            &path,
            r#"
            [admin]
            email = "owner@shop.example"

            [checkout]
            shipping_fee_cents = 250
            "#,
        )
        .unwrap();

        let config = StorefrontConfig::load_with(Some(path), no_env).unwrap();
        assert_eq!(config.admin.email, "owner@shop.example");
        assert_eq!(config.admin.password, "admin123");
        assert_eq!(config.checkout.shipping_fee_cents, 250);
        assert_eq!(config.checkout.currency_symbol, "$");
    }

    #[test]
    fn test_env_overrides_file_and_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(
            &path,
            r#"
            [admin]
            email = "owner@shop.example"

            [checkout]
            shipping_fee_cents = 250
            currency_symbol = "€"
            "#,
        )
        .unwrap();

        let vars: HashMap<&str, &str> = [
            ("STOREFRONT_SHIPPING_FEE_CENTS", "300"),
            ("STOREFRONT_ADMIN_PASSWORD", "from-env"),
        ]
        .into_iter()
        .collect();
        let config =
            StorefrontConfig::load_with(Some(path), |name| vars.get(name).map(|v| v.to_string()))
                .unwrap();

        // environment beats file
        assert_eq!(config.checkout.shipping_fee_cents, 300);
        assert_eq!(config.admin.password, "from-env");
        // file beats defaults
        assert_eq!(config.admin.email, "owner@shop.example");
        assert_eq!(config.checkout.currency_symbol, "€");
        // untouched by either
        assert_eq!(config.storage.path, StorageSettings::default().path);
    }

    #[test]
    fn test_invalid_value_resets_only_its_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(
            &path,
            r#"
            [admin]
            email = "owner@shop.example"
            password = "correct horse"

            [checkout]
            shipping_fee_cents = 250
            currency_symbol = "€"
            "#,
        )
        .unwrap();

        let lookup = |name: &str| (name == "STOREFRONT_SHIPPING_FEE_CENTS").then(|| "-5".to_string());
        assert!(matches!(
            StorefrontConfig::load_with(Some(path.clone()), lookup),
            Err(StoreError::InvalidConfig(_))
        ));

        let config = StorefrontConfig::load_or_default_with(Some(path), lookup);
        assert_eq!(config.admin.email, "owner@shop.example");
        assert_eq!(config.admin.password, "correct horse");
        assert_eq!(config.checkout.shipping_fee(), DEFAULT_SHIPPING_FEE);
        assert_eq!(config.checkout.currency_symbol, "$");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "[admin\nemail = ").unwrap();

        assert!(matches!(
            StorefrontConfig::load_with(Some(path.clone()), no_env),
            Err(StoreError::ConfigParse(_))
        ));
        let fallback = StorefrontConfig::load_or_default_with(Some(path), no_env);
        assert_eq!(fallback.admin.email, "admin@storefront.local");
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("STOREFRONT_ADMIN_EMAIL", "boss@shop.example"),
            ("STOREFRONT_ADMIN_PASSWORD", "s3cret"),
            ("STOREFRONT_SHIPPING_FEE_CENTS", "0"),
            ("STOREFRONT_STORAGE_PATH", "/tmp/shop.json"),
        ]
        .into_iter()
        .collect();

        let mut config = StorefrontConfig::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.admin.email, "boss@shop.example");
        assert_eq!(config.admin.password, "s3cret");
        assert_eq!(config.checkout.shipping_fee_cents, 0);
        assert_eq!(config.storage.path, PathBuf::from("/tmp/shop.json"));
    }

    #[test]
    fn test_invalid_fee_override_is_ignored() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(|name| {
            (name == "STOREFRONT_SHIPPING_FEE_CENTS").then(|| "five".to_string())
        });
        assert_eq!(config.checkout.shipping_fee_cents, DEFAULT_SHIPPING_FEE.cents());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = StorefrontConfig::default();
        config.admin.email = "not-an-email".to_string();
        assert!(matches!(config.validate(), Err(StoreError::InvalidConfig(_))));

        let mut config = StorefrontConfig::default();
        config.checkout.shipping_fee_cents = -1;
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.admin.password.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("storefront.toml");

        let mut config = StorefrontConfig::default();
        config.checkout.currency_symbol = "Rs ".to_string();
        config.save(Some(path.clone())).unwrap();

        let reloaded = StorefrontConfig::load_with(Some(path), no_env).unwrap();
        assert_eq!(reloaded.checkout.currency_symbol, "Rs ");
        assert_eq!(
            reloaded.checkout.format(Money::from_cents(150000)),
            "Rs 1500.00"
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", AdminConfig::default());
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("admin123"));
    }
}
