//! Client configuration with TOML file support.

use serde::{Deserialize, Serialize};

use birthday_types::{AccountAddress, EventKind, NetworkId};

use crate::ChainError;

/// Configuration for talking to a deployed gift module.
///
/// Can be loaded from a TOML file via [`ChainConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Which network the module is deployed on. The app is bound to exactly one.
    #[serde(default)]
    pub network: NetworkId,

    /// Fullnode REST base URL. Defaults to the network's public fullnode.
    #[serde(default)]
    pub fullnode_url: Option<String>,

    /// Address the module is published under.
    #[serde(default)]
    pub module_address: String,

    /// Module name.
    #[serde(default = "default_module_name")]
    pub module_name: String,

    /// Resource account under which the module's events are published.
    #[serde(default)]
    pub resource_account_address: String,

    /// Page-size ceiling for event stream reads.
    #[serde(default = "default_event_limit")]
    pub event_limit: u32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_module_name() -> String {
    "birthday_bot".to_string()
}

fn default_event_limit() -> u32 {
    10_000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ChainConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ChainError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ChainError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ChainError> {
        toml::from_str(s).map_err(|e| ChainError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ChainError> {
        toml::to_string_pretty(self).map_err(|e| ChainError::Config(e.to_string()))
    }

    /// Check that the contract coordinates are present and well-formed.
    pub fn validate(&self) -> Result<(), ChainError> {
        AccountAddress::parse(&self.module_address)
            .map_err(|e| ChainError::Config(format!("module_address: {e}")))?;
        AccountAddress::parse(&self.resource_account_address)
            .map_err(|e| ChainError::Config(format!("resource_account_address: {e}")))?;
        if self.module_name.trim().is_empty() {
            return Err(ChainError::Config("module_name is empty".into()));
        }
        if self.event_limit == 0 {
            return Err(ChainError::Config("event_limit must be positive".into()));
        }
        Ok(())
    }

    /// Effective fullnode base URL, without a trailing slash.
    pub fn fullnode_url(&self) -> String {
        self.fullnode_url
            .as_deref()
            .unwrap_or(self.network.default_fullnode_url())
            .trim_end_matches('/')
            .to_string()
    }

    pub fn module(&self) -> ModuleId {
        ModuleId {
            address: self.module_address.clone(),
            name: self.module_name.clone(),
        }
    }

    pub fn resource_account(&self) -> AccountAddress {
        AccountAddress::new(self.resource_account_address.clone())
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            network: NetworkId::default(),
            fullnode_url: None,
            module_address: String::new(),
            module_name: default_module_name(),
            resource_account_address: String::new(),
            event_limit: default_event_limit(),
            request_timeout_secs: default_request_timeout_secs(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

/// Fully-qualified module coordinates (`<address>::<name>`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleId {
    pub address: String,
    pub name: String,
}

impl ModuleId {
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
        }
    }

    /// `<address>::<name>::<function>`
    pub fn function(&self, function: &str) -> String {
        format!("{}::{}::{}", self.address, self.name, function)
    }

    /// Fully-qualified Move type of an event kind.
    pub fn event_type(&self, kind: EventKind) -> String {
        format!("{}::{}::{}", self.address, self.name, kind.struct_name())
    }

    /// Event handle struct holding all of the module's streams.
    pub fn events_handle(&self) -> String {
        format!("{}::{}::ModuleEvents", self.address, self.name)
    }

    /// Match a fully-qualified event type string against the known kinds.
    pub fn kind_of(&self, event_type: &str) -> Option<EventKind> {
        EventKind::ALL
            .into_iter()
            .find(|k| self.event_type(*k) == event_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = ChainConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.network, NetworkId::Testnet);
        assert_eq!(config.module_name, "birthday_bot");
        assert_eq!(config.event_limit, 10_000);
        assert_eq!(config.log_format, "human");
        assert_eq!(
            config.fullnode_url(),
            "https://fullnode.testnet.aptoslabs.com/v1"
        );
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            network = "devnet"
            fullnode_url = "http://localhost:8080/v1/"
            module_address = "0xcafe"
            resource_account_address = "0xbeef"
        "#;
        let config = ChainConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.network, NetworkId::Devnet);
        assert_eq!(config.fullnode_url(), "http://localhost:8080/v1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = ChainConfig {
            module_address: "0xcafe".into(),
            resource_account_address: "0xbeef".into(),
            ..Default::default()
        };
        let toml_str = config.to_toml_string().unwrap();
        let parsed = ChainConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.module_address, "0xcafe");
        assert_eq!(parsed.event_limit, config.event_limit);
    }

    #[test]
    fn validate_rejects_missing_addresses() {
        let config = ChainConfig::default();
        assert!(matches!(config.validate(), Err(ChainError::Config(_))));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = ChainConfig::from_toml_file("/nonexistent/birthday.toml");
        assert!(matches!(result, Err(ChainError::Config(_))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("birthday.toml");
        std::fs::write(&path, "module_name = \"gifts\"\nevent_limit = 50\n").unwrap();
        let config = ChainConfig::from_toml_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.module_name, "gifts");
        assert_eq!(config.event_limit, 50);
    }

    #[test]
    fn module_names_events() {
        let module = ModuleId::new("0xcafe", "birthday_bot");
        assert_eq!(
            module.function("view_gifters_gifts"),
            "0xcafe::birthday_bot::view_gifters_gifts"
        );
        assert_eq!(
            module.kind_of("0xcafe::birthday_bot::BirthdayGiftRemovedEvent"),
            Some(EventKind::GiftCancelled)
        );
        assert_eq!(module.kind_of("0xcafe::other::BirthdayGiftAddedEvent"), None);
        assert_eq!(module.events_handle(), "0xcafe::birthday_bot::ModuleEvents");
    }
}
