use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// Directory the deployment scripts write their address files into
pub const DEFAULT_ADDRESSES_DIR: &str = "script/deployments/addresses";

/// Extension of address files
pub const DEFAULT_EXTENSION: &str = "txt";

/// Contracts expected by the fixed-name compile mode, in lookup order
pub const DEFAULT_CONTRACT_NAMES: &[&str] = &[
    "finder",
    "deployer",
    "priceFeed",
    "chainlinkPriceFeed",
    "collateralWhitelist",
    "identifierWhitelist",
    "tokenFactory",
    "lendingStorageManager",
    "lendingManager",
    "compoundModule",
    "poolRegistry",
    "manager",
    "trustedForwarder",
    "factoryVersioning",
    "poolFactory",
    "pool",
    "poolImplementation",
];

/// How candidate files are discovered and read
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Look up `<name>.<ext>` for each configured name and take the first address in it
    Compile,
    /// Read every `*.<ext>` file in the directory as a `KEY=VALUE` line
    Consolidate,
}

impl Mode {
    pub fn default_output(&self) -> PathBuf {
        match self {
            Mode::Compile => PathBuf::from("deployed_addresses.json"),
            Mode::Consolidate => PathBuf::from("deployments").join("testnet-addresses.json"),
        }
    }

    pub fn default_network(&self) -> &'static str {
        match self {
            Mode::Compile => "anvil-fork",
            Mode::Consolidate => "testnet",
        }
    }
}

/// Fully resolved settings for one consolidation run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub mode: Mode,
    pub addresses_dir: PathBuf,
    pub output: PathBuf,
    pub network: String,
    pub extension: String,
    /// Logical names to look up; only used in compile mode
    pub names: Vec<String>,
    /// Written as `chainId` in consolidate mode, `null` when unset
    pub chain_id: Option<u64>,
}

impl Config {
    /// Defaults for the given mode
    pub fn for_mode(mode: Mode) -> Self {
        Config {
            mode,
            addresses_dir: PathBuf::from(DEFAULT_ADDRESSES_DIR),
            output: mode.default_output(),
            network: mode.default_network().to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            names: DEFAULT_CONTRACT_NAMES.iter().map(|n| n.to_string()).collect(),
            chain_id: None,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.network.trim().is_empty() {
            return Err(ValidationError::InvalidNetwork(
                "network label cannot be empty".to_string(),
            ));
        }

        if self.extension.is_empty() {
            return Err(ValidationError::InvalidExtension(
                "extension cannot be empty".to_string(),
            ));
        }
        if self.extension.contains('/') || self.extension.contains('\\') {
            return Err(ValidationError::InvalidExtension(format!(
                "extension '{}' must not contain a path separator",
                self.extension
            )));
        }

        if self.mode == Mode::Compile {
            if self.names.is_empty() {
                return Err(ValidationError::InvalidNames(
                    "at least one contract name is required in compile mode".to_string(),
                ));
            }
            let mut seen = HashSet::new();
            for name in &self.names {
                if name.trim().is_empty() {
                    return Err(ValidationError::InvalidNames(
                        "contract names cannot be empty".to_string(),
                    ));
                }
                if !seen.insert(name.as_str()) {
                    return Err(ValidationError::InvalidNames(format!(
                        "duplicate contract name '{}'",
                        name
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid network: {0}")]
    InvalidNetwork(String),
    #[error("Invalid extension: {0}")]
    InvalidExtension(String),
    #[error("Invalid contract names: {0}")]
    InvalidNames(String),
    #[error("Config file is for {configured:?} mode but {requested:?} was requested")]
    ModeMismatch { configured: Mode, requested: Mode },
}
