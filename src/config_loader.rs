use crate::config::{Config, Mode, ValidationError};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Optional settings read from a YAML file. Unset fields keep the mode defaults.
///
/// `mode`, when present, pins the file to one subcommand.
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub mode: Option<Mode>,
    pub addresses_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub network: Option<String>,
    pub extension: Option<String>,
    pub names: Option<Vec<String>>,
    pub chain_id: Option<u64>,
}

/// Values given on the command line; these take precedence over the file
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub addresses_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub network: Option<String>,
    pub extension: Option<String>,
    pub names: Option<Vec<String>>,
    pub chain_id: Option<u64>,
}

/// Load and parse a YAML settings file
pub fn load_file_config(config_path: &Path) -> Result<FileConfig> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open config file '{}'", config_path.display()))?;

    let config: FileConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse config file '{}'", config_path.display()))?;

    Ok(config)
}

impl From<&FileConfig> for CliOverrides {
    fn from(file: &FileConfig) -> Self {
        CliOverrides {
            addresses_dir: file.addresses_dir.clone(),
            output: file.output.clone(),
            network: file.network.clone(),
            extension: file.extension.clone(),
            names: file.names.clone(),
            chain_id: file.chain_id,
        }
    }
}

impl CliOverrides {
    fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.addresses_dir {
            config.addresses_dir = dir.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(network) = &self.network {
            config.network = network.clone();
        }
        if let Some(extension) = &self.extension {
            // Accept ".txt" as well as "txt"
            config.extension = extension.trim_start_matches('.').to_string();
        }
        if let Some(names) = &self.names {
            config.names = names.clone();
        }
        if self.chain_id.is_some() {
            config.chain_id = self.chain_id;
        }
    }
}

/// Resolve the settings for `mode`: defaults, then file, then CLI.
pub fn resolve_config(
    mode: Mode,
    file: Option<&FileConfig>,
    overrides: &CliOverrides,
) -> Result<Config> {
    let mut config = Config::for_mode(mode);

    if let Some(file) = file {
        if let Some(file_mode) = file.mode {
            if file_mode != mode {
                return Err(ValidationError::ModeMismatch {
                    configured: file_mode,
                    requested: mode,
                }
                .into());
            }
        }
        CliOverrides::from(file).apply(&mut config);
    }

    overrides.apply(&mut config);

    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_file_config() {
        let yaml = r#"
addresses_dir: "out/addresses"
network: "sepolia"
names:
  - finder
  - pool
chain_id: 11155111
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let file = load_file_config(temp_file.path()).unwrap();
        assert_eq!(file.addresses_dir, Some(PathBuf::from("out/addresses")));
        assert_eq!(file.network.as_deref(), Some("sepolia"));
        assert_eq!(file.chain_id, Some(11155111));
        assert_eq!(file.mode, None);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "netwrok: typo\n").unwrap();
        assert!(load_file_config(temp_file.path()).is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig {
            network: Some("sepolia".to_string()),
            extension: Some(".addr".to_string()),
            names: Some(vec!["finder".to_string()]),
            ..Default::default()
        };
        let overrides = CliOverrides {
            network: Some("mainnet".to_string()),
            ..Default::default()
        };

        let config = resolve_config(Mode::Compile, Some(&file), &overrides).unwrap();
        assert_eq!(config.network, "mainnet");
        assert_eq!(config.extension, "addr");
        assert_eq!(config.names, vec!["finder".to_string()]);
        assert_eq!(config.output, PathBuf::from("deployed_addresses.json"));
    }

    #[test]
    fn test_file_mode_must_match_subcommand() {
        let file = FileConfig {
            mode: Some(Mode::Consolidate),
            network: Some("sepolia".to_string()),
            ..Default::default()
        };

        let err = resolve_config(Mode::Compile, Some(&file), &CliOverrides::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::ModeMismatch {
                configured: Mode::Consolidate,
                requested: Mode::Compile,
            })
        ));

        let config =
            resolve_config(Mode::Consolidate, Some(&file), &CliOverrides::default()).unwrap();
        assert_eq!(config.network, "sepolia");
    }

    #[test]
    fn test_load_file_mode() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "mode: consolidate\n").unwrap();
        let file = load_file_config(temp_file.path()).unwrap();
        assert_eq!(file.mode, Some(Mode::Consolidate));
    }

    #[test]
    fn test_resolve_validates() {
        let overrides = CliOverrides {
            names: Some(vec!["pool".to_string(), "pool".to_string()]),
            ..Default::default()
        };
        assert!(resolve_config(Mode::Compile, None, &overrides).is_err());
    }
}
