use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::env::load_env_vars;
use super::ConfigError;

/// A configuration source in the loading pipeline.
#[derive(Debug)]
enum ConfigSource {
    File {
        path: PathBuf,
        required: bool,
    },
    Env {
        prefix: String,
        separator: String,
        vars: Vec<(String, String)>,
    },
}

/// Builder for loading configuration from TOML files and environment
/// variables.
///
/// Sources are merged in registration order, with later sources overriding
/// earlier ones. Nested tables are merged recursively; other values
/// (including arrays) are replaced entirely.
///
/// ## Example
///
/// ```no_run
/// use inienv::config::Config;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct MyConfig {
///     separator: String,
/// }
///
/// let config: MyConfig = Config::builder()
///     .with_file("inienv.toml", false)
///     .with_env("INIENV", "__", std::env::vars())
///     .build()?;
/// # Ok::<(), inienv::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct Config {
    sources: Vec<ConfigSource>,
}

impl Config {
    /// Creates a new configuration builder.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Adds a TOML file to be loaded.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(mut self, path: impl AsRef<Path>, required: bool) -> Self {
        self.sources.push(ConfigSource::File {
            path: path.as_ref().to_path_buf(),
            required,
        });
        self
    }

    /// Adds the variables of `vars` that start with `prefix` and `separator`.
    ///
    /// `INIENV__KEEP_FIRST=true` with prefix `INIENV` and separator `__`
    /// sets `keep_first`.
    pub fn with_env<I, K, V>(mut self, prefix: impl Into<String>, separator: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.sources.push(ConfigSource::Env {
            prefix: prefix.into(),
            separator: separator.into(),
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        });
        self
    }

    /// Builds the configuration by loading, merging and deserializing.
    pub fn build<T: DeserializeOwned>(self) -> Result<T, ConfigError> {
        let mut merged = toml::Table::new();

        for source in self.sources {
            match source {
                ConfigSource::File { path, required } => {
                    if let Some(table) = load_config_file(&path, required)? {
                        deep_merge(&mut merged, table);
                    }
                }
                ConfigSource::Env {
                    prefix,
                    separator,
                    vars,
                } => {
                    if separator.is_empty() {
                        continue;
                    }
                    let pairs = vars.iter().map(|(k, v)| (k.as_str(), v.as_str()));
                    load_env_vars(&mut merged, &prefix, &separator, pairs);
                }
            }
        }

        let value = toml::Value::Table(merged);
        value.try_into().map_err(ConfigError::DeserializeError)
    }
}

/// Loads and parses a TOML config file.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
fn load_config_file(path: &Path, required: bool) -> Result<Option<toml::Table>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let table = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(Some(table))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if required {
                Err(ConfigError::FileNotFound(path.to_path_buf()))
            } else {
                Ok(None)
            }
        }
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

fn deep_merge(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(overlay_table)) => {
                deep_merge(base_table, overlay_table);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
