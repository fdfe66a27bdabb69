use std::path::Path;

use serde::Deserialize;

use super::{Config, ConfigError};
use crate::env::Snapshot;
use crate::ini::KeyCase;

/// Prefix of environment variables that override [`Defaults`].
pub const ENV_PREFIX: &str = "INIENV";
/// Separator between the prefix and the field name, as in `INIENV__CLEAN`.
pub const ENV_SEPARATOR: &str = "__";

/// Policy defaults, overridden field by field by command-line flags.
///
/// ```toml
/// separator = ":"
/// key_separator = "_"
/// casing = "upper"
/// drop_repeats = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    /// Joins repeated values. Taken as written, without escape decoding.
    pub separator: String,
    pub key_separator: String,
    pub casing: KeyCase,
    pub drop_repeats: bool,
    pub keep_first: bool,
    pub files_first: bool,
    pub clean: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            separator: " ".to_string(),
            key_separator: ".".to_string(),
            casing: KeyCase::Sensitive,
            drop_repeats: false,
            keep_first: false,
            files_first: false,
            clean: false,
        }
    }
}

impl Defaults {
    /// Layers built-in defaults, then `file` (required when given), then
    /// `INIENV__*` variables from `snapshot`.
    pub fn load(file: Option<&Path>, snapshot: &Snapshot) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.with_file(path, true);
        }
        builder
            .with_env(ENV_PREFIX, ENV_SEPARATOR, snapshot.iter())
            .build()
    }
}
