//! Command-line surface.
//!
//! ```text
//! inienv [-e NAME=VALUE]... [-f FILE|-]... [-m NAME|PATTERN]... [-i]
//!        [-n] [-N] [-s SEP] [-S SEP] [-c CASE] [-L] [COMMAND [ARGS]...]
//!
//! no COMMAND  -> print the environment, one KEY=VALUE per line
//! COMMAND     -> exec COMMAND with exactly that environment
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing::warn;

use crate::config::Defaults;
use crate::env::{MergeOrder, Policy};
use crate::escape::unescape_separator;
use crate::ini::{KeyCase, Reader};
use crate::input::InputSource;

/// Run a program in an environment composed from the current environment,
/// command-line assignments and INI files.
#[derive(Debug, Parser)]
#[command(
    name = "inienv",
    version,
    after_help = "INI keys are named <section><key-separator><key>, so `host` under \
                  `[db]` becomes `db.host`. Keys with no `=` get the value 1.\n\n\
                  Exit status is 127 when COMMAND cannot be found and 126 when it \
                  cannot be executed."
)]
pub struct Cli {
    /// Set an environment variable. Can be repeated.
    #[arg(short = 'e', long = "set", value_name = "NAME=VALUE", action = clap::ArgAction::Append)]
    pub assignments: Vec<String>,

    /// INI file to load into the environment; `-` reads standard input.
    /// Can be repeated.
    #[arg(short = 'f', long = "file", value_name = "FILE", action = clap::ArgAction::Append)]
    pub files: Vec<String>,

    /// Import a variable from the current environment by name or wildcard
    /// (`*`, `?`, `\` escapes). Implies --clean.
    #[arg(short = 'm', long = "import", value_name = "NAME", action = clap::ArgAction::Append)]
    pub imports: Vec<String>,

    /// Omit the current environment.
    #[arg(short = 'i', long, overrides_with = "no_clean")]
    pub clean: bool,

    /// Copy the current environment even if the defaults file sets `clean`.
    #[arg(long, overrides_with = "clean")]
    pub no_clean: bool,

    /// Keep only the last value set for each variable.
    #[arg(short = 'n', long, overrides_with = "no_drop_repeats")]
    pub drop_repeats: bool,

    /// Join repeated values even if the defaults file sets `drop_repeats`.
    #[arg(long, overrides_with = "drop_repeats")]
    pub no_drop_repeats: bool,

    /// Keep the first value instead of the last (implies --drop-repeats).
    #[arg(short = 'N', long, overrides_with = "no_keep_first")]
    pub keep_first: bool,

    /// Keep the last value even if the defaults file sets `keep_first`.
    #[arg(long, overrides_with = "keep_first")]
    pub no_keep_first: bool,

    /// Separator between repeated values. Backslash escapes are decoded.
    #[arg(short = 's', long, value_name = "SEP", allow_hyphen_values = true)]
    pub separator: Option<String>,

    /// Separator between INI section names and keys.
    #[arg(short = 'S', long, value_name = "SEP", allow_hyphen_values = true)]
    pub key_separator: Option<String>,

    /// Case of INI keys: s (case-sensitive), u (upper) or l (lower).
    #[arg(short = 'c', long = "case", value_name = "CASE")]
    pub casing: Option<String>,

    /// Merge INI files before the environment and assignments.
    #[arg(short = 'L', long, overrides_with = "no_files_first")]
    pub files_first: bool,

    /// Merge the environment first even if the defaults file sets `files_first`.
    #[arg(long, overrides_with = "files_first")]
    pub no_files_first: bool,

    /// TOML file with defaults for the options above.
    #[arg(long, value_name = "FILE", env = "INIENV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Diagnostic verbosity: off, error, warn, info, debug or trace.
    #[arg(long, value_name = "LEVEL", env = "INIENV_LOG", default_value = "warn")]
    pub log_level: LevelFilter,

    /// Program to run and its arguments.
    #[arg(value_name = "COMMAND", num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// Combines flags with `defaults`; flags win.
    pub fn policy(&self, defaults: &Defaults) -> Policy {
        let separator = match &self.separator {
            Some(raw) => unescape_separator(raw).unwrap_or_else(|err| {
                warn!(separator = %raw, error = %err, "unable to unquote separator, using it as given");
                raw.clone()
            }),
            None => defaults.separator.clone(),
        };

        Policy {
            repeats: Policy::repeats_from_flags(
                switch(self.drop_repeats, self.no_drop_repeats, defaults.drop_repeats),
                switch(self.keep_first, self.no_keep_first, defaults.keep_first),
                separator,
            ),
            order: if switch(self.files_first, self.no_files_first, defaults.files_first) {
                MergeOrder::FilesFirst
            } else {
                MergeOrder::EnvironmentFirst
            },
            clean: switch(self.clean, self.no_clean, defaults.clean),
        }
    }

    /// The INI decoder settings.
    pub fn reader(&self, defaults: &Defaults) -> Reader {
        let casing = self
            .casing
            .as_deref()
            .map_or(defaults.casing, KeyCase::parse_lenient);
        let key_separator = self
            .key_separator
            .clone()
            .unwrap_or_else(|| defaults.key_separator.clone());
        Reader::new(key_separator, casing)
    }

    pub fn inputs(&self) -> Vec<InputSource> {
        self.files.iter().map(|f| InputSource::from_arg(f)).collect()
    }
}

/// Resolves a `--flag`/`--no-flag` pair against its default. clap keeps only
/// the last of the pair, so at most one is set.
fn switch(on: bool, off: bool, default: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        default
    }
}
