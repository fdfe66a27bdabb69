//! Layered defaults for the composition policy.

mod builder;
mod defaults;
mod env;
mod error;

pub use builder::Config;
pub use defaults::{Defaults, ENV_PREFIX, ENV_SEPARATOR};
pub use error::ConfigError;
