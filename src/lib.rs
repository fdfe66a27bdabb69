pub mod cli;
pub mod compose;
pub mod config;
pub mod env;
mod error;
pub mod escape;
pub mod exec;
pub mod ini;
pub mod input;
pub mod logging;

pub use compose::Composition;
pub use config::{ConfigError, Defaults};
pub use env::{Accumulator, MergeOrder, Policy, Repeats, Snapshot};
pub use error::Error;
pub use input::{ConfigInput, InputSource};
