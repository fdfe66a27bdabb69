//! Environment composition: snapshot, accumulation, import filtering and
//! compilation to `KEY=VALUE` entries.

mod accumulator;
mod compile;
mod import;
mod policy;
mod snapshot;
mod wildcard;

pub use accumulator::Accumulator;
pub use compile::compile;
pub use import::{import_selected, ImportSpec};
pub use policy::{MergeOrder, Policy, Repeats};
pub use snapshot::{split_pair, Snapshot};
pub use wildcard::{Wildcard, WildcardError};
