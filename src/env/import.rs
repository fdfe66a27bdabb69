//! Selective import of ambient variables (`-m NAME` / `-m PATTERN`).

use tracing::{debug, warn};

use super::accumulator::Accumulator;
use super::snapshot::Snapshot;
use super::wildcard::Wildcard;

/// One requested import: an exact variable name or a wildcard pattern.
#[derive(Debug, Clone)]
pub enum ImportSpec {
    Literal(String),
    Pattern(Wildcard),
}

impl ImportSpec {
    /// Classifies `spec`. A pattern that fails to compile is logged and
    /// treated as a literal name.
    pub fn parse(spec: &str) -> Self {
        if !Wildcard::is_pattern(spec) {
            return Self::Literal(spec.to_string());
        }
        match Wildcard::new(spec) {
            Ok(pattern) => Self::Pattern(pattern),
            Err(err) => {
                warn!(pattern = spec, error = %err, "unable to compile import pattern, matching it literally");
                Self::Literal(spec.to_string())
            }
        }
    }

    /// Merges the snapshot entries selected by this spec into `acc`.
    ///
    /// A literal name appends its value. A pattern only fills keys that
    /// `acc` does not hold yet. Returns the number of values added.
    pub fn apply(&self, acc: &mut Accumulator, snapshot: &Snapshot) -> usize {
        match self {
            Self::Literal(name) => match snapshot.get(name) {
                Some(value) => {
                    acc.append(name.as_str(), value);
                    1
                }
                None => 0,
            },
            Self::Pattern(pattern) => snapshot
                .iter()
                .filter(|(key, _)| pattern.is_match(key))
                .filter(|(key, value)| acc.fill_absent(key, value))
                .count(),
        }
    }
}

/// Applies `specs` in order, so earlier specs and earlier merges win over
/// later pattern expansion.
pub fn import_selected(acc: &mut Accumulator, snapshot: &Snapshot, specs: &[ImportSpec]) -> usize {
    specs
        .iter()
        .map(|spec| {
            let added = spec.apply(acc, snapshot);
            debug!(?spec, added, "imported from environment");
            added
        })
        .sum()
}
