use std::collections::btree_map::{self, BTreeMap};

use super::snapshot::{split_pair, Snapshot};

/// Collected values per variable, in the order they were merged.
///
/// Every merge appends; nothing is discarded until the environment is
/// compiled. A key that is present always has at least one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulator {
    values: BTreeMap<String, Vec<String>>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the sequence for `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// Appends `value` only when `key` has no values yet.
    ///
    /// Returns true if the value was added.
    pub fn fill_absent(&mut self, key: &str, value: &str) -> bool {
        match self.values.entry(key.to_string()) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(vec![value.to_string()]);
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }

    /// Appends every variable of `snapshot`.
    pub fn merge_snapshot(&mut self, snapshot: &Snapshot) -> usize {
        for (key, value) in snapshot.iter() {
            self.append(key, value);
        }
        snapshot.len()
    }

    /// Appends `NAME=VALUE` assignments in order. A bare `NAME` assigns the
    /// empty string.
    pub fn merge_assignments<I, S>(&mut self, assignments: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for entry in assignments {
            let (key, value) = split_pair(entry.as_ref());
            if key.is_empty() {
                continue;
            }
            self.append(key, value);
            added += 1;
        }
        added
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.values.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
