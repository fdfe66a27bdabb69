use std::collections::BTreeMap;

/// An immutable view of a process environment, name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    vars: BTreeMap<String, String>,
}

impl Snapshot {
    /// Captures the environment of the running process.
    ///
    /// Names and values that are not valid Unicode are converted lossily.
    pub fn capture() -> Self {
        std::env::vars_os()
            .map(|(key, value)| {
                (
                    key.to_string_lossy().into_owned(),
                    value.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }

    /// Builds a snapshot from `NAME=VALUE` entries.
    ///
    /// Only the first `=` splits; an entry without one maps to the empty
    /// string. Later entries for the same name replace earlier ones.
    pub fn from_environ<I, S>(environ: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        environ
            .into_iter()
            .map(|entry| {
                let (key, value) = split_pair(entry.as_ref());
                (key.to_string(), value.to_string())
            })
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Snapshot {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let vars = iter
            .into_iter()
            .filter_map(|(k, v)| {
                let key: String = k.into();
                (!key.is_empty()).then(|| (key, v.into()))
            })
            .collect();
        Self { vars }
    }
}

/// Splits a `NAME=VALUE` entry on its first `=`.
pub fn split_pair(entry: &str) -> (&str, &str) {
    entry.split_once('=').unwrap_or((entry, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_first_equals() {
        let snapshot = Snapshot::from_environ(["A=1", "B=x=y", "C="]);
        assert_eq!(snapshot.get("A"), Some("1"));
        assert_eq!(snapshot.get("B"), Some("x=y"));
        assert_eq!(snapshot.get("C"), Some(""));
    }

    #[test]
    fn test_bare_name_maps_to_empty_value() {
        let snapshot = Snapshot::from_environ(["FLAG"]);
        assert_eq!(snapshot.get("FLAG"), Some(""));
    }

    #[test]
    fn test_empty_names_are_dropped() {
        let snapshot = Snapshot::from_environ(["=oops", "", "OK=1"]);
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.contains("OK"));
    }

    #[test]
    fn test_later_entry_wins() {
        let snapshot = Snapshot::from_environ(["A=1", "A=2"]);
        assert_eq!(snapshot.get("A"), Some("2"));
    }

    #[test]
    fn test_capture_sees_process_environment() {
        let snapshot = Snapshot::capture();
        if let Some(path) = std::env::var_os("PATH") {
            assert_eq!(snapshot.get("PATH"), Some(path.to_string_lossy().as_ref()));
        }
    }
}
