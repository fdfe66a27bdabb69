/// How repeated values of one variable collapse into a single value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repeats {
    /// Join every value with the separator.
    Join(String),
    KeepFirst,
    KeepLast,
}

impl Default for Repeats {
    fn default() -> Self {
        Self::Join(" ".to_string())
    }
}

/// Where INI file contents are merged relative to the command line and the
/// ambient environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeOrder {
    /// Environment and assignments first, then files.
    #[default]
    EnvironmentFirst,
    /// Files first, then environment and assignments.
    FilesFirst,
}

/// Composition policy, fixed before any value is merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Policy {
    pub repeats: Repeats,
    pub order: MergeOrder,
    /// Skip wholesale import of the ambient environment.
    pub clean: bool,
}

impl Policy {
    /// Builds the repeat policy from the individual flags. `keep_first`
    /// implies `drop_repeats`.
    pub fn repeats_from_flags(drop_repeats: bool, keep_first: bool, separator: String) -> Repeats {
        match (drop_repeats || keep_first, keep_first) {
            (true, true) => Repeats::KeepFirst,
            (true, false) => Repeats::KeepLast,
            (false, _) => Repeats::Join(separator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeats_from_flags() {
        assert_eq!(Policy::repeats_from_flags(false, false, ",".into()), Repeats::Join(",".into()));
        assert_eq!(Policy::repeats_from_flags(true, false, ",".into()), Repeats::KeepLast);
        assert_eq!(Policy::repeats_from_flags(true, true, ",".into()), Repeats::KeepFirst);
        assert_eq!(Policy::repeats_from_flags(false, true, ",".into()), Repeats::KeepFirst);
    }

    #[test]
    fn test_default_policy() {
        let policy = Policy::default();
        assert_eq!(policy.repeats, Repeats::Join(" ".into()));
        assert_eq!(policy.order, MergeOrder::EnvironmentFirst);
        assert!(!policy.clean);
    }
}
