use tracing::debug;

use crate::env::{compile, import_selected, Accumulator, ImportSpec, MergeOrder, Policy, Snapshot};
use crate::input::{import_config, ConfigInput};
use crate::ini::Reader;

/// Builder describing one environment composition.
///
/// Sources are merged in a fixed order chosen by [`MergeOrder`]:
///
/// ```text
/// EnvironmentFirst:  assignments -> ambient/imports -> INI inputs
/// FilesFirst:        INI inputs -> assignments -> ambient/imports
/// ```
///
/// Every step appends, so the order only decides which value is first or
/// last when the result is compiled.
///
/// ## Example
///
/// ```
/// use inienv::{Composition, ConfigInput, Policy, Repeats, Snapshot};
///
/// let env = Composition::builder()
///     .with_policy(Policy {
///         repeats: Repeats::KeepLast,
///         clean: true,
///         ..Policy::default()
///     })
///     .with_assignment("X=1")
///     .with_input(ConfigInput::new("inline", "X = 2\n"))
///     .compose(&Snapshot::default());
///
/// assert_eq!(env, ["X=2"]);
/// ```
#[derive(Debug, Clone, Default)]
#[must_use = "compositions do nothing until .compose() is called"]
pub struct Composition {
    policy: Policy,
    reader: Reader,
    assignments: Vec<String>,
    imports: Vec<ImportSpec>,
    inputs: Vec<ConfigInput>,
}

impl Composition {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the INI decoder used for every input.
    pub fn with_reader(mut self, reader: Reader) -> Self {
        self.reader = reader;
        self
    }

    /// Adds a `NAME=VALUE` assignment.
    pub fn with_assignment(mut self, assignment: impl Into<String>) -> Self {
        self.assignments.push(assignment.into());
        self
    }

    pub fn with_assignments<I, S>(mut self, assignments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assignments.extend(assignments.into_iter().map(Into::into));
        self
    }

    /// Imports a variable or a wildcard pattern from the ambient environment.
    ///
    /// Any import disables the wholesale copy of the ambient environment.
    pub fn with_import(mut self, spec: &str) -> Self {
        self.imports.push(ImportSpec::parse(spec));
        self
    }

    pub fn with_imports<I, S>(self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        specs
            .into_iter()
            .fold(self, |composition, spec| composition.with_import(spec.as_ref()))
    }

    /// Adds an INI document. Documents are merged in the order added.
    pub fn with_input(mut self, input: ConfigInput) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn with_inputs(mut self, inputs: impl IntoIterator<Item = ConfigInput>) -> Self {
        self.inputs.extend(inputs);
        self
    }

    /// Merges every source into an accumulator without compiling it.
    pub fn accumulate(&self, snapshot: &Snapshot) -> Accumulator {
        let mut acc = Accumulator::new();
        match self.policy.order {
            MergeOrder::EnvironmentFirst => {
                self.merge_environment(&mut acc, snapshot);
                self.merge_inputs(&mut acc);
            }
            MergeOrder::FilesFirst => {
                self.merge_inputs(&mut acc);
                self.merge_environment(&mut acc, snapshot);
            }
        }
        acc
    }

    /// Produces the sorted `KEY=VALUE` environment.
    pub fn compose(&self, snapshot: &Snapshot) -> Vec<String> {
        compile(&self.accumulate(snapshot), &self.policy.repeats)
    }

    fn merge_environment(&self, acc: &mut Accumulator, snapshot: &Snapshot) {
        let assigned = acc.merge_assignments(&self.assignments);
        debug!(added = assigned, "merged command-line assignments");

        if !self.imports.is_empty() {
            import_selected(acc, snapshot, &self.imports);
        } else if !self.policy.clean {
            let added = acc.merge_snapshot(snapshot);
            debug!(added, "merged ambient environment");
        }
    }

    fn merge_inputs(&self, acc: &mut Accumulator) {
        for input in &self.inputs {
            import_config(acc, input, &self.reader);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Repeats;

    fn policy(repeats: Repeats, order: MergeOrder, clean: bool) -> Policy {
        Policy {
            repeats,
            order,
            clean,
        }
    }

    #[test]
    fn test_clean_literal_import() {
        let snapshot = Snapshot::from_environ(["FOO=1", "BAR=2"]);
        let acc = Composition::builder()
            .with_policy(policy(Repeats::default(), MergeOrder::EnvironmentFirst, true))
            .with_import("FOO")
            .accumulate(&snapshot);

        assert_eq!(acc.len(), 1);
        assert_eq!(acc.get("FOO").unwrap(), ["1"]);
    }

    #[test]
    fn test_import_implies_clean() {
        let snapshot = Snapshot::from_environ(["FOO=1", "BAR=2"]);
        let env = Composition::builder()
            .with_import("FOO")
            .compose(&snapshot);

        assert_eq!(env, ["FOO=1"]);
    }

    #[test]
    fn test_wildcard_import() {
        let snapshot = Snapshot::from_environ(["FOO=1", "FOOBAR=2", "OTHER=3"]);
        let acc = Composition::builder()
            .with_import("FOO*")
            .accumulate(&snapshot);

        assert!(acc.contains_key("FOO"));
        assert!(acc.contains_key("FOOBAR"));
        assert!(!acc.contains_key("OTHER"));
    }

    #[test]
    fn test_default_copies_ambient_environment() {
        let snapshot = Snapshot::from_environ(["A=1"]);
        let env = Composition::builder()
            .with_assignment("B=2")
            .compose(&snapshot);

        assert_eq!(env, ["A=1", "B=2"]);
    }

    #[test]
    fn test_keep_last_prefers_files_by_default() {
        let build = |repeats| {
            Composition::builder()
                .with_policy(policy(repeats, MergeOrder::EnvironmentFirst, true))
                .with_assignment("X=1")
                .with_input(ConfigInput::new("mem", "X = 2\n"))
                .compose(&Snapshot::default())
        };

        assert_eq!(build(Repeats::KeepLast), ["X=2"]);
        assert_eq!(build(Repeats::KeepFirst), ["X=1"]);
    }

    #[test]
    fn test_files_first_reverses_precedence() {
        let build = |repeats| {
            Composition::builder()
                .with_policy(policy(repeats, MergeOrder::FilesFirst, true))
                .with_assignment("X=1")
                .with_input(ConfigInput::new("mem", "X = 2\n"))
                .compose(&Snapshot::default())
        };

        assert_eq!(build(Repeats::KeepLast), ["X=1"]);
        assert_eq!(build(Repeats::KeepFirst), ["X=2"]);
    }

    #[test]
    fn test_files_first_wildcard_skips_file_keys() {
        let snapshot = Snapshot::from_environ(["APP_A=env", "APP_B=env"]);
        let acc = Composition::builder()
            .with_policy(policy(Repeats::default(), MergeOrder::FilesFirst, false))
            .with_import("APP_*")
            .with_input(ConfigInput::new("mem", "APP_A = file\n"))
            .accumulate(&snapshot);

        assert_eq!(acc.get("APP_A").unwrap(), ["file"]);
        assert_eq!(acc.get("APP_B").unwrap(), ["env"]);
    }

    #[test]
    fn test_repeated_assignments_join() {
        let env = Composition::builder()
            .with_policy(policy(Repeats::Join(",".into()), MergeOrder::EnvironmentFirst, true))
            .with_assignments(["Y=a", "Y=b"])
            .compose(&Snapshot::default());

        assert_eq!(env, ["Y=a,b"]);
    }

    #[test]
    fn test_single_assignment_in_clean_mode() {
        let env = Composition::builder()
            .with_policy(policy(Repeats::default(), MergeOrder::EnvironmentFirst, true))
            .with_assignment("Z=9")
            .compose(&Snapshot::from_environ(["IGNORED=1"]));

        assert_eq!(env, ["Z=9"]);
    }

    #[test]
    fn test_unparsable_input_keeps_other_inputs() {
        let env = Composition::builder()
            .with_policy(policy(Repeats::default(), MergeOrder::EnvironmentFirst, true))
            .with_input(ConfigInput::new("bad", "ok = 1\n[broken\n"))
            .with_input(ConfigInput::new("good", "[s]\nk = v\n"))
            .compose(&Snapshot::default());

        assert_eq!(env, ["ok=1", "s.k=v"]);
    }

    #[test]
    fn test_composition_is_deterministic() {
        let composition = Composition::builder()
            .with_policy(policy(Repeats::default(), MergeOrder::EnvironmentFirst, true))
            .with_assignments(["B=2", "A=1", "B=3"])
            .with_input(ConfigInput::new("mem", "[s]\nx = 1\ny = 2\n"));

        let first = composition.compose(&Snapshot::default());
        let second = composition.compose(&Snapshot::default());

        assert_eq!(first, second);
        assert_eq!(first, ["A=1", "B=2 3", "s.x=1", "s.y=2"]);
    }
}
