//! Integration tests for composing environments from files on disk.

use std::io::Write;
use std::path::Path;

use inienv::ini::{KeyCase, Reader};
use inienv::input::load_inputs;
use inienv::{Composition, InputSource, MergeOrder, Policy, Repeats, Snapshot};
use tempfile::NamedTempFile;

fn ini_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

fn source(path: &Path) -> InputSource {
    InputSource::File(path.to_path_buf())
}

fn clean(repeats: Repeats) -> Policy {
    Policy {
        repeats,
        order: MergeOrder::EnvironmentFirst,
        clean: true,
    }
}

#[test]
fn files_are_merged_in_flag_order() {
    let first = ini_file("[app]\nname = first\nport = 1\n");
    let second = ini_file("[app]\nname = second\n");

    let env = Composition::builder()
        .with_policy(clean(Repeats::KeepLast))
        .with_inputs(load_inputs(&[source(first.path()), source(second.path())]))
        .compose(&Snapshot::default());

    assert_eq!(env, ["app.name=second", "app.port=1"]);
}

#[test]
fn unreadable_file_is_skipped() {
    let good = ini_file("k = v\n");

    let env = Composition::builder()
        .with_policy(clean(Repeats::default()))
        .with_inputs(load_inputs(&[
            InputSource::File("/nonexistent/inienv/a.ini".into()),
            source(good.path()),
        ]))
        .compose(&Snapshot::default());

    assert_eq!(env, ["k=v"]);
}

#[test]
fn multi_line_values_survive() {
    let file = ini_file("[section]\nkey = \"value\"\nwith-newlines = \"value\nwith\nnewlines\"\n");

    let env = Composition::builder()
        .with_policy(clean(Repeats::default()))
        .with_assignment("thing.var=value")
        .with_inputs(load_inputs(&[source(file.path())]))
        .compose(&Snapshot::default());

    assert_eq!(
        env,
        [
            "section.key=value",
            "section.with-newlines=value\nwith\nnewlines",
            "thing.var=value",
        ]
    );
}

#[test]
fn reader_settings_shape_keys() {
    let file = ini_file("[Db]\nHost = local\n");

    let env = Composition::builder()
        .with_policy(clean(Repeats::default()))
        .with_reader(Reader::new("_", KeyCase::Upper))
        .with_inputs(load_inputs(&[source(file.path())]))
        .compose(&Snapshot::default());

    assert_eq!(env, ["DB_HOST=local"]);
}

#[test]
fn ambient_environment_and_imports() {
    let snapshot = Snapshot::from_environ(["HOME=/home/me", "APP_MODE=dev", "APP_PORT=80", "TERM=xterm"]);
    let file = ini_file("APP_PORT = 8080\n");

    let env = Composition::builder()
        .with_policy(Policy {
            repeats: Repeats::KeepLast,
            ..Policy::default()
        })
        .with_imports(["HOME", "APP_*"])
        .with_inputs(load_inputs(&[source(file.path())]))
        .compose(&snapshot);

    assert_eq!(env, ["APP_MODE=dev", "APP_PORT=8080", "HOME=/home/me"]);
}

#[test]
fn joined_values_across_sources() {
    let snapshot = Snapshot::from_environ(["PATH=/usr/bin"]);
    let file = ini_file("PATH = /opt/bin\n");

    let env = Composition::builder()
        .with_policy(Policy {
            repeats: Repeats::Join(":".into()),
            order: MergeOrder::FilesFirst,
            clean: false,
        })
        .with_assignment("PATH=/custom/bin")
        .with_inputs(load_inputs(&[source(file.path())]))
        .compose(&snapshot);

    assert_eq!(env, ["PATH=/opt/bin:/custom/bin:/usr/bin"]);
}
