use toml::{Table, Value};

/// Merges `PREFIX<sep>SEGMENT<sep>...` variables into `table`.
///
/// Variables are mapped to config paths by:
/// 1. Removing the prefix and separator
/// 2. Splitting remaining segments on the separator
/// 3. Converting path segments to lowercase
///
/// `true`/`false` (any case) become booleans; every other value stays a
/// string, so separators such as `1` or `0` survive unchanged.
pub fn load_env_vars<'a, I>(table: &mut Table, prefix: &str, separator: &str, vars: I)
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let prefix_with_sep = format!("{prefix}{separator}");

    for (key, value) in vars {
        let Some(path_str) = key.strip_prefix(&prefix_with_sep) else {
            continue;
        };
        if path_str.is_empty() {
            continue;
        }

        let path: Vec<String> = path_str
            .split(separator)
            .map(|s| s.to_lowercase())
            .collect();
        insert_at_path(table, &path, coerce_value(value));
    }
}

fn insert_at_path(table: &mut Table, path: &[String], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        return;
    };

    if rest.is_empty() {
        table.insert(first.clone(), value);
        return;
    }

    if !matches!(table.get(first), Some(Value::Table(_))) {
        table.insert(first.clone(), Value::Table(Table::new()));
    }

    if let Some(Value::Table(nested)) = table.get_mut(first) {
        insert_at_path(nested, rest, value);
    }
}

fn coerce_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }
    Value::String(s.to_string())
}
