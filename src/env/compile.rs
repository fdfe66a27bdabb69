use super::accumulator::Accumulator;
use super::policy::Repeats;

/// Flattens `acc` into `KEY=VALUE` entries, one per key.
///
/// The result is sorted by the whole entry string, not by key alone: `A.B=y`
/// sorts before `A=z` because `.` is less than `=`.
pub fn compile(acc: &Accumulator, repeats: &Repeats) -> Vec<String> {
    let mut env: Vec<String> = acc
        .iter()
        .filter_map(|(key, values)| {
            let value = match repeats {
                Repeats::KeepFirst => values.first()?.clone(),
                Repeats::KeepLast => values.last()?.clone(),
                Repeats::Join(separator) => values.join(separator),
            };
            Some(format!("{key}={value}"))
        })
        .collect();
    env.sort();
    env
}
