/// Human-readable clash messages built from detector output
use super::days::day_name;
use super::types::ConflictPair;

/// One line per overlapping slot pair of a single conflict.
pub fn describe(pair: &ConflictPair) -> Vec<String> {
    pair.overlaps
        .iter()
        .map(|overlap| {
            format!(
                "{} and {} clash on {} {}-{}",
                pair.first_code,
                pair.second_code,
                day_name(overlap.window.day),
                overlap.window.start,
                overlap.window.end
            )
        })
        .collect()
}

/// All clash lines for a detector result, in detector order.
pub fn summarize(conflicts: &[ConflictPair]) -> Vec<String> {
    conflicts.iter().flat_map(describe).collect()
}
