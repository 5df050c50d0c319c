use crate::state::MatchSummary;

/// Matches that have not started yet, in input order.
pub fn upcoming(all: &[MatchSummary]) -> Vec<&MatchSummary> {
    all.iter().filter(|m| !m.match_started).collect()
}

/// Finished matches from the full listing followed by in-progress matches
/// from the current listing. A fixture present in both sources appears
/// twice; callers render the concatenation as-is.
pub fn completed<'a>(
    all: &'a [MatchSummary],
    current: &'a [MatchSummary],
) -> Vec<&'a MatchSummary> {
    all.iter()
        .filter(|m| m.match_ended)
        .chain(current.iter().filter(|m| m.match_started))
        .collect()
}
