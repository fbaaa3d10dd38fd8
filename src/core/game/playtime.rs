// Player playtime accumulator.
//
// fold_elapsed is pure and is used both for live display (never persisted) and for committing
// a frozen value on stop, finish, or leaving the field. Committing must null the start instant
// in the same write; fold_and_stop builds that single patch.

use crate::core::game::change::LineupPatch;
use crate::core::game::lineup::LineupEntry;
use crate::core::game::state::seconds_between;

pub fn fold_elapsed(entry: &LineupEntry, now: i64) -> f64 {
    match entry.playtimer_started_at {
        Some(started_at) => entry.playtime_seconds + seconds_between(started_at, now),
        None => entry.playtime_seconds,
    }
}

/// Freeze a running personal clock. Returns None when the entry is not clocked.
pub fn fold_and_stop(entry: &LineupEntry, now: i64) -> Option<LineupPatch> {
    entry.playtimer_started_at?;
    let mut patch = LineupPatch::for_entry(&entry.entry_id);
    patch.playtime_seconds = Some(fold_elapsed(entry, now));
    patch.playtimer_started_at = Some(None);
    Some(patch)
}
