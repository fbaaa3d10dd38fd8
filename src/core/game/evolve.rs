// Evolve function: fold a persisted change into a game sheet.
//
// Purpose
// - Keep the in-memory mirror identical to what the store accepted.
//
// Boundaries
// - No input or output. No side effects.
//
// Testing guidance
// - Applying the changes a decider produced, as returned by the store, yields the expected sheet.

use crate::core::game::change::AppliedChange;
use crate::core::game::sheet::GameSheet;

pub fn evolve(mut sheet: GameSheet, change: AppliedChange) -> GameSheet {
    match change {
        AppliedChange::GameUpdated(patch) => patch.apply_to(&mut sheet.game),
        AppliedChange::LineupUpdated(patches) => {
            for patch in &patches {
                if let Some(entry) = sheet
                    .lineup
                    .iter_mut()
                    .find(|entry| entry.entry_id == patch.entry_id)
                {
                    patch.apply_to(entry);
                }
            }
        }
        AppliedChange::LineupCleared => sheet.lineup.clear(),
        AppliedChange::LineupCreated(entries) => sheet.lineup.extend(entries),
        AppliedChange::EventAppended(event) => {
            if !sheet.events.iter().any(|known| known.event_id == event.event_id) {
                sheet.events.push(event);
            }
        }
        AppliedChange::EventRemoved { event_id } => {
            sheet.events.retain(|event| event.event_id != event_id)
        }
        AppliedChange::EventsCleared => sheet.events.clear(),
    }
    sheet
}
