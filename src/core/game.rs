// This module groups the live game components.
//
// Structure
// - state.rs: the game record, its clock phase and schedule details
// - lineup.rs: per-game lineup entries
// - event.rs: goals and single-sided substitutions
// - change.rs: patches deciders emit and their persisted counterparts
// - sheet.rs + evolve.rs: the mirrored game sheet and how persisted changes fold into it
// - playtime.rs: personal playtime folding
// - decider/: pure decision logic per command intent
// - live.rs: the live board recomputed at a given instant
// - report.rs: score, tallies, minute labels and the post-game summary

pub mod change;
pub mod decider;
pub mod event;
pub mod evolve;
pub mod lineup;
pub mod live;
pub mod playtime;
pub mod report;
pub mod sheet;
pub mod state;
