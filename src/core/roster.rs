// Team roster outside live games: players, their planning placement and saved lineups.

pub mod decider;
pub mod player;
pub mod saved_lineup;
