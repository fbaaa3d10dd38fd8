// Shared builders for unit tests. Compiled only under cfg(test).

pub mod events;
pub mod games;
pub mod roster;
pub mod world;
