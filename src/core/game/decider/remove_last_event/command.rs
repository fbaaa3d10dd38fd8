// Command data type for the "decrement" action: drop the most recent event of one side and type.

use crate::core::game::event::EventType;
use crate::core::game::state::Side;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveLastEvent {
    pub game_id: String,
    pub side: Side,
    pub event_type: EventType,
    pub confirmed: bool,
}
