#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopGameTimer {
    pub game_id: String,
    pub at: i64,
}
