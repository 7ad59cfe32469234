use enum_map::EnumMap;

use crate::clock::ClockShowing;
use crate::state::MatchStatus;
use crate::team::Side;


// Read-only snapshot handed to the renderer after every state-changing
// operation and every clock tick. Newly appended events travel separately,
// as the operations' return values, for incremental feed rendering.
#[derive(Clone, Debug)]
pub struct ScoreboardView {
    pub status: MatchStatus,
    pub scores: EnumMap<Side, u32>,
    pub current_period: u32,
    pub max_periods: u32,
    pub clock: ClockShowing,
    pub period_summary: String,
    pub fouls: EnumMap<Side, u32>,
    pub timeouts: EnumMap<Side, u32>,
    pub event_count: usize,
}
