use std::time::Duration;

use enum_map::EnumMap;
use serde::{Deserialize, Serialize};

use crate::clock::MatchDuration;
use crate::scores::ScoreSheet;
use crate::team::Side;


pub const DEFAULT_MAX_PERIODS: u32 = 4;
pub const DEFAULT_PERIOD_DURATION: MatchDuration = MatchDuration::from_mins(10);
// How long the period switch lingers after `period_end` so the feed can
// settle before the next period begins. Cosmetic pacing.
pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_secs(1);


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MatchSettings {
    pub max_periods: u32,
    pub period_duration: MatchDuration,
    pub advance_delay: Duration,
}

impl Default for MatchSettings {
    fn default() -> Self {
        MatchSettings {
            max_periods: DEFAULT_MAX_PERIODS,
            period_duration: DEFAULT_PERIOD_DURATION,
            advance_delay: DEFAULT_ADVANCE_DELAY,
        }
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MatchStatus {
    Stopped,
    Running,
    Paused,
}


// The full persisted match record. Every field has a default, so a partial
// snapshot overlays the initial state. An ended match is stored with
// `running = false`; only `MatchDirector` distinguishes it from one that
// never started, via the ledger.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchState {
    pub running: bool,
    // `paused` implies `running`.
    pub paused: bool,
    // Elapsed time in the current period: the live value while ticking, the
    // last banked value otherwise. Always within [0, period_duration].
    pub clock: MatchDuration,
    pub current_period: u32,
    pub max_periods: u32,
    pub period_duration: MatchDuration,
    pub scores: ScoreSheet,
    pub fouls: EnumMap<Side, u32>,
    pub timeouts: EnumMap<Side, u32>,
}

impl Default for MatchState {
    fn default() -> Self { MatchState::new(&MatchSettings::default()) }
}

impl MatchState {
    pub fn new(settings: &MatchSettings) -> Self {
        MatchState {
            running: false,
            paused: false,
            clock: MatchDuration::ZERO,
            current_period: 1,
            max_periods: settings.max_periods,
            period_duration: settings.period_duration,
            scores: ScoreSheet::new(settings.max_periods),
            fouls: EnumMap::default(),
            timeouts: EnumMap::default(),
        }
    }

    pub fn status(&self) -> MatchStatus {
        if self.running && !self.paused {
            MatchStatus::Running
        } else if self.paused {
            MatchStatus::Paused
        } else {
            MatchStatus::Stopped
        }
    }

    pub fn in_final_period(&self) -> bool { self.current_period >= self.max_periods }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_defaults() {
        let state = MatchState::default();
        assert_eq!(state.status(), MatchStatus::Stopped);
        assert_eq!(state.current_period, 1);
        assert_eq!(state.max_periods, 4);
        assert_eq!(state.period_duration, MatchDuration::from_mins(10));
        assert_eq!(state.clock, MatchDuration::ZERO);
        assert_eq!(state.scores.total(Side::Home), 0);
        assert_eq!(state.fouls[Side::Home], 0);
        assert_eq!(state.timeouts[Side::Away], 0);
    }

    #[test]
    fn status_from_flags() {
        let mut state = MatchState::default();
        state.running = true;
        assert_eq!(state.status(), MatchStatus::Running);
        state.paused = true;
        assert_eq!(state.status(), MatchStatus::Paused);
        state.running = false;
        state.paused = false;
        assert_eq!(state.status(), MatchStatus::Stopped);
    }
}
