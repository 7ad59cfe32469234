use std::cmp;
use std::time::Duration;

use enum_map::EnumMap;
use instant::Instant;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::event::Ledger;
use crate::state::MatchState;
use crate::team::{Side, TeamConfig, default_teams};


pub const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(30);


// The stable on-disk contract: `{teams, matchState, ledger, savedAt}`.
// `teams`, `matchState` and `ledger` are all defaulted, so a partial snapshot
// overlays the initial defaults. Storage mechanics (where the bytes go) are
// the host's business.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSnapshot {
    #[serde(default = "default_teams")]
    pub teams: EnumMap<Side, TeamConfig>,
    #[serde(default)]
    pub match_state: MatchState,
    #[serde(default)]
    pub ledger: Ledger,
    #[serde(with = "time::serde::rfc3339", default = "OffsetDateTime::now_utc")]
    pub saved_at: OffsetDateTime,
}


// On-demand export for the file-emission collaborator. Same data as a
// snapshot; a separate type so the two contracts can evolve independently.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchExport {
    pub teams: EnumMap<Side, TeamConfig>,
    pub match_state: MatchState,
    pub ledger: Ledger,
    #[serde(with = "time::serde::rfc3339")]
    pub exported_at: OffsetDateTime,
}


// Tracks the fixed save cadence that runs while the match is live. The host
// reports completed saves and polls `due` from its tick loop.
#[derive(Clone, Copy, Debug)]
pub struct Autosave {
    latest_save: Instant,
}

impl Autosave {
    pub fn new(now: Instant) -> Self { Autosave { latest_save: now } }

    pub fn register_save(&mut self, now: Instant) {
        self.latest_save = cmp::max(self.latest_save, now);
    }

    pub fn due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.latest_save) >= AUTOSAVE_INTERVAL
    }
}
