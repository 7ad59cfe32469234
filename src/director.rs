use std::cmp::{self, Ordering};
use std::time::Duration;

use enum_map::EnumMap;
use instant::Instant;
use time::OffsetDateTime;

use crate::clock::{ClockShowing, MatchDuration, WallClockAnchor};
use crate::display::ScoreboardView;
use crate::event::{Event, EventDraft, EventError, EventKind, Ledger};
use crate::persistence::{MatchExport, MatchSnapshot};
use crate::state::{DEFAULT_ADVANCE_DELAY, MatchSettings, MatchState, MatchStatus};
use crate::team::{EventTeam, Side, TeamConfig};


// The host polls `tick` at this cadence while the app runs.
pub const CLOCK_POLL_INTERVAL: Duration = Duration::from_millis(100);


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MatchOutcome {
    Victory(Side),
    Draw,
}


// Single owner of the match state and the event ledger. Operations mutate
// state, append to the ledger and hand the new events back, so the host can
// render and persist them incrementally. Everything time-dependent takes
// `now` as an argument; the director never reads the clock itself.
pub struct MatchDirector {
    teams: EnumMap<Side, TeamConfig>,
    state: MatchState,
    ledger: Ledger,
    advance_delay: Duration,
    // Pairs the wall clock with the period clock while ticking; `None` while
    // paused or stopped.
    anchor: Option<WallClockAnchor>,
    // Deadline of a scheduled period switch. While `Some`, period-end
    // detection is suppressed, which makes the boundary edge-triggered.
    pending_advance: Option<Instant>,
}

impl MatchDirector {
    pub fn new(teams: EnumMap<Side, TeamConfig>) -> Self {
        Self::with_settings(teams, MatchSettings::default())
    }

    pub fn with_settings(teams: EnumMap<Side, TeamConfig>, settings: MatchSettings) -> Self {
        MatchDirector {
            teams,
            state: MatchState::new(&settings),
            ledger: Ledger::new(),
            advance_delay: settings.advance_delay,
            anchor: None,
            pending_advance: None,
        }
    }

    // The snapshot has no wall-clock anchor; a match saved as running
    // re-anchors on the next `start` or `tick` and resumes from the saved
    // clock value.
    pub fn from_snapshot(snapshot: MatchSnapshot) -> Self {
        MatchDirector {
            teams: snapshot.teams,
            state: snapshot.match_state,
            ledger: snapshot.ledger,
            advance_delay: DEFAULT_ADVANCE_DELAY,
            anchor: None,
            pending_advance: None,
        }
    }

    pub fn teams(&self) -> &EnumMap<Side, TeamConfig> { &self.teams }
    pub fn team_config_mut(&mut self, side: Side) -> &mut TeamConfig { &mut self.teams[side] }
    pub fn state(&self) -> &MatchState { &self.state }
    pub fn ledger(&self) -> &Ledger { &self.ledger }
    pub fn status(&self) -> MatchStatus { self.state.status() }

    // Live period clock, clamped to the period bound.
    pub fn current_time(&self, now: Instant) -> MatchDuration {
        match self.anchor {
            Some(anchor) => cmp::min(anchor.clock_at(now), self.state.period_duration),
            None => self.state.clock,
        }
    }

    pub fn outcome(&self) -> MatchOutcome {
        let home = self.state.scores.total(Side::Home);
        let away = self.state.scores.total(Side::Away);
        match home.cmp(&away) {
            Ordering::Greater => MatchOutcome::Victory(Side::Home),
            Ordering::Less => MatchOutcome::Victory(Side::Away),
            Ordering::Equal => MatchOutcome::Draw,
        }
    }

    // Stopped -> Running (fresh start or continuation after an end) and
    // Paused -> Running (resume). No-op while already running, so repeated
    // start requests cannot produce duplicate events.
    pub fn start(&mut self, now: Instant) -> Option<Event> {
        if !self.state.running {
            self.state.running = true;
            self.state.paused = false;
            self.anchor = Some(WallClockAnchor::new(now, self.state.clock));
            Some(self.apply(EventDraft::new(EventKind::Start, EventTeam::Both), now))
        } else if self.state.paused {
            self.state.paused = false;
            self.anchor = Some(WallClockAnchor::new(now, self.state.clock));
            Some(self.apply(EventDraft::new(EventKind::Resume, EventTeam::Both), now))
        } else {
            None
        }
    }

    // Valid only from Running: banks the live clock value and freezes it.
    pub fn pause(&mut self, now: Instant) -> Option<Event> {
        if self.state.running && !self.state.paused {
            self.sync_clock(now);
            self.state.paused = true;
            self.anchor = None;
            Some(self.apply(EventDraft::new(EventKind::Pause, EventTeam::Both), now))
        } else {
            None
        }
    }

    // Back to initial defaults, keeping the configured period geometry and
    // the team configuration. The ledger is cleared first, so the `reset`
    // event gets id 1. Confirmation is the host's job.
    pub fn reset(&mut self, now: Instant) -> Event {
        let settings = MatchSettings {
            max_periods: self.state.max_periods,
            period_duration: self.state.period_duration,
            advance_delay: self.advance_delay,
        };
        self.state = MatchState::new(&settings);
        self.ledger.clear();
        self.anchor = None;
        self.pending_advance = None;
        log::info!("Match reset");
        self.apply(EventDraft::new(EventKind::Reset, EventTeam::Both), now)
    }

    // Next period, or the end of the match from the final period. The new
    // period starts with a zeroed clock and keeps scores and team stats.
    pub fn advance_period(&mut self, now: Instant) -> Event {
        self.pending_advance = None;
        if self.state.current_period < self.state.max_periods {
            self.state.current_period += 1;
            self.state.clock = MatchDuration::ZERO;
            self.anchor = (self.state.running && !self.state.paused)
                .then_some(WallClockAnchor::new(now, MatchDuration::ZERO));
            log::info!("Period {} begins", self.state.current_period);
            self.apply(EventDraft::new(EventKind::Period, EventTeam::Both), now)
        } else {
            self.end(now)
        }
    }

    pub fn end(&mut self, now: Instant) -> Event {
        self.pending_advance = None;
        self.sync_clock(now);
        self.state.running = false;
        self.state.paused = false;
        self.anchor = None;
        let home = self.state.scores.total(Side::Home);
        let away = self.state.scores.total(Side::Away);
        let description = match self.outcome() {
            MatchOutcome::Victory(side) => {
                format!("Full time! {} wins {}-{}", self.teams[side].name, home, away)
            }
            MatchOutcome::Draw => format!("Full time! Draw {}-{}", home, away),
        };
        log::info!("{}", description);
        self.apply(EventDraft::new(EventKind::End, EventTeam::Both).describe(description), now)
    }

    // The 100 ms poll body. Returns the produced events oldest first. One
    // call can produce two events: `period_end` + `end` in the final period.
    pub fn tick(&mut self, now: Instant) -> Vec<Event> {
        let mut events = Vec::new();
        // The scheduled period switch fires even while paused, like the
        // one-shot timer it stands for.
        if let Some(due) = self.pending_advance {
            if now >= due {
                events.push(self.advance_period(now));
            }
        }
        if !self.state.running || self.state.paused {
            return events;
        }
        self.sync_clock(now);
        if self.state.clock >= self.state.period_duration && self.pending_advance.is_none() {
            events.push(self.apply(EventDraft::new(EventKind::PeriodEnd, EventTeam::Both), now));
            if self.state.in_final_period() {
                events.push(self.end(now));
            } else {
                self.pending_advance = Some(now + self.advance_delay);
            }
        }
        events
    }

    // Generic append. Host input comes through here unchanged, so the draft
    // is validated even when it was built programmatically.
    pub fn record(&mut self, draft: EventDraft, now: Instant) -> Result<Event, EventError> {
        if draft.kind.is_goal() && draft.team.side().is_none() {
            return Err(EventError::TeamRequired(draft.kind));
        }
        Ok(self.apply(draft, now))
    }

    // Shorthand for recording a scoring play with no metadata. Requires a
    // started match; a stoppage (Paused) still counts as started.
    pub fn quick_score(
        &mut self, side: Side, points: u32, now: Instant,
    ) -> Result<Event, EventError> {
        if !self.state.running {
            return Err(EventError::MatchNotStarted);
        }
        let kind =
            EventKind::goal_for_points(points).ok_or(EventError::UnsupportedPoints(points))?;
        self.record(EventDraft::new(kind, side.into()), now)
    }

    pub fn view(&self, now: Instant) -> ScoreboardView {
        let status = self.status();
        ScoreboardView {
            status,
            scores: self.state.scores.totals(),
            current_period: self.state.current_period,
            max_periods: self.state.max_periods,
            clock: ClockShowing::new(self.current_time(now), status == MatchStatus::Running),
            period_summary: self.state.scores.summary(self.state.current_period),
            fouls: self.state.fouls,
            timeouts: self.state.timeouts,
            event_count: self.ledger.len(),
        }
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            teams: self.teams.clone(),
            match_state: self.state.clone(),
            ledger: self.ledger.clone(),
            saved_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn export(&self) -> MatchExport {
        MatchExport {
            teams: self.teams.clone(),
            match_state: self.state.clone(),
            ledger: self.ledger.clone(),
            exported_at: OffsetDateTime::now_utc(),
        }
    }

    fn sync_clock(&mut self, now: Instant) {
        if self.state.running && !self.state.paused {
            if self.anchor.is_none() {
                // Restored from a snapshot mid-run: resume from the saved
                // value rather than jumping by the downtime.
                self.anchor = Some(WallClockAnchor::new(now, self.state.clock));
            }
            self.state.clock = self.current_time(now);
        }
    }

    // The single path every event takes: side effects, id, timestamps, feed
    // order. Only `record` can refuse a draft; by the time a draft gets
    // here it is known to be applicable.
    fn apply(&mut self, draft: EventDraft, now: Instant) -> Event {
        let match_time =
            if self.state.running { self.current_time(now) } else { MatchDuration::ZERO };
        let points = draft.kind.points();
        if let Some(side) = draft.team.side() {
            match draft.kind {
                EventKind::Goal2 | EventKind::Goal3 => {
                    self.state.scores.record_points(side, self.state.current_period, points);
                }
                EventKind::Foul => self.state.fouls[side] += 1,
                EventKind::Timeout => self.state.timeouts[side] += 1,
                _ => {}
            }
        }
        let description = draft
            .description
            .unwrap_or_else(|| self.default_description(draft.kind, draft.team));
        let event = Event {
            id: self.ledger.assign_id(),
            created_at: OffsetDateTime::now_utc(),
            match_time,
            period: self.state.current_period,
            kind: draft.kind,
            team: draft.team,
            player: draft.player,
            player_number: draft.player_number,
            description,
            points,
        };
        self.ledger.push(event.clone());
        event
    }

    fn default_description(&self, kind: EventKind, team: EventTeam) -> String {
        let named = |label: &str| match team.side() {
            Some(side) => format!("{}, {}", label, self.teams[side].name),
            None => label.to_owned(),
        };
        match kind {
            EventKind::Start | EventKind::Period => {
                format!("Start of period {}", self.state.current_period)
            }
            EventKind::Resume => "Match resumed".to_owned(),
            EventKind::Pause => "Match paused".to_owned(),
            EventKind::Reset => "Match reset".to_owned(),
            EventKind::PeriodEnd => format!("End of period {}", self.state.current_period),
            EventKind::End => "Full time!".to_owned(),
            EventKind::Goal2 | EventKind::Goal3 => match team.side() {
                Some(side) => {
                    format!("{} points for {}", kind.points(), self.teams[side].name)
                }
                None => format!("{}-point play", kind.points()),
            },
            EventKind::Foul => named("Foul"),
            EventKind::Timeout => named("Timeout"),
            EventKind::Comment => String::new(),
        }
    }
}
