use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use time::OffsetDateTime;

use crate::clock::MatchDuration;
use crate::team::EventTeam;


#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    // Lifecycle.
    Start,
    Resume,
    Pause,
    Reset,
    Period,
    PeriodEnd,
    End,
    // Scoring and team stats.
    Goal2,
    Goal3,
    Foul,
    Timeout,
    // Narrative only.
    Comment,
}

impl EventKind {
    pub fn points(self) -> u32 {
        match self {
            EventKind::Goal2 => 2,
            EventKind::Goal3 => 3,
            _ => 0,
        }
    }

    pub fn is_goal(self) -> bool { matches!(self, EventKind::Goal2 | EventKind::Goal3) }

    pub fn goal_for_points(points: u32) -> Option<EventKind> {
        match points {
            2 => Some(EventKind::Goal2),
            3 => Some(EventKind::Goal3),
            _ => None,
        }
    }
}


// Immutable once created. Construction goes through `MatchDirector`, which
// assigns the id and the timestamps and applies score/stat side effects.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    // Period clock at creation; zero if the match was not running.
    pub match_time: MatchDuration,
    pub period: u32,
    pub kind: EventKind,
    pub team: EventTeam,
    #[serde(default)]
    pub player: Option<String>,
    #[serde(default)]
    pub player_number: Option<String>,
    pub description: String,
    pub points: u32,
}


// What the caller knows before the ledger fills in the rest. A missing
// description is synthesized from the kind and the team names.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EventDraft {
    pub kind: EventKind,
    pub team: EventTeam,
    pub player: Option<String>,
    pub player_number: Option<String>,
    pub description: Option<String>,
}

impl EventDraft {
    pub fn new(kind: EventKind, team: EventTeam) -> Self {
        EventDraft {
            kind,
            team,
            player: None,
            player_number: None,
            description: None,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EventError {
    // Scoring needs to know which team to credit.
    TeamRequired(EventKind),
    // Quick score covers regular 2- and 3-point plays only.
    UnsupportedPoints(u32),
    // Scoring plays require a started match.
    MatchNotStarted,
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::TeamRequired(kind) => {
                write!(f, "A '{kind}' event needs a team: home or away")
            }
            EventError::UnsupportedPoints(points) => {
                write!(f, "Cannot quick-score {points} points, only 2 or 3")
            }
            EventError::MatchNotStarted => write!(f, "The match must be started first"),
        }
    }
}


// Append-only, newest-first. The id counter is part of the persisted state,
// so ids are never reused, not even across a save/load cycle.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ledger {
    next_id: u64,
    entries: VecDeque<Event>,
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger {
            next_id: 1,
            entries: VecDeque::new(),
        }
    }
}

impl Ledger {
    pub fn new() -> Self { Self::default() }

    pub fn next_id(&self) -> u64 { self.next_id }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    // Newest first.
    pub fn entries(&self) -> impl Iterator<Item = &Event> + '_ { self.entries.iter() }
    pub fn latest(&self) -> Option<&Event> { self.entries.front() }

    pub(crate) fn assign_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn push(&mut self, event: Event) {
        debug_assert!(self.entries.front().is_none_or(|latest| latest.id < event.id));
        self.entries.push_front(event);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.next_id = 1;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: u64) -> Event {
        Event {
            id,
            created_at: OffsetDateTime::UNIX_EPOCH,
            match_time: MatchDuration::ZERO,
            period: 1,
            kind: EventKind::Comment,
            team: EventTeam::Both,
            player: None,
            player_number: None,
            description: String::new(),
            points: 0,
        }
    }

    #[test]
    fn ids_are_monotonic_and_reset_by_clear() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.assign_id(), 1);
        assert_eq!(ledger.assign_id(), 2);
        ledger.push(event(1));
        ledger.push(event(2));
        assert_eq!(ledger.latest().unwrap().id, 2);
        ledger.clear();
        assert!(ledger.is_empty());
        assert_eq!(ledger.next_id(), 1);
    }

    #[test]
    fn kind_wire_names() {
        assert_eq!(serde_json::to_value(EventKind::PeriodEnd).unwrap(), "period_end");
        assert_eq!(serde_json::to_value(EventKind::Goal3).unwrap(), "goal3");
        assert_eq!("period_end".parse::<EventKind>(), Ok(EventKind::PeriodEnd));
        assert_eq!("goal2".parse::<EventKind>(), Ok(EventKind::Goal2));
    }

    #[test]
    fn goal_kind_from_points() {
        assert_eq!(EventKind::goal_for_points(2), Some(EventKind::Goal2));
        assert_eq!(EventKind::goal_for_points(3), Some(EventKind::Goal3));
        assert_eq!(EventKind::goal_for_points(1), None);
        assert_eq!(EventKind::Goal3.points(), 3);
    }
}
