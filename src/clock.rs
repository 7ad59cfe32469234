use std::time::Duration;
use std::{fmt, iter, ops};

use instant::Instant;
use serde::{Deserialize, Serialize};


const MILLIS_PER_SEC: u64 = 1000;

// Duration with milliseconds precision. This is the precision we keep in
// snapshots; by rounding all match time to milliseconds we ensure that
// save/load round-trips are exact, without any weird rounding effects.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MatchDuration {
    ms: u64,
}

impl MatchDuration {
    pub const ZERO: Self = MatchDuration { ms: 0 };

    pub const fn from_millis(ms: u64) -> Self { MatchDuration { ms } }
    pub const fn from_secs(s: u64) -> Self { MatchDuration::from_millis(s * MILLIS_PER_SEC) }
    pub const fn from_mins(m: u64) -> Self { MatchDuration::from_secs(m * 60) }

    pub fn is_zero(self) -> bool { self.ms == 0 }
    pub fn as_millis(self) -> u64 { self.ms }
    pub fn whole_seconds(self) -> u64 { self.ms / MILLIS_PER_SEC }
    pub fn subsec_millis(self) -> u64 { self.ms % MILLIS_PER_SEC }
    pub fn saturating_sub(self, other: Self) -> Self {
        MatchDuration { ms: self.ms.saturating_sub(other.ms) }
    }
}

impl ops::Add for MatchDuration {
    type Output = Self;
    fn add(self, other: Self) -> Self { MatchDuration { ms: self.ms + other.ms } }
}
impl iter::Sum for MatchDuration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(MatchDuration::ZERO, ops::Add::add)
    }
}

impl From<Duration> for MatchDuration {
    fn from(d: Duration) -> Self { MatchDuration::from_millis(d.as_millis() as u64) }
}
impl From<MatchDuration> for Duration {
    fn from(d: MatchDuration) -> Self { Duration::from_millis(d.as_millis()) }
}

pub fn duration_to_mss(d: MatchDuration) -> String {
    let mut ret = String::new();
    format_duration_to_mss(d, &mut ret).unwrap();
    ret
}

fn format_duration_to_mss(d: MatchDuration, f: &mut impl fmt::Write) -> fmt::Result {
    let s = d.whole_seconds();
    write!(f, "{:02}:{:02}", s / 60, s % 60)
}


// We want to do something like
//   period_start = Instant::now() - elapsed
// when the clock resumes, but this could panic because Rust doesn't allow for
// negative instants. So the live clock is a wall-clock instant paired with the
// match clock value at that instant, extrapolated forward only.
#[derive(Clone, Copy, Debug)]
pub struct WallClockAnchor {
    wall: Instant,
    clock: MatchDuration,
}

impl WallClockAnchor {
    pub fn new(wall: Instant, clock: MatchDuration) -> Self { WallClockAnchor { wall, clock } }

    pub fn clock_at(self, now: Instant) -> MatchDuration {
        self.clock + now.saturating_duration_since(self.wall).into()
    }
}


// What the scoreboard clock shows: a counting-up mm:ss whose separator blinks
// at 1 Hz while the clock ticks.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ClockShowing {
    pub is_ticking: bool,
    pub show_separator: bool,
    pub minutes: u64,
    pub seconds: u64,
}

impl ClockShowing {
    pub fn new(time: MatchDuration, is_ticking: bool) -> Self {
        let show_separator = !is_ticking || time.subsec_millis() < 500;
        let s = time.whole_seconds();
        ClockShowing {
            is_ticking,
            show_separator,
            minutes: s / 60,
            seconds: s % 60,
        }
    }

    // Includes a space in place of the separator so the string width is stable.
    pub fn ui_string(&self) -> String {
        let separator = if self.show_separator { ":" } else { " " };
        format!("{:02}{}{:02}", self.minutes, separator, self.seconds)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mss_formatting() {
        let cases = [
            (0, "00:00"),
            (999, "00:00"),
            (1_000, "00:01"),
            (59_999, "00:59"),
            (60_000, "01:00"),
            (61_500, "01:01"),
            (600_000, "10:00"),
            (3_599_000, "59:59"),
        ];
        for (millis, expected) in cases {
            assert_eq!(duration_to_mss(MatchDuration::from_millis(millis)), expected);
        }
    }

    #[test]
    fn separator_blinks_only_while_ticking() {
        let showing = ClockShowing::new(MatchDuration::from_millis(61_700), true);
        assert!(!showing.show_separator);
        assert_eq!(showing.ui_string(), "01 01");

        let showing = ClockShowing::new(MatchDuration::from_millis(61_700), false);
        assert!(showing.show_separator);
        assert_eq!(showing.ui_string(), "01:01");

        let showing = ClockShowing::new(MatchDuration::from_millis(61_200), true);
        assert!(showing.show_separator);
        assert_eq!(showing.ui_string(), "01:01");
    }

    #[test]
    fn anchor_extrapolation() {
        let t0 = Instant::now();
        let anchor = WallClockAnchor::new(t0, MatchDuration::from_secs(90));
        assert_eq!(anchor.clock_at(t0), MatchDuration::from_secs(90));
        assert_eq!(
            anchor.clock_at(t0 + Duration::from_millis(2_500)),
            MatchDuration::from_millis(92_500)
        );
    }
}
