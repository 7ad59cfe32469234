use enum_map::EnumMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::team::Side;


// Running totals plus per-period splits. `record_points` is the only mutator,
// which keeps the invariant: each side's total equals the sum of that side's
// per-period entries.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSheet {
    totals: EnumMap<Side, u32>,
    by_period: Vec<EnumMap<Side, u32>>,
}

impl ScoreSheet {
    pub fn new(num_periods: u32) -> Self {
        ScoreSheet {
            totals: EnumMap::default(),
            by_period: vec![EnumMap::default(); num_periods as usize],
        }
    }

    pub fn total(&self, side: Side) -> u32 { self.totals[side] }
    pub fn totals(&self) -> EnumMap<Side, u32> { self.totals }
    pub fn num_periods(&self) -> u32 { self.by_period.len() as u32 }

    pub fn in_period(&self, side: Side, period: u32) -> u32 {
        self.by_period.get(period as usize - 1).map_or(0, |split| split[side])
    }

    pub fn record_points(&mut self, side: Side, period: u32, points: u32) {
        assert!(period >= 1 && period <= self.num_periods(), "period {period}");
        self.totals[side] += points;
        self.by_period[period as usize - 1][side] += points;
    }

    // "12-8 / 5-10", up to and including the given period.
    pub fn summary(&self, current_period: u32) -> String {
        self.by_period
            .iter()
            .take(current_period as usize)
            .map(|split| format!("{}-{}", split[Side::Home], split[Side::Away]))
            .join(" / ")
    }
}


#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn totals_match_period_sums() {
        let mut sheet = ScoreSheet::new(4);
        sheet.record_points(Side::Home, 1, 2);
        sheet.record_points(Side::Home, 1, 3);
        sheet.record_points(Side::Away, 2, 2);
        sheet.record_points(Side::Home, 4, 2);
        for side in Side::iter() {
            let sum: u32 = (1..=4).map(|p| sheet.in_period(side, p)).sum();
            assert_eq!(sheet.total(side), sum);
        }
        assert_eq!(sheet.total(Side::Home), 7);
        assert_eq!(sheet.total(Side::Away), 2);
        assert_eq!(sheet.in_period(Side::Home, 1), 5);
        assert_eq!(sheet.in_period(Side::Home, 2), 0);
    }

    #[test]
    fn summary_covers_played_periods_only() {
        let mut sheet = ScoreSheet::new(4);
        sheet.record_points(Side::Home, 1, 2);
        sheet.record_points(Side::Away, 2, 3);
        assert_eq!(sheet.summary(1), "2-0");
        assert_eq!(sheet.summary(2), "2-0 / 0-3");
        assert_eq!(sheet.summary(4), "2-0 / 0-3 / 0-0 / 0-0");
    }
}
