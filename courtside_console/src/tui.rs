use console::Style;
use enum_map::EnumMap;
use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::courtside_prelude::*;


fn side_style(side: Side) -> Style {
    match side {
        Side::Home => Style::new().cyan(),
        Side::Away => Style::new().magenta(),
    }
}

fn kind_style(kind: EventKind) -> Style {
    match kind {
        EventKind::Goal2 | EventKind::Goal3 => Style::new().green().bold(),
        EventKind::Foul => Style::new().red(),
        EventKind::Timeout => Style::new().yellow(),
        EventKind::End => Style::new().magenta().bold(),
        EventKind::Comment => Style::new().italic(),
        _ => Style::new().dim(),
    }
}

fn render_status(status: MatchStatus) -> String {
    match status {
        MatchStatus::Running => Style::new().green().apply_to("match is live").to_string(),
        MatchStatus::Paused => Style::new().yellow().apply_to("paused").to_string(),
        MatchStatus::Stopped => Style::new().dim().apply_to("stopped").to_string(),
    }
}

pub fn render_scoreboard(view: &ScoreboardView, teams: &EnumMap<Side, TeamConfig>) -> String {
    let score_line = Side::iter()
        .map(|side| {
            format!(
                "{} {}",
                side_style(side).bold().apply_to(&teams[side].name),
                Style::new().bold().apply_to(view.scores[side]),
            )
        })
        .join("  :  ");
    format!(
        "{}\nPeriod {}/{}   {}   [{}]\nBy period: {}\nFouls {}-{}   Timeouts {}-{}   Events {}",
        score_line,
        view.current_period,
        view.max_periods,
        view.clock.ui_string(),
        render_status(view.status),
        view.period_summary,
        view.fouls[Side::Home],
        view.fouls[Side::Away],
        view.timeouts[Side::Home],
        view.timeouts[Side::Away],
        view.event_count,
    )
}

pub fn render_event(event: &Event) -> String {
    let player = match (&event.player, &event.player_number) {
        (Some(player), Some(number)) => format!("  ({player} #{number})"),
        (Some(player), None) => format!("  ({player})"),
        (None, Some(number)) => format!("  (#{number})"),
        (None, None) => String::new(),
    };
    // Pad before styling: escape codes would throw the column width off.
    let kind_label = format!("{:<10}", event.kind.to_string());
    format!(
        "{} P{}  {}  {}{}",
        duration_to_mss(event.match_time),
        event.period,
        kind_style(event.kind).apply_to(kind_label),
        event.description,
        player,
    )
}

// Newest first, like the ledger itself.
pub fn render_feed(ledger: &Ledger, limit: usize) -> String {
    ledger.entries().take(limit).map(render_event).join("\n")
}
