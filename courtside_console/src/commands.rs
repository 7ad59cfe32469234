use crate::courtside_prelude::*;

// A parsed operator line. Parsing is lenient about shape but strict about
// vocabulary; the director re-validates every draft anyway, so nothing here
// is trusted.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command {
    Start,
    Pause,
    NextPeriod,
    Reset,
    End,
    QuickScore { side: Side, points: u32 },
    Record(EventDraft),
    TeamName { side: Side, name: String },
    Save,
    Export,
    Help,
    Quit,
}

pub fn help_text() -> &'static str {
    "start | pause | next | end | reset | save | export | quit\n\
     2 <home|away>, 3 <home|away>  quick score\n\
     <kind> <home|away|both> [#<no>] [player] [- <description>]\n\
     kinds: goal2 goal3 foul timeout comment\n\
     comment <text>  free-text feed entry\n\
     team <home|away> <name>  rename a team"
}

pub fn parse(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = words.first() else {
        return Err("Empty command".to_owned());
    };
    match head {
        "start" => Ok(Command::Start),
        "pause" => Ok(Command::Pause),
        "next" | "period" => Ok(Command::NextPeriod),
        "reset" => Ok(Command::Reset),
        "end" => Ok(Command::End),
        "save" => Ok(Command::Save),
        "export" => Ok(Command::Export),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "2" | "3" => {
            let points = if head == "2" { 2 } else { 3 };
            let side = parse_side(words.get(1).copied())?;
            Ok(Command::QuickScore { side, points })
        }
        "team" => {
            let side = parse_side(words.get(1).copied())?;
            if words.len() < 3 {
                return Err("'team' needs a new name".to_owned());
            }
            Ok(Command::TeamName { side, name: words[2..].join(" ") })
        }
        "comment" => {
            if words.len() < 2 {
                return Err("'comment' needs some text".to_owned());
            }
            let draft = EventDraft::new(EventKind::Comment, EventTeam::Both)
                .describe(words[1..].join(" "));
            Ok(Command::Record(draft))
        }
        kind_word => {
            let kind: EventKind = kind_word
                .parse()
                .map_err(|_| format!("Unknown command: '{kind_word}' (try 'help')"))?;
            Ok(Command::Record(parse_draft(kind, &words[1..])?))
        }
    }
}

fn parse_side(word: Option<&str>) -> Result<Side, String> {
    let Some(word) = word else {
        return Err("Which team? Say 'home' or 'away'".to_owned());
    };
    word.parse().map_err(|_| format!("Unknown team '{word}': say 'home' or 'away'"))
}

// `<team> [#<no>] [player words] [- description words]`.
fn parse_draft(kind: EventKind, words: &[&str]) -> Result<EventDraft, String> {
    let Some(&team_word) = words.first() else {
        return Err(format!("'{kind}' needs a team: home, away or both"));
    };
    let team: EventTeam = team_word
        .parse()
        .map_err(|_| format!("Unknown team '{team_word}': say 'home', 'away' or 'both'"))?;

    let mut draft = EventDraft::new(kind, team);
    let mut player_words = Vec::new();
    let mut description_words = Vec::new();
    let mut in_description = false;
    for &word in &words[1..] {
        if in_description {
            description_words.push(word);
        } else if word == "-" {
            in_description = true;
        } else if let Some(number) = word.strip_prefix('#') {
            draft.player_number = Some(number.to_owned());
        } else {
            player_words.push(word);
        }
    }
    if !player_words.is_empty() {
        draft.player = Some(player_words.join(" "));
    }
    if !description_words.is_empty() {
        draft.description = Some(description_words.join(" "));
    }
    Ok(draft)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_commands() {
        assert_eq!(parse("start"), Ok(Command::Start));
        assert_eq!(parse("  pause "), Ok(Command::Pause));
        assert_eq!(parse("next"), Ok(Command::NextPeriod));
        assert_eq!(parse("quit"), Ok(Command::Quit));
        assert!(parse("").is_err());
        assert!(parse("launch").is_err());
    }

    #[test]
    fn quick_score_commands() {
        assert_eq!(parse("2 home"), Ok(Command::QuickScore { side: Side::Home, points: 2 }));
        assert_eq!(parse("3 away"), Ok(Command::QuickScore { side: Side::Away, points: 3 }));
        assert!(parse("2").is_err());
        assert!(parse("3 both").is_err());
    }

    #[test]
    fn event_drafts() {
        let Ok(Command::Record(draft)) = parse("goal3 away Martyna Wenta #7 - corner three") else {
            panic!();
        };
        assert_eq!(draft.kind, EventKind::Goal3);
        assert_eq!(draft.team, EventTeam::Away);
        assert_eq!(draft.player.as_deref(), Some("Martyna Wenta"));
        assert_eq!(draft.player_number.as_deref(), Some("7"));
        assert_eq!(draft.description.as_deref(), Some("corner three"));

        let Ok(Command::Record(draft)) = parse("foul home") else {
            panic!();
        };
        assert_eq!(draft.kind, EventKind::Foul);
        assert_eq!(draft.player, None);

        assert!(parse("foul").is_err());
        assert!(parse("goal2 neither").is_err());
    }

    #[test]
    fn team_rename() {
        assert_eq!(
            parse("team home Rostock Seawolves"),
            Ok(Command::TeamName { side: Side::Home, name: "Rostock Seawolves".to_owned() })
        );
        assert!(parse("team home").is_err());
        assert!(parse("team neither X").is_err());
    }

    #[test]
    fn comment_takes_free_text() {
        let Ok(Command::Record(draft)) = parse("comment crowd on their feet") else {
            panic!();
        };
        assert_eq!(draft.kind, EventKind::Comment);
        assert_eq!(draft.team, EventTeam::Both);
        assert_eq!(draft.description.as_deref(), Some("crowd on their feet"));
    }
}
