use std::io;
use std::sync::mpsc;
use std::thread;
use std::{fmt, fs};

use anyhow::Context;
use crossterm::event as term_event;
use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};
use instant::Instant;
use scopeguard::defer;
use time::macros::format_description;

use crate::commands::{self, Command};
use crate::courtside_prelude::*;
use crate::persistence::{FileSnapshotStore, SnapshotStore};
use crate::tui;


pub struct RunConfig {
    pub save_file: String,
    pub home_name: Option<String>,
    pub away_name: Option<String>,
}

enum IncomingEvent {
    Terminal(term_event::Event),
    Tick,
}

const FEED_LINES: usize = 12;

fn writeln_raw(stdout: &mut io::Stdout, v: impl fmt::Display) -> io::Result<()> {
    let s = v.to_string();
    // Note. Not using `lines()` because it removes trailing new line.
    for line in s.split('\n') {
        execute!(stdout, crossterm::style::Print(line), cursor::MoveToNextLine(1))?;
    }
    Ok(())
}

fn render(
    stdout: &mut io::Stdout, director: &MatchDirector, now: Instant, keyboard_input: &str,
    message: &Option<String>, confirm_reset: bool,
) -> io::Result<()> {
    execute!(stdout, cursor::MoveTo(0, 0))?;
    writeln_raw(stdout, tui::render_scoreboard(&director.view(now), director.teams()))?;
    writeln_raw(stdout, "")?;
    writeln_raw(stdout, tui::render_feed(director.ledger(), FEED_LINES))?;
    execute!(stdout, terminal::Clear(terminal::ClearType::FromCursorDown))?;
    writeln_raw(stdout, "")?;
    if confirm_reset {
        writeln_raw(stdout, "Reset the match? All data will be lost. [y/n]")?;
    }
    writeln_raw(stdout, format!("> {}", keyboard_input))?;
    if let Some(message) = message {
        writeln_raw(stdout, console::Style::new().red().apply_to(message))?;
    }
    Ok(())
}

fn load_or_default(store: &mut FileSnapshotStore, save_file: &str) -> MatchDirector {
    match store.load() {
        Ok(Some(snapshot)) => {
            log::info!("Restored saved match from {}", save_file);
            MatchDirector::from_snapshot(snapshot)
        }
        Ok(None) => MatchDirector::new(default_teams()),
        Err(err) => {
            // Corrupt saves are reported and ignored; the defaults win.
            log::warn!("Ignoring unreadable save file {}: {:#}", save_file, err);
            MatchDirector::new(default_teams())
        }
    }
}

fn save(
    store: &mut FileSnapshotStore, director: &MatchDirector, autosave: &mut Autosave, now: Instant,
) {
    match store.save(&director.snapshot()) {
        Ok(()) => autosave.register_save(now),
        Err(err) => log::warn!("Save failed: {:#}", err),
    }
}

fn export_to_file(director: &MatchDirector) -> anyhow::Result<String> {
    let export = director.export();
    let date = export.exported_at.format(format_description!("[year]-[month]-[day]"))?;
    let file_name = format!(
        "match_{}_vs_{}_{}.json",
        sanitize_for_file_name(&export.teams[Side::Home].name),
        sanitize_for_file_name(&export.teams[Side::Away].name),
        date,
    );
    fs::write(&file_name, serde_json::to_string_pretty(&export)?)
        .with_context(|| format!("Writing {}", file_name))?;
    Ok(file_name)
}

fn sanitize_for_file_name(name: &str) -> String {
    name.chars().map(|ch| if ch.is_alphanumeric() { ch } else { '_' }).collect()
}

pub fn run(config: RunConfig) -> anyhow::Result<()> {
    let mut store = FileSnapshotStore::new(&config.save_file);
    let mut director = load_or_default(&mut store, &config.save_file);
    if let Some(name) = config.home_name {
        director.team_config_mut(Side::Home).name = name;
    }
    if let Some(name) = config.away_name {
        director.team_config_mut(Side::Away).name = name;
    }

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
    defer! {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show);
    }

    // One channel, two producers: the terminal and the clock poll. The
    // receiving loop is the only owner of the director, so every mutation
    // happens synchronously within one loop iteration.
    let (tx, rx) = mpsc::channel();
    let tx_term = tx.clone();
    let tx_tick = tx;
    thread::spawn(move || {
        loop {
            let Ok(ev) = term_event::read() else { return };
            if tx_term.send(IncomingEvent::Terminal(ev)).is_err() {
                return;
            }
        }
    });
    thread::spawn(move || {
        loop {
            thread::sleep(CLOCK_POLL_INTERVAL);
            if tx_tick.send(IncomingEvent::Tick).is_err() {
                return;
            }
        }
    });

    let mut autosave = Autosave::new(Instant::now());
    let mut keyboard_input = String::new();
    let mut message: Option<String> = None;
    let mut confirm_reset = false;

    for incoming in &rx {
        let now = Instant::now();
        let mut appended = false;
        match incoming {
            IncomingEvent::Tick => {
                let events = director.tick(now);
                if let Some(end) = events.iter().find(|e| e.kind == EventKind::End) {
                    message = Some(end.description.clone());
                }
                appended |= !events.is_empty();
            }
            IncomingEvent::Terminal(term_event::Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                    KeyCode::Char(ch) => keyboard_input.push(ch),
                    KeyCode::Backspace => {
                        keyboard_input.pop();
                    }
                    KeyCode::Enter => {
                        let line = keyboard_input.trim().to_owned();
                        keyboard_input.clear();
                        message = None;
                        if confirm_reset {
                            confirm_reset = false;
                            if line.eq_ignore_ascii_case("y") || line.eq_ignore_ascii_case("yes") {
                                director.reset(now);
                                appended = true;
                            }
                        } else if !line.is_empty() {
                            match commands::parse(&line) {
                                Ok(Command::Start) => appended |= director.start(now).is_some(),
                                Ok(Command::Pause) => appended |= director.pause(now).is_some(),
                                Ok(Command::NextPeriod) => {
                                    director.advance_period(now);
                                    appended = true;
                                }
                                Ok(Command::End) => {
                                    let event = director.end(now);
                                    message = Some(event.description.clone());
                                    appended = true;
                                }
                                Ok(Command::Reset) => confirm_reset = true,
                                Ok(Command::QuickScore { side, points }) => {
                                    match director.quick_score(side, points, now) {
                                        Ok(_) => appended = true,
                                        Err(err) => message = Some(err.to_string()),
                                    }
                                }
                                Ok(Command::Record(draft)) => {
                                    match director.record(draft, now) {
                                        Ok(_) => appended = true,
                                        Err(err) => message = Some(err.to_string()),
                                    }
                                }
                                Ok(Command::TeamName { side, name }) => {
                                    director.team_config_mut(side).name = name;
                                    // Team configuration changes persist too.
                                    save(&mut store, &director, &mut autosave, now);
                                }
                                Ok(Command::Save) => {
                                    save(&mut store, &director, &mut autosave, now);
                                    message = Some("Match saved".to_owned());
                                }
                                Ok(Command::Export) => match export_to_file(&director) {
                                    Ok(file_name) => {
                                        message = Some(format!("Exported to {}", file_name));
                                    }
                                    Err(err) => message = Some(format!("Export failed: {:#}", err)),
                                },
                                Ok(Command::Help) => message = Some(commands::help_text().to_owned()),
                                Ok(Command::Quit) => break,
                                Err(err) => message = Some(err),
                            }
                        }
                    }
                    _ => {}
                }
            }
            IncomingEvent::Terminal(_) => {}
        }

        // Persist after every appended event, plus on a fixed cadence while
        // the match is underway (stoppages included).
        if appended || (director.state().running && autosave.due(now)) {
            save(&mut store, &director, &mut autosave, now);
        }

        render(&mut stdout, &director, now, &keyboard_input, &message, confirm_reset)?;
    }

    store.save(&director.snapshot())?;
    Ok(())
}

pub fn inspect(save_file: &str) -> anyhow::Result<()> {
    let mut store = FileSnapshotStore::new(save_file);
    let snapshot =
        store.load()?.with_context(|| format!("No saved match in {}", save_file))?;
    let director = MatchDirector::from_snapshot(snapshot);
    let now = Instant::now();
    println!("{}", tui::render_scoreboard(&director.view(now), director.teams()));
    println!();
    println!("{}", tui::render_feed(director.ledger(), usize::MAX));
    Ok(())
}
