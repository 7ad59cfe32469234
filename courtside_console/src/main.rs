#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod commands;
mod courtside_prelude;
mod operator_main;
mod persistence;
mod tui;

use clap::{Command, arg};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Courtside")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about("Basketball match live-scoring console")
        .subcommand_required(true)
        .subcommand(
            Command::new("run")
                .about("Run the interactive match console")
                .arg(
                    arg!(--"save-file" <path> "Where the match is saved between sessions")
                        .default_value("courtside_match.json"),
                )
                .arg(arg!(--home <name> "Home team name"))
                .arg(arg!(--away <name> "Away team name")),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the scoreboard and event feed of a saved match")
                .arg(arg!(<save_file> "Path to a saved match snapshot")),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("run", sub_matches)) => operator_main::run(operator_main::RunConfig {
            save_file: sub_matches.get_one::<String>("save-file").unwrap().clone(),
            home_name: sub_matches.get_one::<String>("home").cloned(),
            away_name: sub_matches.get_one::<String>("away").cloned(),
        }),
        Some(("inspect", sub_matches)) => {
            operator_main::inspect(sub_matches.get_one::<String>("save_file").unwrap())
        }
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}
