use enum_map::{Enum, EnumMap, enum_map};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};


#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, EnumString, Display,
    Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}


// Event attribution. Administrative events (start, pause, period changes)
// concern both teams at once.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, EnumString, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventTeam {
    Home,
    Away,
    Both,
}

impl EventTeam {
    pub fn side(self) -> Option<Side> {
        match self {
            EventTeam::Home => Some(Side::Home),
            EventTeam::Away => Some(Side::Away),
            EventTeam::Both => None,
        }
    }
}

impl From<Side> for EventTeam {
    fn from(side: Side) -> Self {
        match side {
            Side::Home => EventTeam::Home,
            Side::Away => EventTeam::Away,
        }
    }
}


// Pure configuration: never consulted by match logic, carried for display,
// persistence and export. `color1`/`color2` are the snapshot wire names.
#[derive(Clone, PartialEq, Eq, Default, Debug, Serialize, Deserialize)]
pub struct TeamConfig {
    pub name: String,
    #[serde(rename = "color1")]
    pub primary_color: String,
    #[serde(rename = "color2")]
    pub secondary_color: String,
}

impl TeamConfig {
    pub fn new(name: &str, primary_color: &str, secondary_color: &str) -> Self {
        TeamConfig {
            name: name.to_owned(),
            primary_color: primary_color.to_owned(),
            secondary_color: secondary_color.to_owned(),
        }
    }
}

pub fn default_teams() -> EnumMap<Side, TeamConfig> {
    enum_map! {
        Side::Home => TeamConfig::new("Home", "#ffffff", "#3d41da"),
        Side::Away => TeamConfig::new("Away", "#000000", "#ffffff"),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_parsing() {
        assert_eq!("home".parse::<Side>(), Ok(Side::Home));
        assert_eq!("away".parse::<Side>(), Ok(Side::Away));
        assert!("both".parse::<Side>().is_err());
        assert_eq!("both".parse::<EventTeam>(), Ok(EventTeam::Both));
    }

    #[test]
    fn team_color_wire_names() {
        let json = serde_json::to_value(TeamConfig::new("Home", "#ffffff", "#3d41da")).unwrap();
        assert_eq!(json["color1"], "#ffffff");
        assert_eq!(json["color2"], "#3d41da");
    }
}
