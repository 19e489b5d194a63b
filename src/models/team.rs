//! Teams, team identifiers, and the three places a player can be.

use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two fixed teams.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum TeamId {
    #[serde(rename = "team-alpha")]
    Alpha,
    #[serde(rename = "team-beta")]
    Beta,
}

impl TeamId {
    pub const ALL: [TeamId; 2] = [TeamId::Alpha, TeamId::Beta];

    pub fn as_str(self) -> &'static str {
        match self {
            TeamId::Alpha => "team-alpha",
            TeamId::Beta => "team-beta",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TeamId::Alpha => "Team Alpha",
            TeamId::Beta => "Team Beta",
        }
    }

    /// The opposing team.
    pub fn other(self) -> TeamId {
        match self {
            TeamId::Alpha => TeamId::Beta,
            TeamId::Beta => TeamId::Alpha,
        }
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TeamId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "team-alpha" => Ok(TeamId::Alpha),
            "team-beta" => Ok(TeamId::Beta),
            other => Err(other.to_string()),
        }
    }
}

/// Where a player currently is. Doubles as the drop-target identifier for drag and drop.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Location {
    #[serde(rename = "all-players")]
    Pool,
    #[serde(rename = "team-alpha")]
    TeamAlpha,
    #[serde(rename = "team-beta")]
    TeamBeta,
}

impl Location {
    pub fn as_str(self) -> &'static str {
        match self {
            Location::Pool => "all-players",
            Location::TeamAlpha => "team-alpha",
            Location::TeamBeta => "team-beta",
        }
    }

    /// The team this location belongs to, or `None` for the pool.
    pub fn team(self) -> Option<TeamId> {
        match self {
            Location::Pool => None,
            Location::TeamAlpha => Some(TeamId::Alpha),
            Location::TeamBeta => Some(TeamId::Beta),
        }
    }
}

impl From<TeamId> for Location {
    fn from(team: TeamId) -> Self {
        match team {
            TeamId::Alpha => Location::TeamAlpha,
            TeamId::Beta => Location::TeamBeta,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all-players" => Ok(Location::Pool),
            "team-alpha" => Ok(Location::TeamAlpha),
            "team-beta" => Ok(Location::TeamBeta),
            other => Err(other.to_string()),
        }
    }
}

/// A team roster with an optional captain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub players: Vec<Player>,
    /// Id of the member with `is_captain` set, if one was chosen.
    pub captain: Option<PlayerId>,
}

impl Team {
    /// Empty roster with no captain.
    pub fn new(id: TeamId) -> Self {
        Self {
            id,
            name: id.display_name().to_string(),
            players: Vec::new(),
            captain: None,
        }
    }

    /// The captain as a player, if set.
    pub fn captain_player(&self) -> Option<&Player> {
        let id = self.captain.as_deref()?;
        self.players.iter().find(|p| p.id == id)
    }

    /// Clear every captain flag and the captain reference.
    pub fn clear_captain(&mut self) {
        for p in &mut self.players {
            p.is_captain = false;
        }
        self.captain = None;
    }
}
