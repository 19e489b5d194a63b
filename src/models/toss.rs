//! Coin toss state.

use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoinFace {
    Heads,
    Tails,
}

impl CoinFace {
    pub fn as_str(self) -> &'static str {
        match self {
            CoinFace::Heads => "heads",
            CoinFace::Tails => "tails",
        }
    }
}

impl fmt::Display for CoinFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoinFace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heads" => Ok(CoinFace::Heads),
            "tails" => Ok(CoinFace::Tails),
            other => Err(other.to_string()),
        }
    }
}

/// The face a team's captain called before the toss.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CaptainChoice {
    pub team_id: TeamId,
    pub called_face: CoinFace,
}

/// Call, result and winner of the toss. All `None` until the Toss step.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TossState {
    pub result: Option<CoinFace>,
    pub winning_team: Option<TeamId>,
    pub captain_choice: Option<CaptainChoice>,
    pub tossed_at: Option<DateTime<Utc>>,
}

impl TossState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_decided(&self) -> bool {
        self.winning_team.is_some()
    }
}
