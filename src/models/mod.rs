//! Data structures for a match being organized: players, teams, toss, wizard state.

mod notice;
mod player;
mod session;
mod team;
mod toss;

pub use notice::Notice;
pub use player::{default_image_url, Player, PlayerId};
pub use session::{GameError, GameId, GameSession, WizardStep, MIN_PLAYERS_TO_FORM_TEAMS};
pub use team::{Location, Team, TeamId};
pub use toss::{CaptainChoice, CoinFace, TossState};
