//! Cricket match organizer: library with models, the roster reducer and the wizard state machine.

pub mod api;
pub mod config;
pub mod logic;
pub mod models;
pub mod seed;

pub use config::AppConfig;
pub use logic::{
    add_player, advance, import_players, move_player, parse_weight, perform_toss,
    perform_toss_with, remove_player, reset_to_step, select_captain, set_captain_choice,
    set_step, set_team_formation_complete,
};
pub use models::{
    CaptainChoice, CoinFace, GameError, GameId, GameSession, Location, Notice, Player, PlayerId,
    Team, TeamId, TossState, WizardStep,
};
pub use seed::{default_players, load_players_csv, load_players_file, SeedError};
