//! Match organizing logic: roster reducer, coin toss, wizard transitions.

mod roster;
mod toss;
mod workflow;

pub use roster::{
    add_player, import_players, move_player, parse_weight, remove_player, select_captain,
    validate_player_input, validate_weight,
};
pub use toss::{perform_toss, perform_toss_with, set_captain_choice};
pub use workflow::{advance, reset_to_step, set_step, set_team_formation_complete};
