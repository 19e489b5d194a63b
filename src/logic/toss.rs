//! Coin toss: recording the captain's call and flipping.

use crate::models::{CaptainChoice, CoinFace, GameError, GameSession, TeamId, WizardStep};
use chrono::Utc;
use rand::Rng;

/// Record which face `team` calls. Overwrites an earlier call.
pub fn set_captain_choice(
    game: &mut GameSession,
    team_id: TeamId,
    called_face: CoinFace,
) -> Result<(), GameError> {
    game.require_step(&[WizardStep::Toss])?;
    game.toss_mut().captain_choice = Some(CaptainChoice { team_id, called_face });
    Ok(())
}

/// Flip the coin with the thread-local RNG.
pub fn perform_toss(game: &mut GameSession) -> Result<CoinFace, GameError> {
    perform_toss_with(game, &mut rand::thread_rng())
}

/// Flip the coin with `rng` (p = 0.5 each face) and derive the winner from the recorded call.
///
/// Without a call the result is stored but no winner is set.
pub fn perform_toss_with<R: Rng + ?Sized>(
    game: &mut GameSession,
    rng: &mut R,
) -> Result<CoinFace, GameError> {
    game.require_step(&[WizardStep::Toss])?;
    let result = if rng.gen_bool(0.5) {
        CoinFace::Heads
    } else {
        CoinFace::Tails
    };
    let game_id = game.id;
    let toss = game.toss_mut();
    toss.result = Some(result);
    toss.tossed_at = Some(Utc::now());
    toss.winning_team = toss.captain_choice.map(|choice| {
        if choice.called_face == result {
            choice.team_id
        } else {
            choice.team_id.other()
        }
    });
    match toss.winning_team {
        Some(winner) => log::info!("game {}: toss came up {}, {} wins", game_id, result, winner),
        None => log::debug!("game {}: toss came up {} with no call recorded", game_id, result),
    }
    Ok(result)
}
