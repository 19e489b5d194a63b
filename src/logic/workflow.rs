//! Wizard state machine: forward transitions with their guards, and resets.

use crate::models::{GameError, GameSession, TeamId, WizardStep, MIN_PLAYERS_TO_FORM_TEAMS};

/// Take the forward transition out of the current step. Returns the new step.
///
/// - AddPlayers -> FormTeams: at least 2 players in the pool.
/// - FormTeams -> SelectCaptains: both teams have players; marks formation complete.
/// - SelectCaptains -> Toss: both teams have a captain.
/// - Toss -> Result: the toss produced a winner.
/// - Result -> AddPlayers: starts a new game (full reset).
pub fn advance(game: &mut GameSession) -> Result<WizardStep, GameError> {
    match game.step() {
        WizardStep::AddPlayers => {
            let found = game.pool().len();
            if found < MIN_PLAYERS_TO_FORM_TEAMS {
                return Err(GameError::NotEnoughPlayers {
                    required: MIN_PLAYERS_TO_FORM_TEAMS,
                    found,
                });
            }
        }
        WizardStep::FormTeams => {
            if let Some(team) = TeamId::ALL
                .into_iter()
                .find(|&t| game.team(t).players.is_empty())
            {
                return Err(GameError::EmptyTeam(team));
            }
            game.set_formation_complete(true);
        }
        WizardStep::SelectCaptains => {
            if let Some(team) = TeamId::ALL
                .into_iter()
                .find(|&t| game.team(t).captain.is_none())
            {
                return Err(GameError::MissingCaptain(team));
            }
        }
        WizardStep::Toss => {
            if !game.toss().is_decided() {
                return Err(GameError::TossNotDecided);
            }
        }
        WizardStep::Result => {
            return reset_to_step(game, WizardStep::AddPlayers);
        }
    }
    let next = game.step().next();
    log::debug!("game {}: {} -> {}", game.id, game.step(), next);
    game.set_step_unchecked(next);
    Ok(next)
}

/// Go to `target`: the next step goes through `advance`, an earlier step through
/// `reset_to_step`, the current step is a no-op. Skipping ahead is rejected.
pub fn set_step(game: &mut GameSession, target: WizardStep) -> Result<WizardStep, GameError> {
    let current = game.step();
    if target == current {
        Ok(current)
    } else if target == current.next() {
        advance(game)
    } else if target < current {
        reset_to_step(game, target)
    } else {
        Err(GameError::InvalidTransition {
            from: current,
            to: target,
        })
    }
}

/// Mark team formation as done (or not). Only meaningful while forming teams.
pub fn set_team_formation_complete(game: &mut GameSession, value: bool) -> Result<(), GameError> {
    game.require_step(&[WizardStep::FormTeams])?;
    game.set_formation_complete(value);
    Ok(())
}

/// Return to `target`, discarding everything decided from that step onwards.
///
/// `target` must not be ahead of the current step; resetting to the current step clears
/// what that step decided.
pub fn reset_to_step(game: &mut GameSession, target: WizardStep) -> Result<WizardStep, GameError> {
    let current = game.step();
    if target > current {
        return Err(GameError::InvalidTransition {
            from: current,
            to: target,
        });
    }
    match target {
        WizardStep::AddPlayers => game.restore_seed(),
        WizardStep::FormTeams => {
            game.return_teams_to_pool();
            game.toss_mut().clear();
            game.set_formation_complete(false);
        }
        WizardStep::SelectCaptains => {
            for team in TeamId::ALL {
                game.team_mut(team).clear_captain();
            }
            game.toss_mut().clear();
        }
        WizardStep::Toss => game.toss_mut().clear(),
        WizardStep::Result => {}
    }
    log::info!("game {}: reset to {}", game.id, target);
    game.set_step_unchecked(target);
    Ok(target)
}
