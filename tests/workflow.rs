//! Integration tests for wizard transitions and resets.

use cricket_match_web::{
    add_player, advance, default_players, move_player, perform_toss_with, reset_to_step,
    select_captain, set_captain_choice, set_step, set_team_formation_complete, CoinFace,
    GameError, GameSession, Location, Player, TeamId, TossState, WizardStep,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Default roster split odd/even between the teams and advanced to SelectCaptains.
fn game_with_teams() -> GameSession {
    let mut g = GameSession::default();
    advance(&mut g).unwrap();
    let ids: Vec<String> = g.pool().iter().map(|p| p.id.clone()).collect();
    for (i, id) in ids.iter().enumerate().take(10) {
        let dest = if i % 2 == 0 {
            Location::TeamAlpha
        } else {
            Location::TeamBeta
        };
        move_player(&mut g, id, dest).unwrap();
    }
    advance(&mut g).unwrap();
    g
}

fn game_at_result() -> GameSession {
    let mut g = game_with_teams();
    select_captain(&mut g, "01", TeamId::Alpha).unwrap();
    select_captain(&mut g, "02", TeamId::Beta).unwrap();
    advance(&mut g).unwrap();
    set_captain_choice(&mut g, TeamId::Alpha, CoinFace::Heads).unwrap();
    perform_toss_with(&mut g, &mut StdRng::seed_from_u64(7)).unwrap();
    advance(&mut g).unwrap();
    assert_eq!(g.step(), WizardStep::Result);
    g
}

#[test]
fn new_game_starts_with_seed_roster() {
    let g = GameSession::default();
    assert_eq!(g.step(), WizardStep::AddPlayers);
    assert_eq!(g.pool(), default_players().as_slice());
    assert_eq!(g.pool().len(), 20);
    assert_eq!(g.pool()[0].id, "01");
    assert!(g.team_alpha().players.is_empty());
    assert!(g.team_beta().players.is_empty());
    assert!(!g.is_team_formation_complete());
}

#[test]
fn advance_requires_two_players() {
    let mut g = GameSession::new(vec![Player::with_id("a", "A", None, 1.0)]);
    assert_eq!(
        advance(&mut g),
        Err(GameError::NotEnoughPlayers {
            required: 2,
            found: 1
        })
    );
    assert_eq!(g.step(), WizardStep::AddPlayers);

    add_player(&mut g, "B", None, 1.0).unwrap();
    assert_eq!(advance(&mut g), Ok(WizardStep::FormTeams));
    assert_eq!(g.step(), WizardStep::FormTeams);
}

#[test]
fn form_teams_requires_players_on_both_teams() {
    let mut g = GameSession::default();
    advance(&mut g).unwrap();
    move_player(&mut g, "01", Location::TeamAlpha).unwrap();
    assert_eq!(advance(&mut g), Err(GameError::EmptyTeam(TeamId::Beta)));
    assert!(!g.is_team_formation_complete());

    move_player(&mut g, "02", Location::TeamBeta).unwrap();
    assert_eq!(advance(&mut g), Ok(WizardStep::SelectCaptains));
    assert!(g.is_team_formation_complete());
}

#[test]
fn formation_flag_only_settable_while_forming() {
    let mut g = GameSession::default();
    assert_eq!(
        set_team_formation_complete(&mut g, true),
        Err(GameError::InvalidStep {
            step: WizardStep::AddPlayers
        })
    );
    advance(&mut g).unwrap();
    set_team_formation_complete(&mut g, true).unwrap();
    assert!(g.is_team_formation_complete());
}

#[test]
fn captains_required_before_toss() {
    let mut g = game_with_teams();
    assert_eq!(advance(&mut g), Err(GameError::MissingCaptain(TeamId::Alpha)));
    select_captain(&mut g, "01", TeamId::Alpha).unwrap();
    assert_eq!(advance(&mut g), Err(GameError::MissingCaptain(TeamId::Beta)));
    select_captain(&mut g, "02", TeamId::Beta).unwrap();
    assert_eq!(advance(&mut g), Ok(WizardStep::Toss));
}

#[test]
fn result_requires_decided_toss() {
    let mut g = game_with_teams();
    select_captain(&mut g, "01", TeamId::Alpha).unwrap();
    select_captain(&mut g, "02", TeamId::Beta).unwrap();
    advance(&mut g).unwrap();

    assert_eq!(advance(&mut g), Err(GameError::TossNotDecided));
    // a toss without a call stores the result but decides nothing
    perform_toss_with(&mut g, &mut StdRng::seed_from_u64(1)).unwrap();
    assert!(g.toss().result.is_some());
    assert_eq!(advance(&mut g), Err(GameError::TossNotDecided));

    set_captain_choice(&mut g, TeamId::Beta, CoinFace::Tails).unwrap();
    perform_toss_with(&mut g, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(advance(&mut g), Ok(WizardStep::Result));
}

#[test]
fn advancing_from_result_starts_new_game() {
    let mut g = game_at_result();
    assert_eq!(advance(&mut g), Ok(WizardStep::AddPlayers));
    assert_eq!(g.pool(), default_players().as_slice());
    assert!(g.team_alpha().players.is_empty());
    assert_eq!(g.toss().result, None);
}

#[test]
fn reset_to_add_players_restores_seed_from_any_state() {
    for mut g in [GameSession::default(), game_with_teams(), game_at_result()] {
        add_player(&mut g, "Extra", None, 1.0).ok();
        reset_to_step(&mut g, WizardStep::AddPlayers).unwrap();

        assert_eq!(g.step(), WizardStep::AddPlayers);
        assert_eq!(g.pool(), default_players().as_slice());
        assert!(g.team_alpha().players.is_empty());
        assert!(g.team_beta().players.is_empty());
        assert_eq!(g.team_alpha().captain, None);
        assert_eq!(g.toss(), &TossState::default());
        assert!(!g.is_team_formation_complete());
        assert_eq!(g.player_count(), 20);
    }
}

#[test]
fn reset_to_form_teams_returns_everyone_to_pool() {
    let mut g = game_at_result();
    let leftover: Vec<String> = g.pool().iter().map(|p| p.id.clone()).collect();
    let alpha: Vec<String> = g.team_alpha().players.iter().map(|p| p.id.clone()).collect();
    let beta: Vec<String> = g.team_beta().players.iter().map(|p| p.id.clone()).collect();

    reset_to_step(&mut g, WizardStep::FormTeams).unwrap();

    let expected: Vec<String> = leftover.into_iter().chain(alpha).chain(beta).collect();
    let pool: Vec<String> = g.pool().iter().map(|p| p.id.clone()).collect();
    assert_eq!(pool, expected);
    assert!(g.pool().iter().all(|p| !p.is_captain));
    assert!(g.team_alpha().players.is_empty());
    assert_eq!(g.team_beta().captain, None);
    assert_eq!(g.toss().winning_team, None);
    assert_eq!(g.toss().captain_choice, None);
    assert!(!g.is_team_formation_complete());
    assert_eq!(g.step(), WizardStep::FormTeams);
    assert_eq!(g.location_of("01"), Some(Location::Pool));
}

#[test]
fn reset_to_select_captains_keeps_membership() {
    let mut g = game_at_result();
    let alpha_ids: Vec<String> = g.team_alpha().players.iter().map(|p| p.id.clone()).collect();

    reset_to_step(&mut g, WizardStep::SelectCaptains).unwrap();

    let after: Vec<String> = g.team_alpha().players.iter().map(|p| p.id.clone()).collect();
    assert_eq!(after, alpha_ids);
    for team in [g.team_alpha(), g.team_beta()] {
        assert_eq!(team.captain, None);
        assert!(team.players.iter().all(|p| !p.is_captain));
    }
    assert_eq!(g.toss().result, None);
    assert!(g.is_team_formation_complete());
    assert_eq!(g.step(), WizardStep::SelectCaptains);
}

#[test]
fn reset_to_toss_clears_only_toss() {
    let mut g = game_at_result();
    let alpha = g.team_alpha().clone();

    reset_to_step(&mut g, WizardStep::Toss).unwrap();

    assert_eq!(g.team_alpha(), &alpha);
    assert_eq!(g.team_alpha().captain.as_deref(), Some("01"));
    assert_eq!(g.toss(), &TossState::default());
    assert_eq!(g.step(), WizardStep::Toss);
}

#[test]
fn set_step_moves_forward_one_step_or_back() {
    let mut g = GameSession::default();
    assert_eq!(
        set_step(&mut g, WizardStep::Toss),
        Err(GameError::InvalidTransition {
            from: WizardStep::AddPlayers,
            to: WizardStep::Toss
        })
    );
    assert_eq!(set_step(&mut g, WizardStep::AddPlayers), Ok(WizardStep::AddPlayers));
    assert_eq!(set_step(&mut g, WizardStep::FormTeams), Ok(WizardStep::FormTeams));

    move_player(&mut g, "05", Location::TeamAlpha).unwrap();
    assert_eq!(set_step(&mut g, WizardStep::AddPlayers), Ok(WizardStep::AddPlayers));
    assert_eq!(g.location_of("05"), Some(Location::Pool));
    assert_eq!(g.pool(), default_players().as_slice());
}

#[test]
fn reset_cannot_jump_ahead() {
    let mut g = GameSession::default();
    for target in [WizardStep::FormTeams, WizardStep::Toss, WizardStep::Result] {
        assert_eq!(
            reset_to_step(&mut g, target),
            Err(GameError::InvalidTransition {
                from: WizardStep::AddPlayers,
                to: target
            })
        );
    }
    assert_eq!(g.step(), WizardStep::AddPlayers);
    assert_eq!(g.toss_winning_team(), None);

    let mut g = game_with_teams();
    assert!(reset_to_step(&mut g, WizardStep::Result).is_err());
    assert_eq!(reset_to_step(&mut g, WizardStep::SelectCaptains), Ok(WizardStep::SelectCaptains));
    assert_eq!(g.team_alpha().players.len(), 5);
}

#[test]
fn duplicate_seed_ids_keep_first_player() {
    let mut g = GameSession::new(vec![
        Player::with_id("a", "A", None, 1.0),
        Player::with_id("b", "B", None, 1.0),
        Player::with_id("a", "Again", None, 2.0),
    ]);
    assert_eq!(g.pool().len(), 2);
    assert_eq!(g.player_count(), 2);
    assert_eq!(g.pool()[0].name, "A");

    advance(&mut g).unwrap();
    reset_to_step(&mut g, WizardStep::AddPlayers).unwrap();
    assert_eq!(g.pool().len(), g.player_count());
}
