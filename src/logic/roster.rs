//! Roster reducer: adding, removing and moving players, and picking captains.

use crate::models::{
    GameError, GameSession, Location, Notice, Player, PlayerId, TeamId, WizardStep,
};
use crate::seed::PlayerRecord;

/// Steps in which the pool and team rosters may be edited.
const ROSTER_STEPS: [WizardStep; 2] = [WizardStep::AddPlayers, WizardStep::FormTeams];

/// Weight must be a finite number greater than zero.
pub fn validate_weight(weight: f64) -> Result<f64, GameError> {
    if weight.is_finite() && weight > 0.0 {
        Ok(weight)
    } else {
        Err(GameError::InvalidWeight)
    }
}

/// Parse user-entered weight text.
pub fn parse_weight(text: &str) -> Result<f64, GameError> {
    let weight: f64 = text.trim().parse().map_err(|_| GameError::InvalidWeight)?;
    validate_weight(weight)
}

/// Check a name/weight pair as typed into the form. Returns the trimmed name and parsed weight.
pub fn validate_player_input(name: &str, weight: &str) -> Result<(String, f64), GameError> {
    let name = validate_name(name)?;
    let weight = parse_weight(weight)?;
    Ok((name, weight))
}

fn validate_name(name: &str) -> Result<String, GameError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GameError::EmptyName);
    }
    Ok(name.to_string())
}

/// Add a player to the end of the pool. A blank or missing image falls back to a generated avatar.
pub fn add_player(
    game: &mut GameSession,
    name: &str,
    image_url: Option<&str>,
    weight: f64,
) -> Result<Notice, GameError> {
    game.require_step(&ROSTER_STEPS)?;
    let name = validate_name(name)?;
    let weight = validate_weight(weight)?;
    let player = Player::new(name, image_url, weight);
    log::debug!("game {}: added player {} ({})", game.id, player.name, player.id);
    let notice = Notice::new(
        "Player Added",
        format!("{} has been added to the player pool", player.name),
    );
    game.push_player(player, Location::Pool);
    Ok(notice)
}

/// Add every record to the pool, or none of them if any record is invalid.
pub fn import_players(
    game: &mut GameSession,
    records: Vec<(u64, PlayerRecord)>,
) -> Result<Notice, GameError> {
    game.require_step(&ROSTER_STEPS)?;
    let mut players = Vec::with_capacity(records.len());
    for (line, record) in records {
        let (name, weight) = validate_player_input(&record.name, &record.weight).map_err(|e| {
            GameError::InvalidRecord {
                line,
                message: e.to_string(),
            }
        })?;
        players.push(Player::new(name, record.image_url.as_deref(), weight));
    }
    let count = players.len();
    for player in players {
        game.push_player(player, Location::Pool);
    }
    log::debug!("game {}: imported {} players", game.id, count);
    Ok(Notice::new(
        "Players Imported",
        format!("{} players have been added to the player pool", count),
    ))
}

/// Remove a player from wherever it is. Unknown ids are a no-op and return `None`.
pub fn remove_player(
    game: &mut GameSession,
    player_id: &str,
) -> Result<Option<Player>, GameError> {
    game.require_step(&ROSTER_STEPS)?;
    let removed = game.take_player(player_id).map(|(player, _)| player);
    if let Some(p) = &removed {
        log::debug!("game {}: removed player {} ({})", game.id, p.name, p.id);
    }
    Ok(removed)
}

/// Move a player to the end of `destination`. Returns where it came from, `None` if unknown.
///
/// Moving onto its current list re-appends it there, so it still appears exactly once.
pub fn move_player(
    game: &mut GameSession,
    player_id: &str,
    destination: Location,
) -> Result<Option<Location>, GameError> {
    game.require_step(&ROSTER_STEPS)?;
    let Some((player, from)) = game.take_player(player_id) else {
        return Ok(None);
    };
    log::debug!("game {}: moved {} from {} to {}", game.id, player.id, from, destination);
    game.push_player(player, destination);
    Ok(Some(from))
}

/// Make `player_id` the captain of `team`, uncaptaining the rest of that team.
///
/// Returns `false` without changing anything when the player is not on `team`.
pub fn select_captain(
    game: &mut GameSession,
    player_id: &str,
    team: TeamId,
) -> Result<bool, GameError> {
    game.require_step(&[WizardStep::SelectCaptains])?;
    if game.location_of(player_id) != Some(Location::from(team)) {
        return Ok(false);
    }
    let team = game.team_mut(team);
    for p in &mut team.players {
        p.is_captain = p.id == player_id;
    }
    team.captain = Some(PlayerId::from(player_id));
    Ok(true)
}
