//! GameSession, WizardStep and GameError.

use crate::models::player::{Player, PlayerId};
use crate::models::team::{Location, Team, TeamId};
use crate::models::toss::TossState;
use crate::seed::default_players;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use uuid::Uuid;

/// Minimum pool size before teams can be formed.
pub const MIN_PLAYERS_TO_FORM_TEAMS: usize = 2;

/// Validation failures. All are recoverable by re-input; state is left unchanged.
#[derive(Clone, Debug, PartialEq)]
pub enum GameError {
    /// Player name is empty or whitespace.
    EmptyName,
    /// Weight is missing, unparseable, not finite or not positive.
    InvalidWeight,
    /// Too few players in the pool to leave AddPlayers.
    NotEnoughPlayers { required: usize, found: usize },
    /// A team has no players, so no captain can be picked.
    EmptyTeam(TeamId),
    /// A team has no captain yet.
    MissingCaptain(TeamId),
    /// No toss winner has been derived (no call, or no toss yet).
    TossNotDecided,
    /// The action is not available in the current step.
    InvalidStep { step: WizardStep },
    /// `set_step` target is neither the next step nor an earlier one.
    InvalidTransition { from: WizardStep, to: WizardStep },
    /// Drop target identifier is not one of the three lists.
    UnknownLocation(String),
    /// Team identifier is not one of the two teams.
    UnknownTeam(String),
    /// A row of an imported roster failed validation.
    InvalidRecord { line: u64, message: String },
}

impl GameError {
    /// Heading for the user-facing notification.
    pub fn title(&self) -> &'static str {
        match self {
            GameError::NotEnoughPlayers { .. } => "Not Enough Players",
            GameError::EmptyTeam(_) => "Teams Incomplete",
            GameError::MissingCaptain(_) => "Captain Required",
            GameError::TossNotDecided => "Toss Pending",
            GameError::InvalidRecord { .. } => "Import Failed",
            _ => "Error",
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::EmptyName => write!(f, "Player name is required"),
            GameError::InvalidWeight => write!(f, "Please enter a valid weight"),
            GameError::NotEnoughPlayers { required, found } => write!(
                f,
                "You need at least {} players to form teams (have {})",
                required, found
            ),
            GameError::EmptyTeam(team) => write!(f, "{} has no players", team.display_name()),
            GameError::MissingCaptain(team) => {
                write!(f, "{} needs a captain", team.display_name())
            }
            GameError::TossNotDecided => {
                write!(f, "A captain must call heads or tails before the toss decides a winner")
            }
            GameError::InvalidStep { step } => {
                write!(f, "This action is not available during {}", step)
            }
            GameError::InvalidTransition { from, to } => {
                write!(f, "Cannot go from {} to {}", from, to)
            }
            GameError::UnknownLocation(id) => write!(f, "Unknown player list: {}", id),
            GameError::UnknownTeam(id) => write!(f, "Unknown team: {}", id),
            GameError::InvalidRecord { line, message } => write!(f, "Line {}: {}", line, message),
        }
    }
}

impl std::error::Error for GameError {}

/// Unique identifier for a game session.
pub type GameId = Uuid;

/// Wizard screen currently shown.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Building the player pool.
    #[default]
    AddPlayers,
    /// Dragging players from the pool onto the two teams.
    FormTeams,
    SelectCaptains,
    Toss,
    /// Final lineups and toss winner.
    Result,
}

impl WizardStep {
    /// Step reached by the forward transition. Result wraps around to a new game.
    pub fn next(self) -> WizardStep {
        match self {
            WizardStep::AddPlayers => WizardStep::FormTeams,
            WizardStep::FormTeams => WizardStep::SelectCaptains,
            WizardStep::SelectCaptains => WizardStep::Toss,
            WizardStep::Toss => WizardStep::Result,
            WizardStep::Result => WizardStep::AddPlayers,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::AddPlayers => "Add Players",
            WizardStep::FormTeams => "Form Teams",
            WizardStep::SelectCaptains => "Select Captains",
            WizardStep::Toss => "Toss",
            WizardStep::Result => "Result",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Full state of one match being organized: step, the three player lists, and the toss.
///
/// Fields are private so that every change goes through the reducer in `logic`, which keeps
/// the location index in step with the lists.
#[derive(Clone, Debug, Serialize)]
pub struct GameSession {
    pub id: GameId,
    pub created_at: DateTime<Utc>,
    step: WizardStep,
    pool: Vec<Player>,
    team_alpha: Team,
    team_beta: Team,
    toss: TossState,
    is_team_formation_complete: bool,
    /// Roster restored by a full reset.
    #[serde(skip)]
    seed: Vec<Player>,
    #[serde(skip)]
    locations: HashMap<PlayerId, Location>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(default_players())
    }
}

impl GameSession {
    /// New game in AddPlayers with `seed` as the pool. Repeated ids keep their first player.
    pub fn new(mut seed: Vec<Player>) -> Self {
        let mut seen = HashSet::new();
        seed.retain(|p| {
            let fresh = seen.insert(p.id.clone());
            if !fresh {
                log::warn!("dropping seed player {} with duplicate id {}", p.name, p.id);
            }
            fresh
        });
        let mut game = Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            step: WizardStep::AddPlayers,
            pool: Vec::new(),
            team_alpha: Team::new(TeamId::Alpha),
            team_beta: Team::new(TeamId::Beta),
            toss: TossState::default(),
            is_team_formation_complete: false,
            seed,
            locations: HashMap::new(),
        };
        game.restore_seed();
        game
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Unassigned players, in insertion order.
    pub fn pool(&self) -> &[Player] {
        &self.pool
    }

    pub fn team(&self, id: TeamId) -> &Team {
        match id {
            TeamId::Alpha => &self.team_alpha,
            TeamId::Beta => &self.team_beta,
        }
    }

    pub fn team_alpha(&self) -> &Team {
        &self.team_alpha
    }

    pub fn team_beta(&self) -> &Team {
        &self.team_beta
    }

    pub fn toss(&self) -> &TossState {
        &self.toss
    }

    pub fn is_team_formation_complete(&self) -> bool {
        self.is_team_formation_complete
    }

    /// Where the player currently is, or `None` if no such player exists.
    pub fn location_of(&self, player_id: &str) -> Option<Location> {
        self.locations.get(player_id).copied()
    }

    /// Players across the pool and both teams.
    pub fn player_count(&self) -> usize {
        self.locations.len()
    }

    /// Winning team of the toss, if decided.
    pub fn toss_winning_team(&self) -> Option<&Team> {
        self.toss.winning_team.map(|id| self.team(id))
    }

    pub fn list(&self, location: Location) -> &[Player] {
        match location {
            Location::Pool => &self.pool,
            Location::TeamAlpha => &self.team_alpha.players,
            Location::TeamBeta => &self.team_beta.players,
        }
    }

    /// Fail with `InvalidStep` unless the current step is one of `allowed`.
    pub(crate) fn require_step(&self, allowed: &[WizardStep]) -> Result<(), GameError> {
        if allowed.contains(&self.step) {
            Ok(())
        } else {
            Err(GameError::InvalidStep { step: self.step })
        }
    }

    pub(crate) fn set_step_unchecked(&mut self, step: WizardStep) {
        self.step = step;
    }

    pub(crate) fn set_formation_complete(&mut self, value: bool) {
        self.is_team_formation_complete = value;
    }

    pub(crate) fn toss_mut(&mut self) -> &mut TossState {
        &mut self.toss
    }

    pub(crate) fn team_mut(&mut self, id: TeamId) -> &mut Team {
        match id {
            TeamId::Alpha => &mut self.team_alpha,
            TeamId::Beta => &mut self.team_beta,
        }
    }

    fn list_mut(&mut self, location: Location) -> &mut Vec<Player> {
        match location {
            Location::Pool => &mut self.pool,
            Location::TeamAlpha => &mut self.team_alpha.players,
            Location::TeamBeta => &mut self.team_beta.players,
        }
    }

    /// Remove a player from its current list. A captain leaving a team takes the captaincy with it.
    pub(crate) fn take_player(&mut self, player_id: &str) -> Option<(Player, Location)> {
        let location = self.locations.remove(player_id)?;
        let list = self.list_mut(location);
        let idx = list.iter().position(|p| p.id == player_id)?;
        let mut player = list.remove(idx);
        if let Some(team) = location.team() {
            let team = self.team_mut(team);
            if team.captain.as_deref() == Some(player_id) {
                team.captain = None;
            }
        }
        player.is_captain = false;
        Some((player, location))
    }

    /// Append a player to `location`. The id must not be present anywhere.
    pub(crate) fn push_player(&mut self, player: Player, location: Location) {
        self.locations.insert(player.id.clone(), location);
        self.list_mut(location).push(player);
    }

    /// Pool back to the seed roster, teams emptied, toss and formation flag cleared.
    pub(crate) fn restore_seed(&mut self) {
        self.pool = self.seed.clone();
        self.team_alpha = Team::new(TeamId::Alpha);
        self.team_beta = Team::new(TeamId::Beta);
        self.toss.clear();
        self.is_team_formation_complete = false;
        self.rebuild_index();
    }

    /// Move every team member back to the pool (Alpha's then Beta's), keeping pool order.
    pub(crate) fn return_teams_to_pool(&mut self) {
        for id in TeamId::ALL {
            let team = self.team_mut(id);
            team.clear_captain();
            let players = std::mem::take(&mut team.players);
            self.pool.extend(players);
        }
        self.rebuild_index();
    }

    fn rebuild_index(&mut self) {
        self.locations.clear();
        for (location, list) in [
            (Location::Pool, &self.pool),
            (Location::TeamAlpha, &self.team_alpha.players),
            (Location::TeamBeta, &self.team_beta.players),
        ] {
            for p in list {
                self.locations.insert(p.id.clone(), location);
            }
        }
    }
}
