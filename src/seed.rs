//! Seed roster: the built-in player list and CSV loading.
//!
//! CSV files have a header row with `name`, `weight` and optionally `id` and `image_url`
//! columns. Rows without an id get `01`, `02`, ... by position, so a reset restores the
//! same ids every time.

use crate::logic::validate_player_input;
use crate::models::{Player, PlayerId};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One row of a roster CSV.
#[derive(Clone, Debug, Deserialize)]
pub struct PlayerRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub weight: String,
}

#[derive(Debug)]
pub enum SeedError {
    Io(std::io::Error),
    Csv(csv::Error),
    /// Row failed name/weight validation (1-based line, header is line 1).
    InvalidRow { line: u64, message: String },
    DuplicateId(PlayerId),
    Empty,
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedError::Io(e) => write!(f, "Cannot read seed roster: {}", e),
            SeedError::Csv(e) => write!(f, "Malformed seed roster: {}", e),
            SeedError::InvalidRow { line, message } => write!(f, "Line {}: {}", line, message),
            SeedError::DuplicateId(id) => write!(f, "Duplicate player id {}", id),
            SeedError::Empty => write!(f, "Seed roster has no players"),
        }
    }
}

impl std::error::Error for SeedError {}

impl From<std::io::Error> for SeedError {
    fn from(e: std::io::Error) -> Self {
        SeedError::Io(e)
    }
}

impl From<csv::Error> for SeedError {
    fn from(e: csv::Error) -> Self {
        SeedError::Csv(e)
    }
}

/// Read roster records from CSV, paired with their line numbers.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<(u64, PlayerRecord)>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let record: PlayerRecord = row.deserialize(Some(&headers))?;
        records.push((line, record));
    }
    Ok(records)
}

/// Parse a seed roster from CSV. Every row must be valid and ids unique.
pub fn load_players_csv<R: Read>(reader: R) -> Result<Vec<Player>, SeedError> {
    let records = read_records(reader)?;
    if records.is_empty() {
        return Err(SeedError::Empty);
    }
    let mut seen = HashSet::new();
    let mut players = Vec::with_capacity(records.len());
    for (idx, (line, record)) in records.into_iter().enumerate() {
        let (name, weight) = validate_player_input(&record.name, &record.weight)
            .map_err(|e| SeedError::InvalidRow {
                line,
                message: e.to_string(),
            })?;
        let id = match record.id {
            Some(id) if !id.is_empty() => id,
            _ => format!("{:02}", idx + 1),
        };
        if !seen.insert(id.clone()) {
            return Err(SeedError::DuplicateId(id));
        }
        players.push(Player::with_id(id, name, record.image_url.as_deref(), weight));
    }
    Ok(players)
}

/// Load a seed roster file.
pub fn load_players_file(path: &Path) -> Result<Vec<Player>, SeedError> {
    let file = File::open(path)?;
    load_players_csv(file)
}

const DEFAULT_ROSTER: [(&str, &str, &str, f64); 20] = [
    ("01", "Imtiaz", "/images/Imtiaz.jpeg", 3.0),
    ("02", "Mizan", "/images/cricket-player.png", 3.0),
    ("03", "Tahsin", "/images/Tahsin.jpeg", 3.0),
    ("04", "Momenul", "/images/Momenul.jpeg", 3.0),
    ("05", "Mezan", "/images/Mezan.jpeg", 5.0),
    ("06", "Mahabub", "/images/Mahabub.jpeg", 2.0),
    ("07", "Zabid", "/images/Zabid.jpeg", 4.0),
    ("08", "Rashed", "/images/Rashed.jpeg", 3.0),
    ("09", "Akbar", "/images/Akbar.jpeg", 2.0),
    ("10", "Shamil", "/images/Shamil.jpeg", 1.0),
    ("11", "Elias", "/images/Elias.jpeg", 5.0),
    ("12", "Emran", "/images/Emran.jpeg", 1.0),
    ("13", "Saqib", "/images/Saqib.jpeg", 2.0),
    ("14", "Rakib", "/images/Rakib.jpeg", 5.0),
    ("15", "Arif", "/images/cricket-player.png", 3.0),
    ("16", "Riaz", "/images/Riaz.jpeg", 4.0),
    ("17", "Kamruzzaman", "/images/Kamruzzaman.jpeg", 5.0),
    ("18", "Shahnewaz", "/images/Shahnewaz.jpeg", 3.0),
    ("19", "Maruf", "/images/Maruf.jpeg", 1.0),
    ("20", "Rifat", "/images/Rifat.jpeg", 1.0),
];

/// The built-in regulars every new game starts with.
pub fn default_players() -> Vec<Player> {
    DEFAULT_ROSTER
        .iter()
        .map(|&(id, name, image, weight)| Player::with_id(id, name, Some(image), weight))
        .collect()
}
