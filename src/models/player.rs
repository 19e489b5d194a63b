//! Player data structure and the default avatar URL.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player. Seed players use short stable ids ("01"), added players a UUID.
pub type PlayerId = String;

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Placeholder avatar for a player without an image, keyed by name.
pub fn default_image_url(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=random",
        utf8_percent_encode(name, URI_COMPONENT)
    )
}

/// A player in the pool or on a team.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub image_url: String,
    /// Relative strength, used by organizers to balance teams. Always positive.
    pub weight: f64,
    #[serde(default)]
    pub is_captain: bool,
}

impl Player {
    /// Create a player with a fresh UUID. Name and weight are not validated here.
    pub fn new(name: impl Into<String>, image_url: Option<&str>, weight: f64) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, image_url, weight)
    }

    /// Create a player with a caller-chosen id (seed rosters).
    pub fn with_id(
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        image_url: Option<&str>,
        weight: f64,
    ) -> Self {
        let name = name.into();
        let image_url = match image_url.map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => default_image_url(&name),
        };
        Self {
            id: id.into(),
            name,
            image_url,
            weight,
            is_captain: false,
        }
    }
}
