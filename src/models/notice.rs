//! Success notifications shown to the user after an action.

use serde::Serialize;

/// A transient message for the presentation layer (errors travel as `GameError` instead).
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}
