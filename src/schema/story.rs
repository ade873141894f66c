use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::symbol::Symbol;

/// Maximum number of symbols in a stored story.
pub const MAX_SEQUENCE_LEN: usize = 50;
/// Maximum length of an author nickname, in characters.
pub const MAX_NICKNAME_LEN: usize = 50;
/// Page size used when a listing does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Newtype wrapper for story IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(pub Uuid);

impl StoryId {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted story: the symbols, their translation, and who wrote it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: StoryId,
    pub emoji_sequence: Vec<Symbol>,
    pub translation: String,
    pub author_nickname: String,
    pub likes: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Input for creating a story.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStory {
    pub emoji_sequence: Vec<Symbol>,
    pub author_nickname: String,
}

/// Partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoryUpdate {
    #[serde(default)]
    pub emoji_sequence: Option<Vec<Symbol>>,
    #[serde(default)]
    pub author_nickname: Option<String>,
}

/// Paging and ordering for story listings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Order by likes instead of recency.
    #[serde(default)]
    pub popular: bool,
}

fn default_limit() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_SIZE,
            popular: false,
        }
    }
}
