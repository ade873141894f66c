/// In-memory story records: create, list, edit, delete, like.

use chrono::Utc;
use rustc_hash::FxHashMap;
use std::cmp::Reverse;
use thiserror::Error;
use tracing::{info, warn};

use crate::core::engine::TranslationEngine;
use crate::schema::story::{
    ListQuery, NewStory, Story, StoryId, StoryUpdate, MAX_NICKNAME_LEN, MAX_SEQUENCE_LEN,
};
use crate::schema::symbol::Symbol;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoryError {
    #[error("story not found: {0}")]
    NotFound(StoryId),
    #[error("emoji sequence cannot be empty")]
    EmptySequence,
    #[error("emoji sequence has {0} symbols (maximum {max})", max = MAX_SEQUENCE_LEN)]
    SequenceTooLong(usize),
    #[error("author nickname must be 1 to {max} characters", max = MAX_NICKNAME_LEN)]
    InvalidNickname,
}

/// Story records kept in memory.
///
/// Writes take `&mut self`; share a store between tasks behind a lock.
#[derive(Debug)]
pub struct StoryStore {
    engine: TranslationEngine,
    stories: FxHashMap<StoryId, Story>,
}

impl StoryStore {
    pub fn new(engine: TranslationEngine) -> Self {
        Self {
            engine,
            stories: FxHashMap::default(),
        }
    }

    pub fn engine(&self) -> &TranslationEngine {
        &self.engine
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Translate and store a new story with zero likes.
    pub fn create(&mut self, new: NewStory) -> Result<Story, StoryError> {
        check_sequence(&new.emoji_sequence)?;
        check_nickname(&new.author_nickname)?;

        let translation = self.engine.translate(&new.emoji_sequence);
        let story = Story {
            id: StoryId::new_random(),
            emoji_sequence: new.emoji_sequence,
            translation,
            author_nickname: new.author_nickname,
            likes: 0,
            created_at: Utc::now(),
            updated_at: None,
        };

        info!(id = %story.id, author = %story.author_nickname, "Story created");
        self.stories.insert(story.id, story.clone());
        Ok(story)
    }

    pub fn get(&self, id: StoryId) -> Result<&Story, StoryError> {
        self.stories.get(&id).ok_or(StoryError::NotFound(id))
    }

    /// A page of stories, newest first or most liked first. Ties fall
    /// back to id order so pages stay stable.
    pub fn list(&self, query: ListQuery) -> Vec<&Story> {
        let mut stories: Vec<&Story> = self.stories.values().collect();
        if query.popular {
            stories.sort_by_key(|s| (Reverse(s.likes), Reverse(s.created_at), s.id));
        } else {
            stories.sort_by_key(|s| (Reverse(s.created_at), s.id));
        }
        stories
            .into_iter()
            .skip(query.skip)
            .take(query.limit)
            .collect()
    }

    /// Apply a partial update. A new sequence is re-translated, and
    /// `updated_at` only moves when a field actually changes.
    pub fn update(&mut self, id: StoryId, update: StoryUpdate) -> Result<Story, StoryError> {
        if let Some(ref sequence) = update.emoji_sequence {
            check_sequence(sequence)?;
        }
        if let Some(ref nickname) = update.author_nickname {
            check_nickname(nickname)?;
        }

        let story = self.stories.get_mut(&id).ok_or(StoryError::NotFound(id))?;
        let mut changed = false;

        if let Some(sequence) = update.emoji_sequence {
            if sequence != story.emoji_sequence {
                story.translation = self.engine.translate(&sequence);
                story.emoji_sequence = sequence;
                changed = true;
            }
        }
        if let Some(nickname) = update.author_nickname {
            if nickname != story.author_nickname {
                story.author_nickname = nickname;
                changed = true;
            }
        }

        if changed {
            story.updated_at = Some(Utc::now());
            info!(id = %id, "Story updated");
        }
        Ok(story.clone())
    }

    pub fn delete(&mut self, id: StoryId) -> Result<Story, StoryError> {
        let removed = self.stories.remove(&id).ok_or(StoryError::NotFound(id))?;
        info!(id = %id, "Story deleted");
        Ok(removed)
    }

    /// Add exactly one like.
    pub fn like(&mut self, id: StoryId) -> Result<Story, StoryError> {
        let story = self.stories.get_mut(&id).ok_or(StoryError::NotFound(id))?;
        story.likes += 1;
        info!(id = %id, likes = story.likes, "Story liked");
        Ok(story.clone())
    }
}

fn check_sequence(sequence: &[Symbol]) -> Result<(), StoryError> {
    if sequence.is_empty() {
        warn!("Rejected story with empty sequence");
        return Err(StoryError::EmptySequence);
    }
    if sequence.len() > MAX_SEQUENCE_LEN {
        warn!(len = sequence.len(), "Rejected story with oversized sequence");
        return Err(StoryError::SequenceTooLong(sequence.len()));
    }
    Ok(())
}

fn check_nickname(nickname: &str) -> Result<(), StoryError> {
    let len = nickname.chars().count();
    if len == 0 || len > MAX_NICKNAME_LEN {
        return Err(StoryError::InvalidNickname);
    }
    Ok(())
}
