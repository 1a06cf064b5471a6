use crate::catalog::CatalogEntry;
use chrono::{DateTime, Local};
use thiserror::Error;

/// A game the user has added to their list, frozen at commit time.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedGame {
    pub name: String,
    pub image_url: Option<String>,
    pub genres: Vec<String>,
    pub added_on: DateTime<Local>,
    pub rating: u8,
}

/// Errors from committing an entry to the collection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommitError {
    #[error("rating required")]
    RatingRequired,
}

impl CommitError {
    pub fn user_message(&self) -> String {
        match self {
            CommitError::RatingRequired => "Rating required — press 1-5 before adding".to_string(),
        }
    }
}

/// The session's list of tracked games, in insertion order.
///
/// Records are append-only: nothing removes or rewrites a game once it is in.
#[derive(Debug, Default)]
pub struct Collection {
    games: Vec<TrackedGame>,
}

impl Collection {
    pub fn new() -> Self {
        Collection { games: Vec::new() }
    }

    /// Commit a rated catalog entry. The rating must be non-zero; the caller
    /// supplies the clock and is responsible for resetting its rating draft
    /// after a successful commit.
    pub fn commit(
        &mut self,
        entry: &CatalogEntry,
        rating: u8,
        now: DateTime<Local>,
    ) -> Result<&TrackedGame, CommitError> {
        if rating == 0 {
            return Err(CommitError::RatingRequired);
        }

        self.games.push(TrackedGame {
            name: entry.name.clone(),
            image_url: entry.image_url.clone(),
            genres: entry.genres.clone(),
            added_on: now,
            rating,
        });
        Ok(self.games.last().expect("just pushed"))
    }

    pub fn games(&self) -> &[TrackedGame] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// Count genre occurrences across the collection, keyed in first-occurrence
/// order. A game with N genres contributes to N counts, so the counts sum to
/// the total number of genre occurrences.
pub fn genre_distribution(games: &[TrackedGame]) -> Vec<(String, u64)> {
    let mut counts: Vec<(String, u64)> = Vec::new();
    for game in games {
        for genre in &game.genres {
            match counts.iter_mut().find(|(name, _)| name == genre) {
                Some((_, n)) => *n += 1,
                None => counts.push((genre.clone(), 1)),
            }
        }
    }
    counts
}
