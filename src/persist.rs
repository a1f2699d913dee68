// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::db::Database;
use crate::error::Fallible;
use crate::session::SessionState;
use crate::study::Changes;
use crate::types::bookmarks::Bookmarks;
use crate::types::score::Score;

/// Reads and writes the persisted parts of a session for one document.
///
/// Session data is a convenience, so nothing here fails: unreadable values
/// fall back to their defaults and failed writes are logged and dropped.
pub struct SessionStore {
    db: Database,
    /// The document's identity. Every key is scoped by it.
    scope: String,
}

impl SessionStore {
    pub fn new(db: Database, scope: impl Into<String>) -> Self {
        Self {
            db,
            scope: scope.into(),
        }
    }

    fn index_key(&self) -> String {
        format!("wordwall:{}", self.scope)
    }

    fn bookmarks_key(&self) -> String {
        format!("wordwall:bookmarks:{}", self.scope)
    }

    fn scores_key(&self) -> String {
        format!("wordwall:scores:{}", self.scope)
    }

    /// Restores the session for a deck of `deck_len` cards.
    pub fn load(&self, deck_len: usize) -> SessionState {
        SessionState::restore(
            self.load_index(deck_len),
            self.load_bookmarks(),
            self.load_score(),
        )
    }

    /// The saved index, if it's a valid position in a deck of `deck_len`
    /// cards. Otherwise 0.
    pub fn load_index(&self, deck_len: usize) -> usize {
        let Some(value) = self.read(&self.index_key()) else {
            return 0;
        };
        match value.trim().parse::<usize>() {
            Ok(index) if index < deck_len => index,
            Ok(index) => {
                log::debug!("Saved index {index} is out of range, starting over.");
                0
            }
            Err(_) => {
                log::warn!("Ignoring corrupt saved index: {value:?}");
                0
            }
        }
    }

    pub fn load_bookmarks(&self) -> Bookmarks {
        let Some(value) = self.read(&self.bookmarks_key()) else {
            return Bookmarks::new();
        };
        match Bookmarks::from_json(&value) {
            Ok(bookmarks) => bookmarks,
            Err(e) => {
                log::warn!("Ignoring corrupt saved bookmarks: {e}");
                Bookmarks::new()
            }
        }
    }

    pub fn load_score(&self) -> Score {
        let Some(value) = self.read(&self.scores_key()) else {
            return Score::default();
        };
        match Score::from_json(&value) {
            Ok(score) => score,
            Err(e) => {
                log::warn!("Ignoring corrupt saved score: {e}");
                Score::default()
            }
        }
    }

    pub fn save_index(&self, index: usize) {
        self.write(&self.index_key(), Ok(index.to_string()));
    }

    pub fn save_bookmarks(&self, bookmarks: &Bookmarks) {
        self.write(&self.bookmarks_key(), bookmarks.to_json());
    }

    pub fn save_score(&self, score: Score) {
        let json: Fallible<String> = serde_json::to_string(&score).map_err(Into::into);
        self.write(&self.scores_key(), json);
    }

    /// Saves only what an intent touched.
    pub fn save_changes(&self, state: &SessionState, changes: Changes) {
        if changes.index {
            self.save_index(state.current_index());
        }
        if changes.bookmarks {
            self.save_bookmarks(state.bookmarks());
        }
        if changes.score {
            self.save_score(state.score());
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.db.get(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to read {key}: {e}");
                None
            }
        }
    }

    fn write(&self, key: &str, value: Fallible<String>) {
        let result = value.and_then(|value| self.db.set(key, &value));
        if let Err(e) = result {
            log::warn!("Failed to save {key}: {e}");
        }
    }
}
