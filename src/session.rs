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

use crate::deck::resolve_index;
use crate::types::bookmarks::Bookmarks;
use crate::types::card_id::CardId;
use crate::types::score::Score;

/// The user's position, bookmarks, score, and display modes.
///
/// Every transition consumes the state and returns the new one. Persisting
/// the result is up to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    /// Position within the active view, not within the deck.
    current_index: usize,
    bookmarks: Bookmarks,
    exam_mode: bool,
    bookmarks_only: bool,
    score: Score,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current_index: 0,
            bookmarks: Bookmarks::new(),
            exam_mode: true,
            bookmarks_only: false,
            score: Score::default(),
        }
    }
}

impl SessionState {
    /// Rebuilds a state from persisted parts. Display modes are not
    /// persisted and start at their defaults.
    pub fn restore(current_index: usize, bookmarks: Bookmarks, score: Score) -> Self {
        Self {
            current_index,
            bookmarks,
            score,
            ..Self::default()
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn bookmarks(&self) -> &Bookmarks {
        &self.bookmarks
    }

    pub fn exam_mode(&self) -> bool {
        self.exam_mode
    }

    pub fn bookmarks_only(&self) -> bool {
        self.bookmarks_only
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn record_answer(mut self, is_correct: bool) -> Self {
        if is_correct {
            self.score.correct_count = self.score.correct_count.saturating_add(1);
        } else {
            self.score.wrong_count = self.score.wrong_count.saturating_add(1);
        }
        self
    }

    pub fn toggle_exam_mode(mut self) -> Self {
        self.exam_mode = !self.exam_mode;
        self.current_index = 0;
        self
    }

    /// Switching views changes what the index refers to, so it goes back to
    /// the start.
    pub fn toggle_bookmarks_only(mut self) -> Self {
        self.bookmarks_only = !self.bookmarks_only;
        self.current_index = 0;
        self
    }

    pub fn toggle_bookmark(mut self, id: &CardId) -> Self {
        self.bookmarks.toggle(id);
        self
    }

    /// Replaces the whole bookmark set, as an import does.
    pub fn with_bookmarks(mut self, bookmarks: Bookmarks) -> Self {
        self.bookmarks = bookmarks;
        self
    }

    pub fn navigate(mut self, delta: i64, active_view_len: usize) -> Self {
        let current = i64::try_from(self.current_index).unwrap_or(0);
        self.current_index = resolve_index(active_view_len, current.saturating_add(delta));
        self
    }

    pub fn reset_index(mut self) -> Self {
        self.current_index = 0;
        self
    }

    /// Pulls the index back into range after the active view shrank, e.g.
    /// when the current card was un-bookmarked in bookmarks-only mode.
    pub fn clamp_index(self, active_view_len: usize) -> Self {
        self.navigate(0, active_view_len)
    }
}
