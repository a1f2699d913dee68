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

use std::mem::take;

use rand::Rng;

use crate::deck::Deck;
use crate::error::Fallible;
use crate::quiz::ChoiceSet;
use crate::quiz::Evaluation;
use crate::quiz::build_choices;
use crate::session::SessionState;
use crate::types::bookmarks::Bookmarks;
use crate::types::card::Card;
use crate::types::card_id::CardId;

/// Something the user asked for.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    Next,
    Previous,
    Shuffle,
    ToggleBookmark(CardId),
    ToggleExamMode,
    ToggleBookmarksOnly,
    SelectChoice(usize),
    /// Show or hide the translation and example of the current card.
    Reveal,
    ImportBookmarks(String),
}

/// The answer given to the current card's choices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Answer {
    pub selected: usize,
    pub evaluation: Evaluation,
}

/// Which persisted parts of the session an intent touched.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct Changes {
    pub index: bool,
    pub bookmarks: bool,
    pub score: bool,
}

/// A study session over a deck: the deck, the session state, and what is on
/// screen for the current card.
pub struct Study {
    deck: Deck,
    session: SessionState,
    /// The choices offered for the current card, in exam mode.
    choices: Option<ChoiceSet>,
    answer: Option<Answer>,
    reveal: bool,
}

impl Study {
    pub fn new<R: Rng + ?Sized>(deck: Deck, session: SessionState, rng: &mut R) -> Self {
        let mut study = Self {
            deck,
            session,
            choices: None,
            answer: None,
            reveal: false,
        };
        let len = study.active_view_len();
        study.update(|session| session.clamp_index(len));
        study.refresh(rng);
        study
    }

    #[cfg(test)]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn choices(&self) -> Option<&ChoiceSet> {
        self.choices.as_ref()
    }

    pub fn answer(&self) -> Option<Answer> {
        self.answer
    }

    pub fn reveal(&self) -> bool {
        self.reveal
    }

    pub fn active_view(&self) -> Vec<&Card> {
        self.deck.active_view(&self.session)
    }

    pub fn active_view_len(&self) -> usize {
        self.active_view().len()
    }

    /// The card at the current index, or `None` if the view is empty.
    pub fn current_card(&self) -> Option<&Card> {
        self.active_view()
            .get(self.session.current_index())
            .copied()
    }

    /// The bookmark set as a JSON document.
    pub fn export_bookmarks(&self) -> Fallible<String> {
        self.session.bookmarks().to_json()
    }

    /// Applies an intent. Only an import of a malformed bookmark document
    /// fails, and it leaves the session untouched.
    pub fn apply<R: Rng + ?Sized>(&mut self, intent: Intent, rng: &mut R) -> Fallible<Changes> {
        let mut changes = Changes::default();
        match intent {
            Intent::Next => {
                self.navigate(1, rng);
                changes.index = true;
            }
            Intent::Previous => {
                self.navigate(-1, rng);
                changes.index = true;
            }
            Intent::Shuffle => {
                self.deck.shuffle(rng);
                self.update(SessionState::reset_index);
                self.refresh(rng);
                changes.index = true;
            }
            Intent::ToggleBookmark(id) => {
                changes = self.replace_bookmarks(rng, |session| session.toggle_bookmark(&id));
            }
            Intent::ToggleExamMode => {
                self.update(SessionState::toggle_exam_mode);
                self.refresh(rng);
                changes.index = true;
            }
            Intent::ToggleBookmarksOnly => {
                self.update(SessionState::toggle_bookmarks_only);
                self.refresh(rng);
                changes.index = true;
            }
            Intent::SelectChoice(selected) => {
                if self.answer.is_some() {
                    log::debug!("Ignoring a second answer to the same card.");
                    return Ok(changes);
                }
                let evaluation = match self.choices.as_ref() {
                    Some(choices) => choices.evaluate(selected),
                    None => None,
                };
                match evaluation {
                    Some(evaluation) => {
                        self.update(|session| session.record_answer(evaluation.is_correct));
                        self.answer = Some(Answer {
                            selected,
                            evaluation,
                        });
                        changes.score = true;
                    }
                    None => {
                        log::debug!("Ignoring selection of unknown choice {selected}.");
                    }
                }
            }
            Intent::Reveal => {
                self.reveal = !self.reveal;
            }
            Intent::ImportBookmarks(payload) => {
                let bookmarks = Bookmarks::from_json(&payload)?;
                log::debug!("Imported {} bookmarks.", bookmarks.len());
                changes = self.replace_bookmarks(rng, |session| session.with_bookmarks(bookmarks));
            }
        }
        Ok(changes)
    }

    /// Changes the bookmark set. In bookmarks-only mode this can shrink the
    /// view under the current index, so the index is pulled back into range
    /// and the card's choices rebuilt if the current card changed.
    fn replace_bookmarks<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        f: impl FnOnce(SessionState) -> SessionState,
    ) -> Changes {
        let before: Option<CardId> = self.current_card().map(|card| card.id().clone());
        let index = self.session.current_index();
        self.update(f);
        let len = self.active_view_len();
        self.update(|session| session.clamp_index(len));
        let after: Option<CardId> = self.current_card().map(|card| card.id().clone());
        if before != after {
            self.refresh(rng);
        }
        Changes {
            index: index != self.session.current_index(),
            bookmarks: true,
            score: false,
        }
    }

    fn navigate<R: Rng + ?Sized>(&mut self, delta: i64, rng: &mut R) {
        let len = self.active_view_len();
        self.update(|session| session.navigate(delta, len));
        self.refresh(rng);
    }

    fn update(&mut self, f: impl FnOnce(SessionState) -> SessionState) {
        self.session = f(take(&mut self.session));
    }

    /// Resets what is on screen for the (possibly new) current card.
    fn refresh<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.answer = None;
        self.reveal = false;
        self.choices = match self.current_card() {
            Some(card) if self.session.exam_mode() => Some(build_choices(card, &self.deck, rng)),
            _ => None,
        };
    }
}
