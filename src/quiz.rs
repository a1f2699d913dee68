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

use std::collections::HashSet;

use rand::Rng;
use rand::seq::IndexedRandom;
use rand::seq::SliceRandom;

use crate::deck::Deck;
use crate::types::card::Card;

/// How many wrong answers are offered next to the right one.
const DISTRACTOR_COUNT: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct Choice {
    pub text: String,
    pub correct: bool,
}

/// The options offered for one card in exam mode.
#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceSet {
    choices: Vec<Choice>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub is_correct: bool,
}

impl ChoiceSet {
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Evaluates the choice at `selected`. Returns `None` if there is no such
    /// choice.
    pub fn evaluate(&self, selected: usize) -> Option<Evaluation> {
        self.choices.get(selected).map(|choice| Evaluation {
            is_correct: choice.correct,
        })
    }

    /// Position of the right answer.
    pub fn correct_index(&self) -> Option<usize> {
        self.choices.iter().position(|choice| choice.correct)
    }
}

/// Builds the choices for `card`: its English text, plus up to two distinct
/// distractors drawn from the rest of the deck, in random order.
pub fn build_choices<R: Rng + ?Sized>(card: &Card, deck: &Deck, rng: &mut R) -> ChoiceSet {
    let correct = card.english();
    let mut seen: HashSet<&str> = HashSet::new();
    let pool: Vec<&str> = deck
        .cards()
        .iter()
        .map(|other| other.english())
        .filter(|text| !text.is_empty() && *text != correct)
        .filter(|text| seen.insert(*text))
        .collect();

    let mut choices: Vec<Choice> = vec![Choice {
        text: correct.to_string(),
        correct: true,
    }];
    choices.extend(
        pool.choose_multiple(rng, DISTRACTOR_COUNT)
            .map(|text| Choice {
                text: text.to_string(),
                correct: false,
            }),
    );
    choices.shuffle(rng);
    ChoiceSet { choices }
}
