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

use rand::Rng;
use rand::seq::SliceRandom;

use crate::session::SessionState;
use crate::types::card::Card;
use crate::types::theme::Theme;
use crate::types::theme::VocabularyItem;

/// The ordered list of cards being studied.
#[derive(Clone, Debug, PartialEq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Flattens themes into cards, preserving the order in which themes and
    /// items were encountered.
    pub fn flatten(themes: &[Theme]) -> Self {
        let cards = themes
            .iter()
            .flat_map(|theme| {
                theme
                    .items
                    .iter()
                    .map(|item| Card::new(theme.title.clone(), item.clone()))
            })
            .collect();
        Self { cards }
    }

    /// The single card shown when the document could not be loaded or had
    /// no vocabulary in it.
    pub fn placeholder() -> Self {
        Self {
            cards: vec![Card::new("Sample", VocabularyItem::new("Hallo", "Hello"))],
        }
    }

    /// Shuffles the cards in place. Card identities are unaffected.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// The cards visible under the given session: all of them, or only the
    /// bookmarked ones, in deck order.
    pub fn active_view(&self, session: &SessionState) -> Vec<&Card> {
        self.cards
            .iter()
            .filter(|card| !session.bookmarks_only() || session.bookmarks().contains(card.id()))
            .collect()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Wraps `requested` into `[0, len)` using floored modulo, so that `-1`
/// refers to the last card. An empty view always resolves to 0.
pub fn resolve_index(len: usize, requested: i64) -> usize {
    if len == 0 {
        return 0;
    }
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    // `rem_euclid` is non-negative and below `len`, so it fits in a usize.
    requested.rem_euclid(len) as usize
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::parser::parse_themes;
    use crate::types::card_id::CardId;

    fn sample_deck() -> Deck {
        let themes = parse_themes(
            "1. Greetings\nHallo - Hello\nTschüss - Bye\n2. Food\nApfel - apple\nBrot - bread\nKäse - cheese",
        );
        Deck::flatten(&themes)
    }

    fn ids(cards: &[&Card]) -> Vec<CardId> {
        cards.iter().map(|card| card.id().clone()).collect()
    }

    #[test]
    fn test_flatten_preserves_order() {
        let deck = sample_deck();
        let germans: Vec<&str> = deck.cards().iter().map(|card| card.german()).collect();
        assert_eq!(germans, vec!["Hallo", "Tschüss", "Apfel", "Brot", "Käse"]);
        assert_eq!(deck.cards()[0].theme(), "Greetings");
        assert_eq!(deck.cards()[4].theme(), "Food");
    }

    #[test]
    fn test_identities_are_stable_across_parses() {
        let first: Vec<CardId> = sample_deck().cards().iter().map(|c| c.id().clone()).collect();
        let second: Vec<CardId> = sample_deck().cards().iter().map(|c| c.id().clone()).collect();
        assert_eq!(first, second);
        assert_eq!(first[0].as_str(), "Greetings|Hallo|Hello");
    }

    #[test]
    fn test_placeholder() {
        let deck = Deck::placeholder();
        assert_eq!(deck.len(), 1);
        let card = &deck.cards()[0];
        assert_eq!(card.theme(), "Sample");
        assert_eq!(card.german(), "Hallo");
        assert_eq!(card.english(), "Hello");
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let deck = sample_deck();
        let mut shuffled = deck.clone();
        let mut rng = StdRng::seed_from_u64(7);
        shuffled.shuffle(&mut rng);
        let mut before: Vec<CardId> = deck.cards().iter().map(|c| c.id().clone()).collect();
        let mut after: Vec<CardId> = shuffled.cards().iter().map(|c| c.id().clone()).collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_active_view() {
        let deck = sample_deck();
        let session = SessionState::default();
        assert_eq!(deck.active_view(&session).len(), 5);

        let brot = deck.cards()[3].id().clone();
        let hallo = deck.cards()[0].id().clone();
        let session = session
            .toggle_bookmark(&brot)
            .toggle_bookmark(&hallo)
            .toggle_bookmarks_only();
        let view = deck.active_view(&session);
        assert_eq!(ids(&view), vec![hallo, brot]);
    }

    #[test]
    fn test_toggling_bookmarks_only_twice_restores_view() {
        let deck = sample_deck();
        let session = SessionState::default().toggle_bookmark(deck.cards()[2].id());
        let before = ids(&deck.active_view(&session));
        let session = session.toggle_bookmarks_only();
        assert_eq!(deck.active_view(&session).len(), 1);
        let session = session.toggle_bookmarks_only();
        assert_eq!(ids(&deck.active_view(&session)), before);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_resolve_index() {
        assert_eq!(resolve_index(5, -1), 4);
        assert_eq!(resolve_index(5, 5), 0);
        assert_eq!(resolve_index(5, 2), 2);
        assert_eq!(resolve_index(5, -11), 4);
        assert_eq!(resolve_index(0, 3), 0);
        assert_eq!(resolve_index(0, -3), 0);
    }

    #[test]
    fn test_resolve_index_is_always_in_range() {
        for len in 0..12usize {
            for requested in -40..40i64 {
                let index = resolve_index(len, requested);
                assert!(index < len.max(1), "len={len} requested={requested}");
            }
        }
        assert!(resolve_index(3, i64::MIN) < 3);
        assert!(resolve_index(3, i64::MAX) < 3);
    }
}
