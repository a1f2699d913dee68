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

use crate::types::card_id::CardId;
use crate::types::theme::VocabularyItem;

/// A vocabulary item together with the title of the theme it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    /// The title of the theme this card belongs to.
    theme: String,
    /// The card's content.
    item: VocabularyItem,
    /// The cached identity of the card.
    id: CardId,
}

impl Card {
    pub fn new(theme: impl Into<String>, item: VocabularyItem) -> Self {
        let theme = theme.into();
        let id = CardId::new(&theme, &item.german, &item.english);
        Self { theme, item, id }
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn german(&self) -> &str {
        &self.item.german
    }

    pub fn english(&self) -> &str {
        &self.item.english
    }

    pub fn example(&self) -> &str {
        &self.item.example
    }

    pub fn example_translation(&self) -> &str {
        &self.item.example_translation
    }

    pub fn id(&self) -> &CardId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_ignores_examples() {
        let plain = Card::new("Greetings", VocabularyItem::new("Hallo", "Hello"));
        let mut item = VocabularyItem::new("Hallo", "Hello");
        item.example = "Hallo, wie geht's?".to_string();
        let annotated = Card::new("Greetings", item);
        assert_eq!(plain.id(), annotated.id());
        assert_eq!(plain.id().as_str(), "Greetings|Hallo|Hello");
    }
}
