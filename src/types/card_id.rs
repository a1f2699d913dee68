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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Serialize;

/// The stable identity of a card: `theme|german|english`.
///
/// Bookmarks are keyed by this, so it must not depend on the card's position
/// in the deck. Nothing stops two cards in a document from having the same
/// identity; they then share a bookmark.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CardId(String);

impl CardId {
    pub fn new(theme: &str, german: &str, english: &str) -> Self {
        Self(format!("{theme}|{german}|{english}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Imported bookmark files may contain arbitrary keys; we keep them verbatim.
impl From<String> for CardId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for CardId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for CardId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let id = CardId::new("Greetings", "Hallo", "Hello");
        assert_eq!(id.to_string(), "Greetings|Hallo|Hello");
    }

    #[test]
    fn test_equality_is_by_triple() {
        let a = CardId::new("Greetings", "Hallo", "Hello");
        let b = CardId::from("Greetings|Hallo|Hello");
        let c = CardId::new("Misc", "Hallo", "Hello");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
