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

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde_json::Value;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card_id::CardId;

/// The set of bookmarked card identities.
///
/// On disk, and in exported files, this is a JSON object mapping each
/// identity to `true`.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Bookmarks {
    ids: BTreeSet<CardId>,
}

impl Bookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.ids.contains(id)
    }

    /// Adds the identity if absent, removes it if present.
    pub fn toggle(&mut self, id: &CardId) {
        if !self.ids.remove(id) {
            self.ids.insert(id.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardId> {
        self.ids.iter()
    }

    pub fn to_json(&self) -> Fallible<String> {
        let map: BTreeMap<&CardId, bool> = self.ids.iter().map(|id| (id, true)).collect();
        Ok(serde_json::to_string(&map)?)
    }

    /// Parse a bookmark document. Only JSON objects are accepted. Entries
    /// whose value is falsy (`false`, `null`, `0`, `""`) are not bookmarks.
    pub fn from_json(json: &str) -> Fallible<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| ErrorReport::new(format!("invalid bookmark file: {e}")))?;
        let object = match value {
            Value::Object(object) => object,
            _ => return fail("invalid bookmark file: expected a JSON object."),
        };
        let ids = object
            .into_iter()
            .filter(|(_, value)| is_truthy(value))
            .map(|(key, _)| CardId::from(key))
            .collect();
        Ok(Self { ids })
    }
}

impl FromIterator<CardId> for Bookmarks {
    fn from_iter<T: IntoIterator<Item = CardId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let id = CardId::new("Greetings", "Hallo", "Hello");
        let mut bookmarks = Bookmarks::new();
        bookmarks.toggle(&id);
        assert!(bookmarks.contains(&id));
        bookmarks.toggle(&id);
        assert!(!bookmarks.contains(&id));
        assert!(bookmarks.is_empty());
    }

    #[test]
    fn test_to_json() -> Fallible<()> {
        let bookmarks: Bookmarks = [
            CardId::new("B", "Tschüss", "Bye"),
            CardId::new("A", "Hallo", "Hello"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            bookmarks.to_json()?,
            r#"{"A|Hallo|Hello":true,"B|Tschüss|Bye":true}"#
        );
        Ok(())
    }

    #[test]
    fn test_from_json_keeps_truthy_keys() -> Fallible<()> {
        let json = r#"{"a|x|y": true, "b|x|y": false, "c|x|y": 1, "d|x|y": null}"#;
        let bookmarks = Bookmarks::from_json(json)?;
        assert_eq!(bookmarks.len(), 2);
        assert!(bookmarks.contains(&CardId::from("a|x|y")));
        assert!(bookmarks.contains(&CardId::from("c|x|y")));
        Ok(())
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Bookmarks::from_json("not json").is_err());
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert!(Bookmarks::from_json("[1, 2, 3]").is_err());
        assert!(Bookmarks::from_json("null").is_err());
        assert!(Bookmarks::from_json("\"a|b|c\"").is_err());
    }

    #[test]
    fn test_round_trip() -> Fallible<()> {
        let bookmarks: Bookmarks = [CardId::new("Greetings", "Hallo", "Hello")]
            .into_iter()
            .collect();
        let restored = Bookmarks::from_json(&bookmarks.to_json()?)?;
        assert_eq!(restored, bookmarks);
        Ok(())
    }
}
