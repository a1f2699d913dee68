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

use std::path::Path;

use crate::db::Database;
use crate::deck::Deck;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::persist::SessionStore;
use crate::source::Source;
use crate::source::load_themes;
use crate::types::theme::Theme;

/// A document that loaded and has vocabulary in it. Unlike the drill
/// server, which falls back to a sample card, the command-line tools want
/// to hear about broken documents.
pub struct Collection {
    pub source: Source,
    pub themes: Vec<Theme>,
    pub deck: Deck,
}

impl Collection {
    pub async fn load(source: Source) -> Fallible<Self> {
        let themes = load_themes(&source).await?;
        let deck = Deck::flatten(&themes);
        if deck.is_empty() {
            return fail("no vocabulary found.");
        }
        log::debug!(
            "Found {} cards in {} themes.",
            deck.len(),
            themes.len()
        );
        Ok(Self {
            source,
            themes,
            deck,
        })
    }

    pub fn open_store(&self, database: &Path) -> Fallible<SessionStore> {
        open_store(database, &self.source)
    }
}

/// Opens the session store for `source` in the database at `database`.
pub fn open_store(database: &Path, source: &Source) -> Fallible<SessionStore> {
    let database: &str = database
        .to_str()
        .ok_or_else(|| ErrorReport::new("invalid path"))?;
    let db = Database::new(database)?;
    Ok(SessionStore::new(db, source.identity()))
}
