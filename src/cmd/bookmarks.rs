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

use std::fs::read_to_string;
use std::path::Path;

use crate::collection::Collection;
use crate::config::Config;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::bookmarks::Bookmarks;

/// Prints the saved bookmarks for the document as JSON.
pub async fn export_bookmarks(config: &Config) -> Fallible<()> {
    let coll = Collection::load(config.source()).await?;
    let store = coll.open_store(&config.database)?;
    println!("{}", store.load_bookmarks().to_json()?);
    Ok(())
}

/// Replaces the saved bookmarks for the document with those in `file`.
pub async fn import_bookmarks(config: &Config, file: &Path) -> Fallible<()> {
    if !file.exists() {
        return fail("bookmark file does not exist.");
    }
    let payload = read_to_string(file)?;
    let bookmarks = Bookmarks::from_json(&payload)?;
    let coll = Collection::load(config.source()).await?;
    let store = coll.open_store(&config.database)?;
    let unknown = bookmarks
        .iter()
        .filter(|id| !coll.deck.cards().iter().any(|card| card.id() == *id))
        .count();
    if unknown > 0 {
        log::warn!("{unknown} imported bookmarks don't match any card.");
    }
    store.save_bookmarks(&bookmarks);
    println!("Imported {} bookmarks.", bookmarks.len());
    Ok(())
}
