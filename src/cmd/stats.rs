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

use clap::ValueEnum;
use serde::Serialize;

use crate::collection::Collection;
use crate::config::Config;
use crate::error::Fallible;
use crate::persist::SessionStore;

#[derive(ValueEnum, Clone)]
pub enum StatsFormat {
    /// Human-readable output.
    Text,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub async fn print_stats(config: &Config, format: StatsFormat) -> Fallible<()> {
    let coll = Collection::load(config.source()).await?;
    let store = coll.open_store(&config.database)?;
    let stats = get_stats(&coll, &store);
    match format {
        StatsFormat::Text => {
            print!("{}", stats.to_text());
        }
        StatsFormat::Json => {
            let stats_json = serde_json::to_string_pretty(&stats)?;
            println!("{}", stats_json);
        }
    }
    Ok(())
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    theme_count: usize,
    card_count: usize,
    bookmark_count: usize,
    /// Bookmarks that no longer match a card, because the card was edited
    /// or removed from the document.
    orphan_bookmark_count: usize,
    current_index: usize,
    correct_count: usize,
    wrong_count: usize,
}

impl Stats {
    fn to_text(&self) -> String {
        format!(
            "Themes:    {}\nCards:     {}\nBookmarks: {} ({} orphaned)\nPosition:  {}\nScore:     {} correct, {} wrong\n",
            self.theme_count,
            self.card_count,
            self.bookmark_count,
            self.orphan_bookmark_count,
            self.current_index + 1,
            self.correct_count,
            self.wrong_count,
        )
    }
}

fn get_stats(coll: &Collection, store: &SessionStore) -> Stats {
    let session = store.load(coll.deck.len());
    let bookmarks = session.bookmarks();
    let orphan_bookmark_count = bookmarks
        .iter()
        .filter(|id| !coll.deck.cards().iter().any(|card| card.id() == *id))
        .count();
    let score = session.score();
    Stats {
        theme_count: coll.themes.len(),
        card_count: coll.deck.len(),
        bookmark_count: bookmarks.len(),
        orphan_bookmark_count,
        current_index: session.current_index(),
        correct_count: score.correct_count,
        wrong_count: score.wrong_count,
    }
}
