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
use std::path::PathBuf;
use std::time::Instant;

use crate::deck::Deck;
use crate::error::Fallible;
use crate::error::fail;
use crate::normalize::rtf_to_text;
use crate::parser::parse_themes;
use crate::types::theme::Theme;

/// Where the vocabulary document lives.
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

impl Source {
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Source::Url(location.to_string())
        } else {
            Source::File(PathBuf::from(location))
        }
    }

    /// The string that scopes this document's saved session. Files are
    /// identified by their canonical path, so that the same file reached
    /// through different relative paths shares its bookmarks.
    pub fn identity(&self) -> String {
        match self {
            Source::File(path) => path
                .canonicalize()
                .unwrap_or_else(|_| path.clone())
                .display()
                .to_string(),
            Source::Url(url) => url.clone(),
        }
    }

    /// Fetches the raw document text. Bytes that aren't valid UTF-8 are
    /// replaced rather than rejected.
    pub async fn fetch(&self) -> Fallible<String> {
        match self {
            Source::File(path) => {
                if !path.exists() {
                    return fail("document does not exist.");
                }
                let bytes = tokio::fs::read(path).await?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            Source::Url(url) => {
                let response = reqwest::get(url).await?.error_for_status()?;
                Ok(response.text().await?)
            }
        }
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Fetches, normalizes and parses the document.
pub async fn load_themes(source: &Source) -> Fallible<Vec<Theme>> {
    log::debug!("Loading {source}...");
    let start = Instant::now();
    let raw = source.fetch().await?;
    let themes = parse_themes(&rtf_to_text(&raw));
    let duration = start.elapsed().as_millis();
    log::debug!("Document loaded in {duration}ms.");
    Ok(themes)
}

/// Like [`load_themes`], but never fails: if the document can't be fetched,
/// or has no vocabulary in it, the deck holds a single sample card.
pub async fn load_deck(source: &Source) -> Deck {
    match load_themes(source).await {
        Ok(themes) => {
            let deck = Deck::flatten(&themes);
            if deck.is_empty() {
                log::warn!("No vocabulary found in {source}, using a sample card.");
                Deck::placeholder()
            } else {
                deck
            }
        }
        Err(e) => {
            log::error!("Failed to load {source}: {e}");
            Deck::placeholder()
        }
    }
}
