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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::cmd::drill::state::ServerState;
use crate::error::Fallible;
use crate::error::fail;
use crate::study::Intent;
use crate::types::card_id::CardId;

#[derive(Debug, Deserialize)]
enum Action {
    Next,
    Previous,
    Shuffle,
    Bookmark,
    Exam,
    BookmarksOnly,
    Choose,
    Reveal,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    choice: Option<usize>,
    card: Option<String>,
}

impl FormData {
    fn intent(self) -> Fallible<Intent> {
        let intent = match self.action {
            Action::Next => Intent::Next,
            Action::Previous => Intent::Previous,
            Action::Shuffle => Intent::Shuffle,
            Action::Bookmark => match self.card {
                Some(card) => Intent::ToggleBookmark(CardId::from(card)),
                None => return fail("no card to bookmark."),
            },
            Action::Exam => Intent::ToggleExamMode,
            Action::BookmarksOnly => Intent::ToggleBookmarksOnly,
            Action::Choose => match self.choice {
                Some(choice) => Intent::SelectChoice(choice),
                None => return fail("no choice selected."),
            },
            Action::Reveal => Intent::Reveal,
        };
        Ok(intent)
    }
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    match action_handler(&state, form) {
        Ok(_) => {}
        Err(e) => {
            log::error!("{e}");
        }
    }
    Redirect::to("/")
}

fn action_handler(state: &ServerState, form: FormData) -> Fallible<()> {
    let intent = form.intent()?;
    log::debug!("{intent:?}");
    let mut mutable = state.mutable.lock().unwrap();
    let mutable = &mut *mutable;
    let changes = mutable.study.apply(intent, &mut rand::rng())?;
    mutable.store.save_changes(mutable.study.session(), changes);
    Ok(())
}

#[derive(Deserialize)]
pub struct ImportForm {
    payload: String,
}

/// Replaces the bookmarks with an uploaded bookmark file. A bad file leaves
/// them as they were and tells the user why.
pub async fn import_handler(
    State(state): State<ServerState>,
    Form(form): Form<ImportForm>,
) -> Redirect {
    let mut mutable = state.mutable.lock().unwrap();
    let mutable = &mut *mutable;
    let mut rng = rand::rng();
    let notice = match mutable
        .study
        .apply(Intent::ImportBookmarks(form.payload), &mut rng)
    {
        Ok(changes) => {
            mutable.store.save_changes(mutable.study.session(), changes);
            let count = mutable.study.session().bookmarks().len();
            format!("Imported {count} bookmarks.")
        }
        Err(e) => {
            log::warn!("Rejected bookmark import: {e}");
            format!("Could not import bookmarks: {}", e.message())
        }
    };
    mutable.notice = Some(notice);
    Redirect::to("/")
}
