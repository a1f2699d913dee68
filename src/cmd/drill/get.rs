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

use axum::extract::State;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CONTENT_DISPOSITION;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use maud::Markup;
use maud::html;

use crate::cmd::drill::state::ServerState;
use crate::cmd::drill::template::page_template;
use crate::study::Study;
use crate::types::card::Card;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut mutable = state.mutable.lock().unwrap();
    let notice = mutable.notice.take();
    let body = render_page(&mutable.study, notice.as_deref());
    let html = page_template(body);
    (StatusCode::OK, Html(html.into_string()))
}

pub async fn export_handler(
    State(state): State<ServerState>,
) -> Result<(StatusCode, [(HeaderName, &'static str); 2], String), (StatusCode, String)> {
    let mutable = state.mutable.lock().unwrap();
    match mutable.study.export_bookmarks() {
        Ok(json) => Ok((
            StatusCode::OK,
            [
                (CONTENT_TYPE, "application/json"),
                (CONTENT_DISPOSITION, "attachment; filename=\"bookmarks.json\""),
            ],
            json,
        )),
        Err(e) => {
            log::error!("{e}");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

fn render_page(study: &Study, notice: Option<&str>) -> Markup {
    let session = study.session();
    // An empty view still counts as one slot, so the counter reads "1/1".
    let total = study.active_view_len().max(1);
    let position = (session.current_index() + 1).min(total);
    let progress_style = format!("width: {}%;", position * 100 / total);
    let score = session.score();
    let live = match study.answer() {
        Some(answer) if answer.evaluation.is_correct => "Correct",
        Some(_) => "Incorrect",
        None => "",
    };
    let content = match study.current_card() {
        Some(card) => render_card(study, card),
        None => {
            let message = if session.bookmarks().is_empty() {
                "No bookmarked cards yet."
            } else {
                "None of the bookmarked cards are in this document."
            };
            html! {
                div.empty {
                    p { (message) }
                }
            }
        }
    };
    html! {
        div.root {
            header.toolbar {
                span #count .chip { (position) "/" (total) }
                div.progress {
                    div.progress-fill style=(progress_style) {}
                }
                span #score .chip { (score.correct_count) " ✅ / " (score.wrong_count) " ❌" }
            }
            @if let Some(notice) = notice {
                div.notice role="status" { (notice) }
            }
            main {
                (content)
            }
            (render_controls(study))
            div #live aria-live="polite" { (live) }
        }
    }
}

fn render_card(study: &Study, card: &Card) -> Markup {
    let starred = study.session().bookmarks().contains(card.id());
    let pressed = if starred { "true" } else { "false" };
    html! {
        article.card {
            header.card-theme {
                h2.title { (card.theme()) }
                form action="/" method="post" {
                    input type="hidden" name="card" value=(card.id().as_str());
                    button #bookmark .bookmark type="submit" name="action" value="Bookmark" aria-pressed=(pressed) title="Toggle bookmark" {
                        @if starred { "★" } @else { "☆" }
                    }
                }
            }
            form action="/" method="post" {
                button #reveal .card-content type="submit" name="action" value="Reveal" title="Show or hide the translation" {
                    h3.german { (card.german()) }
                }
            }
            @if study.reveal() {
                div.examples {
                    div.english { (card.english()) }
                    @if !card.example().is_empty() {
                        div.example {
                            strong { "Satz:" } " " (card.example())
                        }
                    }
                    @if !card.example_translation().is_empty() {
                        div.example {
                            strong { "EN:" } " " (card.example_translation())
                        }
                    }
                }
            }
            (render_choices(study))
        }
    }
}

fn render_choices(study: &Study) -> Markup {
    let Some(choices) = study.choices() else {
        return html! {};
    };
    let answer = study.answer();
    let answered = answer.is_some();
    let correct = choices.correct_index();
    html! {
        form.choices action="/" method="post" {
            input type="hidden" name="action" value="Choose";
            @for (index, choice) in choices.choices().iter().enumerate() {
                @let selected = answer.is_some_and(|a| a.selected == index);
                @let missed = answered && correct == Some(index) && !selected;
                button .choice .correct[selected && choice.correct] .wrong[selected && !choice.correct] .correct-border[missed] id=(format!("choice-{}", index + 1)) type="submit" name="choice" value=(index) disabled[answered] {
                    (choice.text)
                }
            }
        }
    }
}

fn render_controls(study: &Study) -> Markup {
    let session = study.session();
    let bookmarks_label = if session.bookmarks_only() {
        "All"
    } else {
        "Bookmarks"
    };
    let exam_label = if session.exam_mode() {
        "Hide Exam"
    } else {
        "Show Exam"
    };
    html! {
        form.controls action="/" method="post" {
            button #previous type="submit" name="action" value="Previous" title="Previous card. Shortcut: ↑." { "Previous" }
            button #next type="submit" name="action" value="Next" title="Next card. Shortcut: ↓." { "Next" }
            button #shuffle type="submit" name="action" value="Shuffle" { "Shuffle" }
            button #bookmarks-only type="submit" name="action" value="BookmarksOnly" { (bookmarks_label) }
            button #exam type="submit" name="action" value="Exam" { (exam_label) }
            a #export .button href="/bookmarks.json" download="bookmarks.json" { "Export" }
        }
        form.import action="/bookmarks" method="post" {
            input #import-file type="file" accept="application/json,.json";
            textarea #payload name="payload" placeholder="Paste a bookmark file here." {}
            button #import type="submit" { "Import" }
        }
    }
}
