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

/// The title given to vocabulary that appears before any heading.
pub const MISC_THEME: &str = "Misc";

/// A numbered section of the vocabulary document.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub title: String,
    pub items: Vec<VocabularyItem>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VocabularyItem {
    /// The German term.
    pub german: String,
    /// The English translation of the term.
    pub english: String,
    /// An example sentence ("Satz"), possibly empty.
    pub example: String,
    /// The translation of the example sentence, possibly empty.
    pub example_translation: String,
}

impl Theme {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }
}

impl VocabularyItem {
    pub fn new(german: impl Into<String>, english: impl Into<String>) -> Self {
        Self {
            german: german.into(),
            english: english.into(),
            example: String::new(),
            example_translation: String::new(),
        }
    }
}
