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

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::error::Fallible;
use crate::error::fail;

/// Running tally of multiple-choice answers.
///
/// Older score records used the keys `correct` and `wrong`, which are still
/// accepted when reading.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Score {
    #[serde(alias = "correct")]
    pub correct_count: usize,
    #[serde(alias = "wrong")]
    pub wrong_count: usize,
}

impl Score {
    /// Parses a stored score. Only a JSON object is a score: serde would
    /// otherwise also accept a `[correct, wrong]` array.
    pub fn from_json(json: &str) -> Fallible<Self> {
        let value: Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return fail("invalid score: expected a JSON object.");
        }
        Ok(serde_json::from_value(value)?)
    }
}
