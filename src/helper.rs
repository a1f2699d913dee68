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

use std::fs::write;
use std::path::PathBuf;

use tempfile::tempdir;

use crate::error::Fallible;

/// Creates a temporary directory that outlives the test.
pub fn create_tmp_directory() -> Fallible<PathBuf> {
    let dir: PathBuf = tempdir()?.keep().canonicalize()?;
    Ok(dir)
}

/// Writes `contents` to a file in a fresh temporary directory and returns
/// the file's path.
pub fn create_tmp_document(name: &str, contents: &str) -> Fallible<PathBuf> {
    let path = create_tmp_directory()?.join(name);
    write(&path, contents)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tmp_document() -> Fallible<()> {
        let path = create_tmp_document("words.txt", "Hund - dog")?;
        assert!(path.is_file());
        assert_eq!(std::fs::read_to_string(path)?, "Hund - dog");
        Ok(())
    }
}
