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
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::source::Source;

pub const DEFAULT_CONFIG_PATH: &str = "wordwall.toml";
pub const DEFAULT_SOURCE: &str = "vocabulary.rtf";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE: &str = "wordwall.db";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path or URL of the vocabulary document.
    pub source: String,
    pub port: u16,
    /// Path to the SQLite database holding saved sessions.
    pub database: PathBuf,
    pub open_browser: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            port: DEFAULT_PORT,
            database: PathBuf::from(DEFAULT_DATABASE),
            open_browser: true,
        }
    }
}

impl Config {
    pub fn parse(text: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(text)?;
        Ok(config)
    }

    /// Loads the configuration. An explicit path must exist; the default
    /// `wordwall.toml` is optional.
    pub fn load(path: Option<&Path>) -> Fallible<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return fail("configuration file does not exist.");
                }
                log::debug!("Reading configuration from {}", path.display());
                Self::parse(&read_to_string(path)?)
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    log::debug!("Reading configuration from {DEFAULT_CONFIG_PATH}");
                    Self::parse(&read_to_string(path)?)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Applies command-line overrides.
    pub fn with_overrides(
        mut self,
        source: Option<String>,
        port: Option<u16>,
        database: Option<PathBuf>,
        no_open: bool,
    ) -> Self {
        if let Some(source) = source {
            self.source = source;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(database) = database {
            self.database = database;
        }
        if no_open {
            self.open_browser = false;
        }
        self
    }

    pub fn source(&self) -> Source {
        Source::parse(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_document;

    #[test]
    fn test_defaults() -> Fallible<()> {
        let config = Config::parse("")?;
        assert_eq!(config, Config::default());
        assert_eq!(config.port, 8000);
        assert_eq!(config.database, PathBuf::from("wordwall.db"));
        assert!(config.open_browser);
        Ok(())
    }

    #[test]
    fn test_partial_file() -> Fallible<()> {
        let config = Config::parse("source = \"https://example.com/words.rtf\"\nport = 9000\n")?;
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.source(),
            Source::Url("https://example.com/words.rtf".to_string())
        );
        assert_eq!(config.database, PathBuf::from(DEFAULT_DATABASE));
        Ok(())
    }

    #[test]
    fn test_unknown_field() {
        let result = Config::parse("colour = \"blue\"");
        assert!(result.is_err());
        assert!(
            result
                .err()
                .unwrap()
                .to_string()
                .starts_with("error: invalid configuration:")
        );
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(
            Some("words.txt".to_string()),
            Some(1234),
            None,
            true,
        );
        assert_eq!(config.source, "words.txt");
        assert_eq!(config.port, 1234);
        assert_eq!(config.database, PathBuf::from(DEFAULT_DATABASE));
        assert!(!config.open_browser);
    }

    #[test]
    fn test_load_explicit_path() -> Fallible<()> {
        let path = create_tmp_document("wordwall.toml", "open_browser = false\n")?;
        let config = Config::load(Some(&path))?;
        assert!(!config.open_browser);
        Ok(())
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = Config::load(Some(Path::new("./derpherp.toml")));
        assert_eq!(
            result.err().unwrap().to_string(),
            "error: configuration file does not exist."
        );
    }
}
