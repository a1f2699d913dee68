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

use crate::collection::Collection;
use crate::config::Config;
use crate::error::Fallible;

pub async fn check_source(config: &Config) -> Fallible<()> {
    let coll = Collection::load(config.source()).await?;
    log::info!(
        "{} cards in {} themes.",
        coll.deck.len(),
        coll.themes.len()
    );
    println!("ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::check_source;
    use crate::config::Config;
    use crate::error::Fallible;
    use crate::helper::create_tmp_document;

    fn config(source: &str) -> Config {
        Config::default().with_overrides(Some(source.to_string()), None, None, false)
    }

    #[tokio::test]
    async fn test_non_existent_document() {
        assert!(check_source(&config("./derpherp.txt")).await.is_err());
    }

    #[tokio::test]
    async fn test_plain_text_document() {
        assert!(check_source(&config("./test/vocabulary.txt")).await.is_ok());
    }

    #[tokio::test]
    async fn test_rtf_document() {
        assert!(check_source(&config("./test/vocabulary.rtf")).await.is_ok());
    }

    #[tokio::test]
    async fn test_document_without_vocabulary() -> Fallible<()> {
        let path = create_tmp_document("empty.txt", "")?;
        let result = check_source(&config(path.to_str().unwrap())).await;
        assert_eq!(
            result.err().unwrap().to_string(),
            "error: no vocabulary found."
        );
        Ok(())
    }
}
