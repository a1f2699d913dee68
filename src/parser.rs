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

use std::sync::LazyLock;

use regex::Regex;

use crate::types::theme::MISC_THEME;
use crate::types::theme::Theme;
use crate::types::theme::VocabularyItem;

static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\*\s?").unwrap());

static EXAMPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^satz(?:\s*[:：]\s*|\s+)(.+)$").unwrap());

static EXAMPLE_TRANSLATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^translation(?:\s*[:：]\s*|\s+)(.+)$").unwrap());

static VOCABULARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+\.\s*)?(.+?)\s*-\s*(.+)$").unwrap());

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s*(.+)$").unwrap());

/// The shape of a single line of a vocabulary document.
#[derive(Debug, PartialEq)]
pub enum Line<'a> {
    /// `Satz: <sentence>`, an example for the preceding item.
    Example(&'a str),
    /// `Translation: <sentence>`, the translation of the preceding example.
    ExampleTranslation(&'a str),
    /// `[N.] <german> - <english>`.
    Vocabulary { german: &'a str, english: &'a str },
    /// `N. <title>`.
    Heading(&'a str),
    /// Anything else.
    Ignored,
}

/// Classifies a trimmed, non-empty line. The rules are tried in order and the
/// first match wins. In particular, a numbered line that contains a dash pair
/// is vocabulary, not a heading.
pub fn classify_line(line: &str) -> Line<'_> {
    let line = BULLET.find(line).map_or(line, |m| &line[m.end()..]).trim();
    if let Some(caps) = EXAMPLE.captures(line) {
        return Line::Example(capture(&caps, 1));
    }
    if let Some(caps) = EXAMPLE_TRANSLATION.captures(line) {
        return Line::ExampleTranslation(capture(&caps, 1));
    }
    if let Some(caps) = VOCABULARY.captures(line) {
        let german = capture(&caps, 1);
        let english = capture(&caps, 2);
        // The lazy German group can end up holding only the whitespace after
        // a number, as in `1.  - dog`.
        if !german.is_empty() && !english.is_empty() {
            return Line::Vocabulary { german, english };
        }
    }
    if let Some(caps) = HEADING.captures(line) {
        return Line::Heading(capture(&caps, 1));
    }
    Line::Ignored
}

fn capture<'a>(caps: &regex::Captures<'a>, group: usize) -> &'a str {
    caps.get(group).map_or("", |m| m.as_str().trim())
}

/// Parses a plain text vocabulary document into themes.
///
/// Malformed lines are skipped, so this never fails: input with no
/// recognizable lines produces an empty list.
pub fn parse_themes(text: &str) -> Vec<Theme> {
    let mut themes: Vec<Theme> = Vec::new();
    // Whether the last item of the last theme can receive continuation lines.
    // Items are only ever appended to the newest theme, so that item is always
    // the most recently created one.
    let mut has_last_item = false;

    let lines = text
        .split(['\r', '\n'])
        .map(|line| line.trim())
        .filter(|line| !line.is_empty());

    for line in lines {
        match classify_line(line) {
            Line::Example(sentence) => match last_item(&mut themes, has_last_item) {
                Some(item) => item.example = sentence.to_string(),
                None => log::trace!("Dropping example without an item: {line}"),
            },
            Line::ExampleTranslation(sentence) => match last_item(&mut themes, has_last_item) {
                Some(item) => item.example_translation = sentence.to_string(),
                None => log::trace!("Dropping translation without an item: {line}"),
            },
            Line::Vocabulary { german, english } => {
                if themes.is_empty() {
                    themes.push(Theme::new(MISC_THEME));
                }
                if let Some(theme) = themes.last_mut() {
                    theme.items.push(VocabularyItem::new(german, english));
                    has_last_item = true;
                }
            }
            Line::Heading(title) => {
                themes.push(Theme::new(title));
                has_last_item = false;
            }
            Line::Ignored => {
                log::trace!("Ignoring line: {line}");
            }
        }
    }

    let item_count: usize = themes.iter().map(|theme| theme.items.len()).sum();
    log::debug!("Parsed {} themes with {item_count} items.", themes.len());
    themes
}

fn last_item(themes: &mut [Theme], has_last_item: bool) -> Option<&mut VocabularyItem> {
    if !has_last_item {
        return None;
    }
    themes.last_mut().and_then(|theme| theme.items.last_mut())
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::normalize::rtf_to_text;

    const GREETINGS: &str = "1. Greetings\n* Hallo - Hello\nSatz: Hallo, wie geht's?\nTranslation: Hello, how are you?\n* Tschüss - Bye";

    #[test]
    fn test_parse_greetings() {
        let themes = parse_themes(GREETINGS);
        assert_eq!(themes.len(), 1);
        let theme = &themes[0];
        assert_eq!(theme.title, "Greetings");
        assert_eq!(theme.items.len(), 2);

        let hallo = &theme.items[0];
        assert_eq!(hallo.german, "Hallo");
        assert_eq!(hallo.english, "Hello");
        assert_eq!(hallo.example, "Hallo, wie geht's?");
        assert_eq!(hallo.example_translation, "Hello, how are you?");

        let tschuss = &theme.items[1];
        assert_eq!(tschuss.german, "Tschüss");
        assert_eq!(tschuss.english, "Bye");
        assert_eq!(tschuss.example, "");
        assert_eq!(tschuss.example_translation, "");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_themes("").is_empty());
        assert!(parse_themes("\n   \n\r\n  ").is_empty());
    }

    #[test]
    fn test_unparseable_input() {
        let themes = parse_themes("Just some prose.\nNothing to see here.");
        assert!(themes.is_empty());
    }

    #[test]
    fn test_vocabulary_before_heading_goes_to_misc() {
        let themes = parse_themes("Apfel - apple\n2. Food\nBrot - bread");
        assert_eq!(themes.len(), 2);
        assert_eq!(themes[0].title, "Misc");
        assert_eq!(themes[0].items[0].german, "Apfel");
        assert_eq!(themes[1].title, "Food");
        assert_eq!(themes[1].items[0].english, "bread");
    }

    #[test]
    fn test_numbered_vocabulary_is_not_a_heading() {
        let themes = parse_themes("3. Obst\n1. Apfel - apple\n2. Birne - pear");
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].title, "Obst");
        assert_eq!(themes[0].items.len(), 2);
        assert_eq!(themes[0].items[0].german, "Apfel");
        assert_eq!(themes[0].items[1].german, "Birne");
    }

    #[test]
    fn test_continuation_before_any_item_is_dropped() {
        let themes = parse_themes("Satz: Ein Satz.\nTranslation: A sentence.\nHund - dog");
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].items[0].example, "");
        assert_eq!(themes[0].items[0].example_translation, "");
    }

    #[test]
    fn test_heading_detaches_continuations() {
        let themes = parse_themes("Hund - dog\n1. Animals\nSatz: Der Hund bellt.");
        assert_eq!(themes.len(), 2);
        assert_eq!(themes[0].items[0].example, "");
        assert!(themes[1].items.is_empty());
    }

    #[test]
    fn test_repeated_continuation_overwrites() {
        let themes = parse_themes("Hund - dog\nSatz: Erster.\nSatz: Zweiter.");
        assert_eq!(themes[0].items[0].example, "Zweiter.");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let themes = parse_themes("Hund - dog\nHund - dog");
        assert_eq!(themes[0].items.len(), 2);
    }

    #[test]
    fn test_classify_example() {
        assert_eq!(classify_line("Satz: Guten Tag!"), Line::Example("Guten Tag!"));
        assert_eq!(classify_line("satz：Guten Tag!"), Line::Example("Guten Tag!"));
        assert_eq!(classify_line("* SATZ Guten Tag!"), Line::Example("Guten Tag!"));
    }

    #[test]
    fn test_classify_example_translation() {
        assert_eq!(
            classify_line("Translation: Good day!"),
            Line::ExampleTranslation("Good day!")
        );
        assert_eq!(
            classify_line("translation : Good day!"),
            Line::ExampleTranslation("Good day!")
        );
    }

    #[test]
    fn test_classify_vocabulary() {
        assert_eq!(
            classify_line("* Hallo - Hello"),
            Line::Vocabulary {
                german: "Hallo",
                english: "Hello"
            }
        );
        assert_eq!(
            classify_line("12. der Bahnhof-station"),
            Line::Vocabulary {
                german: "der Bahnhof",
                english: "station"
            }
        );
    }

    #[test]
    fn test_words_starting_with_satz_are_vocabulary() {
        assert_eq!(
            classify_line("Satzzeichen - punctuation"),
            Line::Vocabulary {
                german: "Satzzeichen",
                english: "punctuation"
            }
        );
    }

    #[test]
    fn test_vocabulary_needs_both_words() {
        assert_eq!(classify_line("42.  - dog"), Line::Heading("- dog"));
        assert_eq!(parse_themes("42.  - dog")[0].items.len(), 0);
    }

    #[test]
    fn test_classify_heading() {
        assert_eq!(classify_line("1. Greetings"), Line::Heading("Greetings"));
        assert_eq!(classify_line("10.Travel"), Line::Heading("Travel"));
    }

    #[test]
    fn test_classify_ignored() {
        assert_eq!(classify_line("Greetings"), Line::Ignored);
        assert_eq!(classify_line("Satz:"), Line::Ignored);
        assert_eq!(classify_line("*"), Line::Ignored);
    }

    #[test]
    fn test_parsing_is_idempotent() {
        assert_eq!(parse_themes(GREETINGS), parse_themes(GREETINGS));
    }

    #[test]
    fn test_windows_line_endings() {
        let text = GREETINGS.replace('\n', "\r\n");
        assert_eq!(parse_themes(&text), parse_themes(GREETINGS));
    }

    /// Lines built to sit on the edges of the line rules.
    const AWKWARD_LINES: [&str; 24] = [
        "*",
        "* ",
        "**",
        "-",
        " - ",
        "--",
        "a -",
        "- b",
        "1.",
        "1. -",
        "1.-2",
        "99999999999999999999. x",
        "Satz:",
        "Satz",
        "Satz: ",
        "Translation:",
        "translation :",
        "* Satz: - -",
        "\\u",
        "\\'zz",
        "{\\*",
        "}}}}",
        "\\u-99999999999?",
        "ä - \u{3000}",
    ];

    /// Pieces of vocabulary documents and RTF markup, glued together at
    /// random.
    const FRAGMENTS: [&str; 26] = [
        "\\", "{", "}", "'", "*", "-", " - ", ".", ":", "1", "42. ", "Hund", "dog", "ä", "ß",
        "\u{3000}", " ", "\t", "\r", "\n", "Satz", "Translation", "\\par ", "\\u-", "\\'fc", "{\\*",
    ];

    fn random_document(rng: &mut StdRng) -> String {
        let len = rng.random_range(0..40);
        (0..len)
            .map(|_| FRAGMENTS[rng.random_range(0..FRAGMENTS.len())])
            .collect()
    }

    fn random_bytes(rng: &mut StdRng) -> String {
        let len = rng.random_range(0..64);
        let bytes: Vec<u8> = (0..len).map(|_| rng.random::<u8>()).collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Everything the parser produces has a non-empty word pair and title.
    fn assert_well_formed(themes: &[Theme]) {
        for theme in themes {
            assert!(!theme.title.is_empty());
            for item in &theme.items {
                assert!(!item.german.is_empty(), "{item:?}");
                assert!(!item.english.is_empty(), "{item:?}");
            }
        }
    }

    #[test]
    fn test_awkward_lines_never_fail() {
        for line in AWKWARD_LINES {
            let _ = classify_line(line);
            for text in [line.to_string(), format!("Hund - dog\n{line}\n{line}")] {
                let themes = parse_themes(&rtf_to_text(&text));
                assert_well_formed(&themes);
                assert_eq!(themes, parse_themes(&rtf_to_text(&text)));
            }
        }
    }

    #[test]
    fn test_random_documents_never_fail() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2000 {
            let text = if rng.random_bool(0.5) {
                random_document(&mut rng)
            } else {
                random_bytes(&mut rng)
            };
            let plain = rtf_to_text(&text);
            let themes = parse_themes(&plain);
            assert_well_formed(&themes);
            assert_eq!(themes, parse_themes(&plain), "{text:?}");
        }
    }
}
