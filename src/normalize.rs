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

//! Reduces RTF documents to plain text lines.
//!
//! Only the handful of constructs that word processors emit around plain
//! paragraphs are understood. Everything else that looks like markup is
//! dropped. Text without any markup passes through unchanged, apart from
//! line endings.

/// Header groups whose content is never document text.
const SKIPPED_DESTINATIONS: [&str; 7] = [
    "fonttbl",
    "colortbl",
    "expandedcolortbl",
    "stylesheet",
    "info",
    "pict",
    "listtable",
];

/// What a control sequence contributes to the output.
enum Control {
    /// Nothing: formatting, or a sequence we don't understand.
    Drop,
    /// A single character.
    Char(char),
    /// A Unicode escape, which is followed by a fallback character that must
    /// be skipped.
    Unicode(char),
}

pub fn rtf_to_text(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut depth: usize = 0;
    // The depth of the group being skipped, if any.
    let mut skipping: Option<usize> = None;
    let mut index = 0;
    while index < chars.len() {
        let c = chars[index];
        match c {
            '{' => {
                depth += 1;
                index += 1;
                if skipping.is_none() && starts_destination(&chars[index..]) {
                    skipping = Some(depth);
                }
            }
            '}' => {
                if skipping == Some(depth) {
                    skipping = None;
                }
                depth = depth.saturating_sub(1);
                index += 1;
            }
            '\\' => {
                let (control, len) = read_control(&chars[index..]);
                index += len;
                if skipping.is_some() {
                    continue;
                }
                match control {
                    Control::Drop => {}
                    Control::Char(c) => out.push(c),
                    Control::Unicode(c) => {
                        out.push(c);
                        index += fallback_len(&chars[index..]);
                    }
                }
            }
            '\r' => {
                index += 1;
                if chars.get(index) == Some(&'\n') {
                    index += 1;
                }
                if skipping.is_none() {
                    out.push('\n');
                }
            }
            _ => {
                index += 1;
                if skipping.is_none() {
                    out.push(c);
                }
            }
        }
    }
    out
}

/// Is the group that starts here an ignorable destination? `rest` begins
/// right after the opening brace.
fn starts_destination(rest: &[char]) -> bool {
    if rest.first() != Some(&'\\') {
        return false;
    }
    if rest.get(1) == Some(&'*') {
        return true;
    }
    let word: String = rest[1..]
        .iter()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    SKIPPED_DESTINATIONS.contains(&word.as_str())
}

/// Reads the control sequence starting at the backslash in `seq[0]`. Returns
/// what it contributes and how many characters it spans.
fn read_control(seq: &[char]) -> (Control, usize) {
    let Some(&next) = seq.get(1) else {
        return (Control::Drop, 1);
    };
    match next {
        '\\' | '{' | '}' => (Control::Char(next), 2),
        '\n' => (Control::Char('\n'), 2),
        '\r' => {
            let len = if seq.get(2) == Some(&'\n') { 3 } else { 2 };
            (Control::Char('\n'), len)
        }
        '~' => (Control::Char(' '), 2),
        '\'' => match hex_byte(&seq[2..]) {
            Some(byte) => (decode_byte(byte).map_or(Control::Drop, Control::Char), 4),
            None => (Control::Drop, 2),
        },
        c if c.is_ascii_alphabetic() => read_control_word(seq),
        _ => (Control::Drop, 2),
    }
}

fn read_control_word(seq: &[char]) -> (Control, usize) {
    let mut len = 1;
    let word_start = len;
    while seq.get(len).is_some_and(|c| c.is_ascii_alphabetic()) {
        len += 1;
    }
    let word: String = seq[word_start..len].iter().collect();
    let param_start = len;
    if seq.get(len) == Some(&'-') {
        len += 1;
    }
    while seq.get(len).is_some_and(|c| c.is_ascii_digit()) {
        len += 1;
    }
    let param: Option<i32> = seq[param_start..len]
        .iter()
        .collect::<String>()
        .parse()
        .ok();
    // A single space delimits the control word and is not part of the text.
    if seq.get(len) == Some(&' ') {
        len += 1;
    }
    let control = match word.as_str() {
        "par" | "pard" | "line" => Control::Char('\n'),
        "tab" => Control::Char('\t'),
        "u" => match param.and_then(unicode_char) {
            Some(c) => Control::Unicode(c),
            None => Control::Drop,
        },
        _ => Control::Drop,
    };
    (control, len)
}

/// RTF writes code points above 32767 as negative numbers.
fn unicode_char(param: i32) -> Option<char> {
    let code = if param < 0 { param + 65536 } else { param };
    u32::try_from(code).ok().and_then(char::from_u32)
}

/// Length of the fallback representation that follows a `\u` escape: either
/// a hex escape or one plain character.
fn fallback_len(rest: &[char]) -> usize {
    match rest.first().copied() {
        None | Some('{') | Some('}') => 0,
        Some('\\') => {
            if rest.get(1) == Some(&'\'') && hex_byte(&rest[2..]).is_some() {
                4
            } else {
                0
            }
        }
        Some(_) => 1,
    }
}

fn hex_byte(rest: &[char]) -> Option<u8> {
    let hi = rest.first()?.to_digit(16)?;
    let lo = rest.get(1)?.to_digit(16)?;
    u8::try_from(hi * 16 + lo).ok()
}

/// Decodes a byte of the Windows-1252 code page.
fn decode_byte(byte: u8) -> Option<char> {
    match byte {
        0x80 => Some('€'),
        0x91 => Some('‘'),
        0x92 => Some('’'),
        0x93 => Some('“'),
        0x94 => Some('”'),
        0x96 => Some('–'),
        0x97 => Some('—'),
        0x20..=0x7e | 0xa0..=0xff => Some(char::from(byte)),
        _ => None,
    }
}
