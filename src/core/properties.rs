//! Flat key/value property text parsing.
//!
//! Accepts the classic line-oriented properties format:
//!
//! ```text
//! # comment
//! ! also a comment
//! server.port = 8080
//! server.host: localhost
//! greeting   hello \
//!            world
//! path=C:\\data\\app
//! snowman=\u2603
//! ```
//!
//! Parsing never fails. Lines that carry no key are skipped, and snapshot
//! marker lines are plain comments.

use std::collections::BTreeMap;
use std::collections::btree_map;

/// Parsed key/value view of one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyTable {
    entries: BTreeMap<String, String>,
}

impl PropertyTable {
    /// Parse raw snapshot bytes.
    ///
    /// Bytes are decoded as UTF-8 when valid and as ISO-8859-1 otherwise.
    pub fn parse(bytes: &[u8]) -> Self {
        Self::parse_str(&decode_text(bytes))
    }

    /// Parse already-decoded text. Later duplicates of a key win.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cached_props::core::PropertyTable;
    ///
    /// let table = PropertyTable::parse_str("# BEGIN # now\na=1\nb : two\n# END #\n");
    /// assert_eq!(table.get("a"), Some("1"));
    /// assert_eq!(table.get("b"), Some("two"));
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn parse_str(text: &str) -> Self {
        let mut entries = BTreeMap::new();
        for line in logical_lines(text) {
            let (key, value) = split_entry(&line);
            entries.insert(unescape(key), unescape(value));
        }
        Self { entries }
    }

    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries were parsed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a PropertyTable {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn trim_blank(s: &str) -> &str {
    s.trim_start_matches(is_blank)
}

/// Odd count of trailing backslashes means the line continues.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Join continuations and drop blank and comment lines.
fn logical_lines(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    let mut physical = normalized.split(['\n', '\r']);
    let mut lines = Vec::new();

    while let Some(line) = physical.next() {
        let trimmed = trim_blank(line);
        if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
            continue;
        }

        let mut logical = trimmed.to_string();
        while continues(&logical) {
            logical.pop();
            match physical.next() {
                Some(next) => logical.push_str(trim_blank(next)),
                None => break,
            }
        }
        lines.push(logical);
    }

    lines
}

/// Split a logical line into raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    let mut separator = None;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                separator = Some(i + 1);
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let value = match separator {
        Some(after) => trim_blank(&line[after..]),
        None => {
            let rest = trim_blank(&line[key_end..]);
            match rest.strip_prefix(['=', ':']) {
                Some(value) => trim_blank(value),
                None => rest,
            }
        }
    };
    (key, value)
}

fn read_hex4(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(&digits, 16).ok()
}

/// Resolve `\t \n \r \f \uXXXX` and `\x -> x`.
///
/// A malformed `\u` escape is kept literally.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let before = chars.clone();
                match read_hex4(&mut chars) {
                    Some(unit) => push_unit(&mut out, &mut chars, unit),
                    None => {
                        chars = before;
                        out.push_str("\\u");
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}

/// Push one decoded UTF-16 unit, pairing a high surrogate with a following `\uDCxx`.
fn push_unit(out: &mut String, chars: &mut std::str::Chars<'_>, unit: u32) {
    if (0xD800..0xDC00).contains(&unit) {
        let mut lookahead = chars.clone();
        if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
            if let Some(low) = read_hex4(&mut lookahead).filter(|low| (0xDC00..0xE000).contains(low)) {
                let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                if let Some(c) = char::from_u32(combined) {
                    out.push(c);
                    *chars = lookahead;
                    return;
                }
            }
        }
    }
    out.push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER));
}
