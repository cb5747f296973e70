//! Line scanner and bracket-aware splitting helpers.

/// One significant source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number in the original text.
    pub number: usize,
    /// Trimmed line content.
    pub text: &'a str,
}

/// Splits DSL text into trimmed significant lines.
///
/// Blank lines and lines starting with `//` are dropped; everything else is
/// kept in order with its original line number.
#[must_use]
pub fn scan(source: &str) -> Vec<SourceLine<'_>> {
    source
        .lines()
        .enumerate()
        .map(|(idx, line)| SourceLine {
            number: idx + 1,
            text: line.trim(),
        })
        .filter(|line| !line.text.is_empty() && !line.text.starts_with("//"))
        .collect()
}

const fn opens(c: char) -> bool {
    matches!(c, '<' | '{' | '(' | '[')
}

const fn closes(c: char) -> bool {
    matches!(c, '>' | '}' | ')' | ']')
}

/// Splits `text` on `separator` wherever it is not nested inside `<>`, `{}`,
/// `()` or `[]`. Pieces are trimmed; empty pieces are kept so callers can
/// decide what an empty slot means.
#[must_use]
pub fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: usize = 0;
    let mut start = 0;

    for (idx, c) in text.char_indices() {
        if opens(c) {
            depth += 1;
        } else if closes(c) {
            depth = depth.saturating_sub(1);
        } else if c == separator && depth == 0 {
            parts.push(text[start..idx].trim());
            start = idx + c.len_utf8();
        }
    }
    parts.push(text[start..].trim());
    parts
}

/// Byte index of the first `needle` outside any bracket pair.
#[must_use]
pub fn find_top_level(text: &str, needle: char) -> Option<usize> {
    let mut depth: usize = 0;
    for (idx, c) in text.char_indices() {
        if c == needle && depth == 0 {
            return Some(idx);
        }
        if opens(c) {
            depth += 1;
        } else if closes(c) {
            depth = depth.saturating_sub(1);
        }
    }
    None
}

/// Byte index of the bracket closing the one opened at `open`.
///
/// Nesting of all bracket kinds is counted together, which is enough for the
/// DSL since it never mixes them unbalanced.
#[must_use]
pub fn matching_close(text: &str, open: usize) -> Option<usize> {
    let mut depth: usize = 0;
    for (idx, c) in text[open..].char_indices() {
        if opens(c) {
            depth += 1;
        } else if closes(c) {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(open + idx);
            }
        }
    }
    None
}
