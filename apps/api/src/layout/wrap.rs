//! Paragraph splitting and greedy line packing.
//!
//! # Rules
//! - Paragraphs are separated by a line-feed, optional whitespace, and a line-feed.
//! - Words are maximal runs of non-whitespace characters.
//! - Widths are measured in `char`s, not bytes.

use std::borrow::Cow;

// ────────────────────────────────────────────────────────────────────────────
// Normalization
// ────────────────────────────────────────────────────────────────────────────

/// Rewrites CRLF and lone CR line endings as LF. Borrows when there is nothing to rewrite.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Number of words in `text`, using the same whitespace-run rule as line packing.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

// ────────────────────────────────────────────────────────────────────────────
// Paragraphs
// ────────────────────────────────────────────────────────────────────────────

/// Splits LF-normalized text into untrimmed paragraph bodies.
///
/// Within a whitespace run that holds two or more line-feeds, the separator runs from the
/// first line-feed to the last one. Leading or trailing separators produce empty bodies,
/// and the empty string yields a single empty body.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    let mut paragraphs = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '\n' {
            continue;
        }

        let mut last_newline = i;
        while let Some(&(j, next)) = chars.peek() {
            if !next.is_whitespace() {
                break;
            }
            if next == '\n' {
                last_newline = j;
            }
            chars.next();
        }

        if last_newline > i {
            paragraphs.push(&text[start..i]);
            start = last_newline + 1;
        }
    }

    paragraphs.push(&text[start..]);
    paragraphs
}

// ────────────────────────────────────────────────────────────────────────────
// Greedy packing
// ────────────────────────────────────────────────────────────────────────────

/// Words assigned to one output row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedLine<'a> {
    pub words: Vec<&'a str>,
    /// Sum of word lengths, in chars. Excludes separating spaces.
    pub letters: usize,
}

impl<'a> PackedLine<'a> {
    fn start(word: &'a str, len: usize) -> Self {
        Self {
            words: vec![word],
            letters: len,
        }
    }

    /// Length with single spaces between words.
    pub fn natural_len(&self) -> usize {
        self.letters + self.words.len().saturating_sub(1)
    }
}

/// Greedy word-wrap: each word goes on the current line if it still fits within `width`
/// with one separating space, otherwise it opens a new line.
///
/// The first word of a line is always placed, so a word longer than `width` gets a line
/// of its own rather than being split. Returns no lines for text with no words.
pub fn pack_lines(text: &str, width: usize) -> Vec<PackedLine<'_>> {
    let mut lines: Vec<PackedLine<'_>> = Vec::new();
    let mut current: Option<PackedLine<'_>> = None;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if let Some(line) = current.as_mut() {
            if line.natural_len() + 1 + word_len <= width {
                line.words.push(word);
                line.letters += word_len;
                continue;
            }
        }

        // Close the full line (if any) and open the next one with this word.
        lines.extend(current.replace(PackedLine::start(word, word_len)));
    }

    lines.extend(current);
    lines
}
