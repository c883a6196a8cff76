//! Full justification of plain text to a fixed character width.
//!
//! Every line except the last line of a paragraph is padded to exactly `width` characters by
//! widening the gaps between words. Extra spaces go to the leftmost gaps first, so gap widths on
//! a line differ by at most one. Single-word lines and paragraph-final lines stay left-aligned
//! with single spaces. Words longer than `width` are emitted whole.

use crate::layout::wrap::{normalize_line_endings, pack_lines, split_paragraphs, PackedLine};

/// Reflows `text` into fully-justified lines of `width` characters.
///
/// Total over all inputs: empty input gives empty output, and paragraph boundaries (including
/// empty paragraphs) survive in order. The output never contains carriage returns.
pub fn justify(text: &str, width: usize) -> String {
    let normalized = normalize_line_endings(text);

    split_paragraphs(&normalized)
        .into_iter()
        .map(|body| justify_paragraph(body.trim(), width))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn justify_paragraph(paragraph: &str, width: usize) -> String {
    let lines = pack_lines(paragraph, width);
    let last = lines.len().saturating_sub(1);

    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == last || line.words.len() == 1 {
                line.words.join(" ")
            } else {
                justify_line(line, width)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pads a multi-word line to `width` by distributing spaces across its gaps, front-loaded.
fn justify_line(line: &PackedLine<'_>, width: usize) -> String {
    let gaps = line.words.len() - 1;
    let spaces = width.saturating_sub(line.letters);
    let base = spaces / gaps;
    let remainder = spaces % gaps;

    let mut out = String::with_capacity(width);
    for (i, word) in line.words.iter().enumerate() {
        out.push_str(word);
        if i < gaps {
            let pad = base + usize::from(i < remainder);
            out.extend(std::iter::repeat(' ').take(pad));
        }
    }
    out
}
