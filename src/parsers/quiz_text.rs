use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

lazy_static! {
    /// Primary strategy: an option marker must start its own line
    /// (optionally after leading whitespace).
    static ref LINE_ANCHORED_MARKER: Regex =
        Regex::new(r"(?mi)^[ \t]*([A-D])\)").expect("line-anchored marker regex is valid");

    /// Fallback strategy: markers may appear anywhere. Recovers inline
    /// option lists like "... A) foo B) bar" at the cost of looser
    /// boundaries.
    static ref INLINE_MARKER: Regex =
        Regex::new(r"(?i)([A-D])\)").expect("inline marker regex is valid");
}

/// One multiple-choice option extracted from a question's raw text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedOption {
    /// Option letter, normalized to uppercase ('A'..'D')
    pub letter: char,
    pub text: String,
}

/// Byte span and letter of one recognized marker
struct Marker {
    start: usize,
    end: usize,
    letter: char,
}

fn find_markers(text: &str, pattern: &Regex) -> Vec<Marker> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| {
            let full = caps.get(0)?;
            let letter = caps.get(1)?.as_str().chars().next()?;
            Some(Marker {
                start: full.start(),
                end: full.end(),
                letter: letter.to_ascii_uppercase(),
            })
        })
        .collect()
}

/// Parses options (A, B, C, D) from a question's `text_content`.
///
/// Each marker introduces the text run up to the next marker or the end of
/// input; embedded newlines within an option are retained, edges are trimmed.
/// Returns an empty vector for blank input or when no markers are found.
pub fn parse_options(text: &str) -> Vec<ParsedOption> {
    if text.trim().is_empty() {
        warn!("parse_options received blank text, returning no options");
        return Vec::new();
    }

    let mut markers = find_markers(text, &LINE_ANCHORED_MARKER);
    if markers.is_empty() {
        markers = find_markers(text, &INLINE_MARKER);
    }

    if markers.is_empty() {
        let snippet: String = text.chars().take(100).collect();
        warn!(snippet = %snippet, "parse_options found no option markers");
        return Vec::new();
    }

    let mut options = Vec::with_capacity(markers.len());
    for (i, marker) in markers.iter().enumerate() {
        let span_end = markers
            .get(i + 1)
            .map(|next| next.start)
            .unwrap_or(text.len());
        let option_text = text[marker.end..span_end].trim();
        options.push(ParsedOption {
            letter: marker.letter,
            text: option_text.to_string(),
        });
    }

    options
}

/// Cleans the question text by removing the recognized option spans,
/// leaving only the trimmed question stem.
///
/// Mirrors the two-tier strategy of [`parse_options`]: the line-anchored
/// pattern is tried first, and the inline pattern only when the text still
/// contains a marker the primary pass did not recognize.
pub fn clean_question_text(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    // Option spans run from their marker to the next marker or end of input,
    // so removing them leaves the prefix before the first marker.
    if let Some(m) = LINE_ANCHORED_MARKER.find(text) {
        return text[..m.start()].trim().to_string();
    }

    if let Some(m) = INLINE_MARKER.find(text) {
        return text[..m.start()].trim().to_string();
    }

    text.trim().to_string()
}
