use std::sync::LazyLock;

use regex::Regex;

static ENUMERATION_PREFIX: LazyLock<Regex> = LazyLock::new(|| re(r"^\d+\.\s*"));
static PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| re(r"\s*\([^)]*\)"));
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| re(r"\s+"));
static DOT_RUN: LazyLock<Regex> = LazyLock::new(|| re(r"\.+"));
static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| re(r"[.!?]\s+"));

fn re(pattern: &str) -> Regex {
    // Patterns are literals in this file; a failure here is a programming error caught by tests.
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid caption regex {pattern:?}: {e}"))
}

/// Two-part caption derived from an approved ad phrase.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedCaption {
    /// Headline text. Always present for a usable phrase.
    pub primary_text: String,
    /// Follow-up text; empty when the phrase has fewer than two sentences.
    pub secondary_text: String,
}

impl ProcessedCaption {
    /// `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.primary_text.is_empty() && self.secondary_text.is_empty()
    }

    /// `true` when a secondary caption should be laid out.
    pub fn has_secondary(&self) -> bool {
        !self.secondary_text.is_empty()
    }
}

/// Normalize a raw phrase and split it into primary and secondary captions.
///
/// Total over its input: a missing phrase yields empty captions and a warning, never an error.
pub fn process(raw: Option<&str>) -> ProcessedCaption {
    let Some(raw) = raw else {
        tracing::warn!("no ad phrase supplied; rendering with empty captions");
        return ProcessedCaption::default();
    };

    let cleaned = normalize(raw);
    let sentences = split_sentences(&cleaned);
    if sentences.len() < 2 {
        return ProcessedCaption {
            primary_text: cleaned,
            secondary_text: String::new(),
        };
    }

    let head = sentences.len().div_ceil(2);
    ProcessedCaption {
        primary_text: sentences[..head].join(" "),
        secondary_text: sentences[head..].join(" "),
    }
}

/// Strip enumeration, emphasis markers and asides, then collapse whitespace and punctuation.
pub(crate) fn normalize(raw: &str) -> String {
    let s = ENUMERATION_PREFIX.replace(raw, "");
    let s = s.replace('*', "");
    let s = PARENTHETICAL.replace_all(&s, "");
    let s = WHITESPACE_RUN.replace_all(&s, " ");
    let s = DOT_RUN.replace_all(&s, ".");
    let s = s
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");
    let s = s.trim();

    // "Label: body" keeps only the body (the segment between the first and second colon).
    if let Some(body) = s.split(':').nth(1).map(str::trim)
        && !body.is_empty()
    {
        return body.to_owned();
    }
    s.to_owned()
}

/// Split at whitespace runs that follow a sentence terminator; the terminator stays attached.
pub(crate) fn split_sentences(s: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut start = 0usize;
    for m in SENTENCE_BREAK.find_iter(s) {
        // Terminators are single-byte ASCII, so `m.start() + 1` is a char boundary.
        let end = m.start() + 1;
        push_fragment(&mut out, &s[start..end]);
        start = m.end();
    }
    push_fragment(&mut out, &s[start..]);
    out
}

fn push_fragment(out: &mut Vec<String>, fragment: &str) {
    let fragment = fragment.trim();
    if !fragment.is_empty() {
        out.push(fragment.to_owned());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/caption.rs"]
mod tests;
