//! Layered parsing of free-text model replies.
//!
//! Precedence:
//! 1. tagged layer: a `<thought>` (or `<thoughts>`) block plus a `<score>`
//!    block; a score like `4/5` takes the numerator. Succeeds only when both
//!    a thought and a numeric score are present.
//! 2. fallback layer: the first `<number>/5` pattern anywhere in the text is
//!    the score, and the explanation is the full text with every such
//!    fraction removed.
//!
//! Every layer is a total function returning options; nothing here errors.
//! When no score is extractable the result carries `score: None` — the caller
//! surfaces the absent score rather than defaulting it to zero.

use std::sync::LazyLock;

use regex::Regex;

static FRACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)/5").expect("fraction pattern is valid"));

/// Score and rationale recovered from a raw model reply.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReply {
    pub score: Option<f64>,
    pub thought: Option<String>,
}

/// Parses a raw reply using the layered precedence above.
pub fn parse_reply(raw: &str) -> ParsedReply {
    if let Some(parsed) = parse_tagged(raw) {
        return parsed;
    }

    parse_fraction_fallback(raw)
}

/// Tagged layer: requires both a thought block and a numeric score.
fn parse_tagged(raw: &str) -> Option<ParsedReply> {
    let thought = tagged_thought(raw)?;
    let score = tagged_score(raw)?;

    Some(ParsedReply {
        score: Some(score),
        thought: Some(thought.trim().to_string()),
    })
}

/// Fallback layer: `<number>/5` anywhere in the text.
fn parse_fraction_fallback(raw: &str) -> ParsedReply {
    let score = FRACTION_RE
        .captures(raw)
        .and_then(|caps| caps[1].parse::<f64>().ok());

    let thought = FRACTION_RE.replace_all(raw, "").trim().to_string();
    let thought = if thought.is_empty() { None } else { Some(thought) };

    ParsedReply { score, thought }
}

fn tagged_thought(raw: &str) -> Option<&str> {
    tag_content(raw, "thought").or_else(|| tag_content(raw, "thoughts"))
}

fn tagged_score(raw: &str) -> Option<f64> {
    let content = tag_content(raw, "score")?.trim();

    // "4/5" style content scores as the numerator.
    let numeric = content.split('/').next().unwrap_or(content).trim();
    numeric.parse().ok()
}

/// Extracts the content of the first `<tag>...</tag>` pair (case-sensitive).
fn tag_content<'a>(raw: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");

    let start = raw.find(&open)? + open.len();
    let end = raw[start..].find(&close)? + start;

    Some(&raw[start..end])
}
