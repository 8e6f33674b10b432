//! JSON recovery for model output that ignores the "JSON only" instruction.
//!
//! Candidates are tried in order and the first one that parses wins:
//! 1. the whole text, verbatim
//! 2. the trimmed body of the first ``` fence (optionally tagged `json`)
//! 3. the slice from the first `{` to the last `}`
//!
//! Only syntax is checked here. Whether the JSON is a resume is `validation`'s job.

use serde_json::Value;

const FENCE: &str = "```";

fn parses(candidate: &str) -> bool {
    serde_json::from_str::<Value>(candidate).is_ok()
}

/// Body of the first fenced block, with an optional case-insensitive `json` tag removed.
fn fenced_body(text: &str) -> Option<&str> {
    let open = text.find(FENCE)?;
    let mut rest = &text[open + FENCE.len()..];
    if rest.get(..4).is_some_and(|tag| tag.eq_ignore_ascii_case("json")) {
        rest = &rest[4..];
    }
    let close = rest.find(FENCE)?;
    Some(&rest[..close])
}

fn brace_slice(text: &str) -> Option<&str> {
    let first = text.find('{')?;
    let last = text.rfind('}')?;
    (last > first).then(|| &text[first..=last])
}

/// Returns the first syntactically valid JSON candidate found in `text`, or `None`.
pub fn extract_json_from_text(text: &str) -> Option<&str> {
    if text.is_empty() {
        return None;
    }

    if parses(text) {
        return Some(text);
    }

    if let Some(body) = fenced_body(text).map(str::trim) {
        if !body.is_empty() && parses(body) {
            return Some(body);
        }
    }

    brace_slice(text).filter(|candidate| parses(candidate))
}
