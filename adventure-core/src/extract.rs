//! Recovering JSON from free-form model output.
//!
//! Text models are not guaranteed to emit bare JSON. They prepend commentary
//! ("Sure, here are four ideas:"), wrap the array in a markdown fence, or
//! trail off with a sign-off. Extraction runs in two tiers:
//!
//! 1. Every `[` is tried in order as the start of a balanced span. The span
//!    ends at the bracket that brings nesting depth back to zero, ignoring
//!    brackets inside JSON string literals. The first span that parses wins.
//! 2. If no span parses, the whole (trimmed) text is parsed.
//!
//! The decoded value is returned as-is. Shape checks belong to the caller.

use serde_json::Value;
use tracing::debug;
use crate::{CoreError, CoreResult};

/// Max characters of raw model output carried in an error message
const EXCERPT_CHARS: usize = 200;

/// Extract the first parseable JSON value from model output
pub fn extract_json(text: &str) -> CoreResult<Value> {
    for span in bracketed_spans(text) {
        match serde_json::from_str::<Value>(span) {
            Ok(value) => return Ok(value),
            Err(e) => debug!(error = %e, span_len = span.len(), "Bracketed span is not JSON, trying next"),
        }
    }

    serde_json::from_str::<Value>(text.trim()).map_err(|e| {
        CoreError::Extraction(format!("{} (raw: {})", e, excerpt(text)))
    })
}

/// Balanced `[...]` spans in order of their opening bracket
fn bracketed_spans(text: &str) -> impl Iterator<Item = &str> {
    text.match_indices('[').filter_map(move |(start, _)| {
        balanced_len(&text.as_bytes()[start..]).map(|len| &text[start..start + len])
    })
}

/// Length of the balanced span at the start of `bytes`, which must begin with
/// an opening bracket. All delimiters are ASCII, so the returned length always
/// lands on a char boundary.
fn balanced_len(bytes: &[u8]) -> Option<usize> {
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'[' | b'{' => depth += 1,
            b']' | b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}

fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_CHARS).collect()
}
