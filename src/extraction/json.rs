// ABOUTME: Locates and parses a JSON object embedded in free-form model output
// ABOUTME: Fenced json blocks first, then a strict whole-text or lenient brace-balanced fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::fence::fenced_block;
use super::{ExtractionError, ExtractionMode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Longest candidate excerpt carried in an error
const SNIPPET_CHARS: usize = 200;

/// Extract the first JSON object from model output
///
/// # Errors
///
/// [`ExtractionError::NotFound`] when no candidate object exists,
/// [`ExtractionError::InvalidJson`] when the candidate does not parse.
pub fn extract_json(text: &str, mode: ExtractionMode) -> Result<Value, ExtractionError> {
    let candidate = locate_candidate(text, mode).ok_or(ExtractionError::NotFound)?;
    debug!(
        mode = ?mode,
        candidate_len = candidate.len(),
        "Located JSON candidate in model output"
    );
    serde_json::from_str(candidate).map_err(|source| ExtractionError::InvalidJson {
        snippet: snippet(candidate),
        source,
    })
}

/// Extract a JSON object and deserialize it into `T`
///
/// # Errors
///
/// Same as [`extract_json`], plus [`ExtractionError::Mismatch`] when the
/// object does not have the shape of `T`.
pub fn extract_json_as<T: DeserializeOwned>(
    text: &str,
    mode: ExtractionMode,
) -> Result<T, ExtractionError> {
    let value = extract_json(text, mode)?;
    serde_json::from_value(value).map_err(|source| ExtractionError::Mismatch {
        target: short_type_name::<T>(),
        source,
    })
}

fn locate_candidate(text: &str, mode: ExtractionMode) -> Option<&str> {
    if let Some(block) = fenced_block(text, "json").filter(|block| block.starts_with('{')) {
        return Some(block);
    }

    let trimmed = text.trim();
    match mode {
        ExtractionMode::Strict => {
            (trimmed.starts_with('{') && trimmed.ends_with('}')).then_some(trimmed)
        }
        ExtractionMode::Lenient => balanced_object(trimmed),
    }
}

/// First top-level `{...}` span, honouring string literals and escapes
///
/// When the braces never balance the span from the first `{` to the last
/// `}` is returned, so a truncated object still yields a parse error rather
/// than "not found".
fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn snippet(candidate: &str) -> String {
    candidate.chars().take(SNIPPET_CHARS).collect()
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}
