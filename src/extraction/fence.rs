// ABOUTME: Markdown code fence helpers shared by JSON extraction and grocery output cleanup
// ABOUTME: Finds fenced blocks by language tag and strips a wrapping fence from model text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use regex::Regex;
use std::sync::LazyLock;

/// Opening fence, optional language tag, lazily matched body, closing fence
static FENCED_BLOCK: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?s)```[ \t]*([A-Za-z0-9_+.-]*)[^\S\n]*\r?\n?(.*?)```").ok()
});

const FENCE: &str = "```";

/// Inner content of the first fenced block tagged `language`
///
/// The tag comparison ignores ASCII case, so `JSON` matches `json`. Blocks
/// with a different (or no) tag are skipped.
#[must_use]
pub fn fenced_block<'a>(text: &'a str, language: &str) -> Option<&'a str> {
    let pattern = FENCED_BLOCK.as_ref()?;
    pattern
        .captures_iter(text)
        .find(|caps| {
            caps.get(1)
                .is_some_and(|tag| tag.as_str().eq_ignore_ascii_case(language))
        })
        .and_then(|caps| caps.get(2))
        .map(|body| body.as_str().trim())
}

/// Remove an optional leading fence line and an optional trailing fence
///
/// Text without fences is returned trimmed.
#[must_use]
pub fn strip_fence(text: &str) -> &str {
    let mut body = text.trim();
    if body.starts_with(FENCE) {
        body = body.find('\n').map_or("", |newline| &body[newline + 1..]);
    }
    let body = body.trim_end();
    body.strip_suffix(FENCE).unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_block_ignores_surrounding_prose() {
        let text = "Sure! Here it is:\n```json\n{\"a\": 1}\n```\nEnjoy.";
        assert_eq!(fenced_block(text, "json"), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_fenced_block_tag_is_case_insensitive() {
        let text = "```JSON\n{\"a\": 1}\n```";
        assert_eq!(fenced_block(text, "json"), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_fenced_block_skips_other_languages() {
        let text = "```python\nprint(1)\n```\nthen\n```json\n{\"b\": 2}\n```";
        assert_eq!(fenced_block(text, "json"), Some("{\"b\": 2}"));
        assert_eq!(fenced_block(text, "python"), Some("print(1)"));
        assert_eq!(fenced_block(text, "yaml"), None);
    }

    #[test]
    fn test_fenced_block_on_one_line() {
        assert_eq!(fenced_block("```json {\"c\": 3}```", "json"), Some("{\"c\": 3}"));
    }

    #[test]
    fn test_strip_fence() {
        assert_eq!(strip_fence("```markdown\n### Produce\n- Apples\n```"), "### Produce\n- Apples");
        assert_eq!(strip_fence("  ### Dairy\n- Milk  "), "### Dairy\n- Milk");
        assert_eq!(strip_fence("```\n- Eggs\n```\n"), "- Eggs");
        assert_eq!(strip_fence("- Rice\n```"), "- Rice");
        assert_eq!(strip_fence("```markdown"), "");
    }
}
