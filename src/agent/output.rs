//! Structured output of the content writer agent.

use crate::error::{Result, SkrivError};
use serde::{Deserialize, Serialize};

/// One generated piece of platform-targeted content.
///
/// `platform` is an open string; nothing in the pipeline constrains it to a
/// fixed set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub platform: String,
    pub content: String,
}

/// Envelope the agent is instructed to answer with.
#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    response: Vec<Post>,
}

/// Parse the agent's final text into the declared post list shape.
///
/// Accepts the `{"response": [...]}` envelope or a bare array, with an
/// optional markdown code fence around either. Anything else fails with
/// `OutputParse` - a malformed final answer fails the run rather than
/// rendering partially.
pub fn parse_posts(text: &str) -> Result<Vec<Post>> {
    let text = strip_code_fence(text.trim());

    if let Ok(envelope) = serde_json::from_str::<ResponseEnvelope>(text) {
        return Ok(envelope.response);
    }
    if let Ok(posts) = serde_json::from_str::<Vec<Post>>(text) {
        return Ok(posts);
    }

    Err(SkrivError::OutputParse(format!(
        "expected a JSON object with a \"response\" array of posts, got: {}",
        preview(text, 120)
    )))
}

/// Strip a surrounding markdown code fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Skip the optional language tag on the opening fence line
    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest,
    };
    rest.trim_end().trim_end_matches("```").trim()
}

fn preview(text: &str, max_len: usize) -> String {
    if text.len() <= max_len {
        text.to_string()
    } else {
        let cut = text
            .char_indices()
            .take_while(|(i, _)| *i < max_len)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &text[..cut])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_envelope() {
        let posts = parse_posts(
            r#"{"response": [
                {"platform": "LinkedIn", "content": "A post"},
                {"platform": "Instagram", "content": "A caption"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].platform, "LinkedIn");
        assert_eq!(posts[1].content, "A caption");
    }

    #[test]
    fn test_parse_bare_array() {
        let posts = parse_posts(r#"[{"platform": "LinkedIn", "content": "A post"}]"#).unwrap();
        assert_eq!(posts.len(), 1);
    }

    #[test]
    fn test_parse_preserves_order() {
        let posts = parse_posts(
            r#"{"response": [
                {"platform": "b", "content": "2"},
                {"platform": "a", "content": "1"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(posts[0].platform, "b");
        assert_eq!(posts[1].platform, "a");
    }

    #[test]
    fn test_parse_fenced_output() {
        let posts = parse_posts(
            "```json\n{\"response\": [{\"platform\": \"LinkedIn\", \"content\": \"A post\"}]}\n```",
        )
        .unwrap();
        assert_eq!(posts.len(), 1);
    }

    #[test]
    fn test_parse_invalid_output() {
        let err = parse_posts("Here are your posts!").unwrap_err();
        assert!(matches!(err, SkrivError::OutputParse(_)));
    }

    #[test]
    fn test_parse_wrong_shape() {
        let err = parse_posts(r#"{"response": [{"platform": "LinkedIn"}]}"#).unwrap_err();
        assert!(matches!(err, SkrivError::OutputParse(_)));
    }
}
