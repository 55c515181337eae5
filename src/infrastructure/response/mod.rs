use crate::domain::error::{AppError, Result};
use crate::infrastructure::agent_clients::StreamRecord;
use serde_json::Value as JsonValue;

const HEAD_PREVIEW_CHARS: usize = 200;

/// Joins the text chunks of an agent completion.
///
/// Chunk bytes are collected first and decoded lossily once, so a character
/// split across chunks survives and invalid UTF-8 becomes U+FFFD instead of
/// failing. The first error marker aborts the whole stream; records after it
/// are never read.
pub fn assemble_agent_text<I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = StreamRecord>,
{
    let mut bytes = Vec::new();
    for record in records {
        if let Some(chunk) = record.chunk.and_then(|chunk| chunk.bytes) {
            bytes.extend_from_slice(&chunk);
        }
        if let Some(error) = record.error {
            return Err(AppError::AgentStream(describe_stream_error(error)));
        }
    }
    Ok(String::from_utf8_lossy(&bytes).trim().to_string())
}

fn describe_stream_error(error: JsonValue) -> String {
    match error {
        JsonValue::String(message) => message,
        other => other.to_string(),
    }
}

/// Pulls the outermost `{...}` span out of model output.
///
/// `//` line comments and `/* */` block comments are removed first, then the
/// span runs from the first `{` to the last `}`. Braces are not balanced, and
/// comment markers inside JSON strings are stripped as well.
pub fn extract_json_object(text: &str) -> Result<String> {
    if text.is_empty() {
        return Err(AppError::EmptyInput);
    }

    let cleaned = strip_block_comments(&strip_line_comments(text));

    match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(start), Some(end)) if end > start => Ok(cleaned[start..=end].trim().to_string()),
        _ => Err(AppError::NoJsonObject(preview_text(
            &cleaned,
            HEAD_PREVIEW_CHARS,
        ))),
    }
}

/// Removes each `//` through to the end of its line, keeping the newline.
fn strip_line_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("//") {
        out.push_str(&rest[..start]);
        let comment = &rest[start..];
        rest = match comment.find('\n') {
            Some(newline) => &comment[newline..],
            None => "",
        };
    }
    out.push_str(rest);
    out
}

/// Removes each `/* ... */`, across lines. An unclosed `/*` stays in place.
fn strip_block_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("/*") {
        let body = &rest[start + 2..];
        let Some(end) = body.find("*/") else {
            break;
        };
        out.push_str(&rest[..start]);
        rest = &body[end + 2..];
    }
    out.push_str(rest);
    out
}

pub fn preview_text(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_assemble_concatenates_in_order() {
        let records = vec![
            StreamRecord::bytes("  {\"task\":"),
            StreamRecord::default(),
            StreamRecord::bytes("\"call mom\"}"),
            StreamRecord::bytes("\n"),
        ];
        assert_eq!(
            assemble_agent_text(records).unwrap(),
            "{\"task\":\"call mom\"}"
        );
    }

    #[test]
    fn test_assemble_empty_stream() {
        assert_eq!(assemble_agent_text(Vec::new()).unwrap(), "");
    }

    #[test]
    fn test_assemble_replaces_invalid_utf8() {
        let records = vec![StreamRecord::bytes(vec![b'o', b'k', 0xff])];
        assert_eq!(assemble_agent_text(records).unwrap(), "ok\u{FFFD}");
    }

    #[test]
    fn test_assemble_any_split_point() {
        let payload = "  {\"task\":\"café ☕ at 9\"}\n";
        let bytes = payload.as_bytes();
        for split in 0..=bytes.len() {
            let records = vec![
                StreamRecord::bytes(&bytes[..split]),
                StreamRecord::bytes(&bytes[split..]),
            ];
            assert_eq!(
                assemble_agent_text(records).unwrap(),
                payload.trim(),
                "split at byte {split}"
            );
        }
    }

    #[test]
    fn test_assemble_byte_per_chunk() {
        let payload = "{\"time\":\"17:00\",\"task\":\"naïve ☕\"}";
        let records = payload.bytes().map(|b| StreamRecord::bytes(vec![b]));
        assert_eq!(assemble_agent_text(records).unwrap(), payload);
    }

    #[test]
    fn test_assemble_stops_at_error_marker() {
        let pulled = Cell::new(0);
        let records = vec![
            StreamRecord::bytes("partial"),
            StreamRecord::error("throttlingException"),
            StreamRecord::bytes("never read"),
        ];
        let iter = records.into_iter().inspect(|_| pulled.set(pulled.get() + 1));

        let err = assemble_agent_text(iter).unwrap_err();
        match err {
            AppError::AgentStream(message) => assert_eq!(message, "throttlingException"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(pulled.get(), 2);
    }

    #[test]
    fn test_assemble_structured_error_marker() {
        let records = vec![StreamRecord::error(serde_json::json!({"code": 500}))];
        let err = assemble_agent_text(records).unwrap_err();
        assert_eq!(err.to_string(), "Agent stream error: {\"code\":500}");
    }

    #[test]
    fn test_extract_after_line_comment() {
        assert_eq!(
            extract_json_object("hello // comment\n{\"a\":1}").unwrap(),
            "{\"a\":1}"
        );
    }

    #[test]
    fn test_extract_after_block_comment() {
        assert_eq!(
            extract_json_object("/* note */ prefix {\"x\":true} suffix").unwrap(),
            "{\"x\":true}"
        );
    }

    #[test]
    fn test_extract_schema_with_inline_comments() {
        let output = "Sure!\n{\n  \"task\": \"dentist\",\n  \"date\": \"2026-02-02\", // e.g. date\n  \"time\": null, /* unknown\n time */\n  \"confidence\": 0.8\n}\nDone.";
        let json = extract_json_object(output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["task"], "dentist");
        assert_eq!(value["date"], "2026-02-02");
        assert!(value["time"].is_null());
    }

    #[test]
    fn test_extract_spans_first_open_to_last_close() {
        assert_eq!(
            extract_json_object("a {\"x\":{\"y\":1}} b {\"z\":2} c").unwrap(),
            "{\"x\":{\"y\":1}} b {\"z\":2}"
        );
    }

    #[test]
    fn test_extract_is_idempotent() {
        let once = extract_json_object("noise /* c */ {\"k\": [1, 2]} trailing").unwrap();
        assert_eq!(extract_json_object(&once).unwrap(), once);
    }

    #[test]
    fn test_extract_empty_input() {
        assert!(matches!(extract_json_object(""), Err(AppError::EmptyInput)));
    }

    #[test]
    fn test_extract_without_braces() {
        match extract_json_object("no braces here") {
            Err(AppError::NoJsonObject(head)) => assert_eq!(head, "no braces here"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_extract_close_before_open() {
        assert!(matches!(
            extract_json_object("}{"),
            Err(AppError::NoJsonObject(_))
        ));
    }

    #[test]
    fn test_extract_whitespace_only_is_not_empty() {
        assert!(matches!(
            extract_json_object("   \n"),
            Err(AppError::NoJsonObject(_))
        ));
    }

    #[test]
    fn test_extract_error_head_is_truncated() {
        let noisy = "x".repeat(500);
        match extract_json_object(&noisy) {
            Err(AppError::NoJsonObject(head)) => assert_eq!(head.chars().count(), 200),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_extract_brace_only_inside_comment() {
        assert!(matches!(
            extract_json_object("// {\"a\":1}\nnothing"),
            Err(AppError::NoJsonObject(_))
        ));
    }

    #[test]
    fn test_extract_strips_markers_inside_strings() {
        // Known limitation: the scan does not know about string literals.
        let json = extract_json_object("{\"url\":\"https://example.com\",\n\"ok\":true}").unwrap();
        assert_eq!(json, "{\"url\":\"https:\n\"ok\":true}");
        assert!(serde_json::from_str::<serde_json::Value>(&json).is_err());
    }

    #[test]
    fn test_unclosed_block_comment_is_kept() {
        assert_eq!(strip_block_comments("{\"a\":1} /* open"), "{\"a\":1} /* open");
    }

    #[test]
    fn test_line_comments_run_before_block_comments() {
        assert_eq!(
            strip_block_comments(&strip_line_comments("/* a // b */\nc */ d")),
            " d"
        );
    }
}
