use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{PreviewError, Result};
use crate::model::{ChatMessage, MessageRole};

pub const DEFAULT_CONVERSATION_NAME: &str = "New Conversation";
const CONVERSATION_NAME_CHARS: usize = 50;

pub fn read_transcript(path: &Path) -> Result<Vec<ChatMessage>> {
    let raw = read_text_file(path)?;
    parse_transcript(path, &raw)
}

pub fn read_text_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| PreviewError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    String::from_utf8(bytes).map_err(|_| PreviewError::NonUtf8File {
        path: path.to_path_buf(),
    })
}

pub fn parse_transcript(path: &Path, raw: &str) -> Result<Vec<ChatMessage>> {
    let trimmed = raw.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        let value = serde_json::from_str::<Value>(raw).map_err(|source| {
            PreviewError::InvalidJson {
                path: path.to_path_buf(),
                line: source.line(),
                source,
            }
        })?;
        let mut messages = Vec::new();
        for (idx, item) in value.as_array().into_iter().flatten().enumerate() {
            if !item.is_object() {
                return Err(PreviewError::InvalidTranscript(format!(
                    "item {idx} of {} is not a message object",
                    path.display()
                )));
            }
            messages.extend(parse_message(item));
        }
        return Ok(messages);
    }

    let mut messages = Vec::new();
    for (line_idx, line) in raw.lines().enumerate() {
        let line_no = line_idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let value = serde_json::from_str::<Value>(trimmed).map_err(|source| {
            PreviewError::InvalidJson {
                path: path.to_path_buf(),
                line: line_no,
                source,
            }
        })?;

        if !value.is_object() {
            return Err(PreviewError::InvalidTranscript(format!(
                "line {line_no} of {} is not a message object",
                path.display()
            )));
        }
        messages.extend(parse_message(&value));
    }

    Ok(messages)
}

pub fn conversation_name(first_message: &str) -> String {
    let head = first_message
        .trim()
        .chars()
        .take(CONVERSATION_NAME_CHARS)
        .collect::<String>();

    let mut name = String::with_capacity(head.len());
    let mut in_space = false;
    for ch in head.chars() {
        if ch.is_whitespace() {
            if !in_space {
                name.push(' ');
            }
            in_space = true;
        } else {
            name.push(ch);
            in_space = false;
        }
    }

    if name.is_empty() {
        return DEFAULT_CONVERSATION_NAME.to_string();
    }
    name
}

fn parse_message(value: &Value) -> Option<ChatMessage> {
    let role = value.get("role").and_then(Value::as_str)?;
    let Some(role) = parse_role(role) else {
        debug!(role, "skipping message with unsupported role");
        return None;
    };

    let content = value.get("content").or_else(|| value.get("message"));
    Some(ChatMessage {
        role,
        content: extract_text(content)?,
    })
}

fn parse_role(role: &str) -> Option<MessageRole> {
    match role {
        "user" => Some(MessageRole::User),
        "assistant" | "ai" => Some(MessageRole::Assistant),
        _ => None,
    }
}

// Plain strings are kept verbatim so fenced blocks survive byte for byte;
// content-part arrays contribute their text parts.
fn extract_text(content: Option<&Value>) -> Option<String> {
    let content = content?;

    if let Some(text) = content.as_str() {
        return Some(text.to_string());
    }

    let items = content.as_array()?;
    let chunks = items
        .iter()
        .filter_map(|item| {
            item.as_str()
                .or_else(|| item.get("text").and_then(Value::as_str))
        })
        .collect::<Vec<_>>();

    Some(chunks.join("\n\n"))
}
