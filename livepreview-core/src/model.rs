use std::fmt;

use serde::Serialize;

pub const SANDBOX_POLICY: &str = "allow-scripts";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeCandidate {
    pub source_text: String,
}

impl CodeCandidate {
    pub fn as_str(&self) -> &str {
        &self.source_text
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ClassifiedSource {
    HasEntryComponent,
    NamedExportComponent(String),
    BareMarkup,
    Unrecognized,
}

impl fmt::Display for ClassifiedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HasEntryComponent => write!(f, "has_entry_component"),
            Self::NamedExportComponent(name) => write!(f, "named_export_component({name})"),
            Self::BareMarkup => write!(f, "bare_markup"),
            Self::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderableDocument {
    html: String,
}

impl RenderableDocument {
    pub(crate) fn new(html: String) -> Self {
        Self { html }
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }

    pub fn to_iframe(&self, title: &str) -> String {
        format!(
            "<iframe class=\"w-full h-full border-0\" sandbox=\"{SANDBOX_POLICY}\" title=\"{}\" srcdoc=\"{}\"></iframe>\n",
            escape_attribute(title),
            escape_attribute(&self.html)
        )
    }
}

impl fmt::Display for RenderableDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeTemplate {
    pub id: u32,
    pub name: &'static str,
    pub code: &'static str,
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
