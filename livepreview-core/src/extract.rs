use std::borrow::Cow;

use tracing::debug;

use crate::model::{ChatMessage, CodeCandidate, MessageRole};

const FENCE: &str = "```";
const CODE_LANGUAGES: &[&str] = &["jsx", "js", "tsx", "ts"];

#[derive(Debug, Clone, PartialEq, Eq)]
struct FencedBlock<'a> {
    language: &'a str,
    body: Cow<'a, str>,
}

pub fn extract(transcript: &[ChatMessage]) -> Option<CodeCandidate> {
    let message = transcript
        .iter()
        .rev()
        .find(|message| message.role == MessageRole::Assistant)?;
    extract_from_message(&message.content)
}

/// The first block tagged `jsx`, `js`, `tsx` or `ts` wins. Without one, the
/// first untagged block is accepted only if it looks like a component.
pub fn extract_from_message(content: &str) -> Option<CodeCandidate> {
    let blocks = fenced_blocks(content);

    if let Some((idx, block)) = blocks
        .iter()
        .enumerate()
        .find(|(_, block)| CODE_LANGUAGES.contains(&block.language))
    {
        debug!(block = idx, language = block.language, "using tagged code block");
        return Some(CodeCandidate {
            source_text: block.body.to_string(),
        });
    }

    let untagged = blocks.iter().find(|block| block.language.is_empty())?;
    if !looks_like_component(&untagged.body) {
        debug!("first untagged code block does not look like a component");
        return None;
    }

    debug!("using untagged code block");
    Some(CodeCandidate {
        source_text: untagged.body.to_string(),
    })
}

pub fn latest_code_snapshot(transcript: &[ChatMessage]) -> Option<CodeCandidate> {
    transcript
        .iter()
        .rev()
        .filter(|message| message.role == MessageRole::Assistant)
        .find_map(|message| extract_from_message(&message.content))
}

// Loose guard against shell or prose samples in untagged fences. Implicit
// arrow returns are missed on purpose.
fn looks_like_component(body: &str) -> bool {
    body.contains("function ") && body.contains("return (")
}

fn fenced_blocks(content: &str) -> Vec<FencedBlock<'_>> {
    let mut blocks = Vec::new();
    let mut open: Option<(&str, usize, usize)> = None;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        let marker = line.trim();

        match open {
            None => {
                let Some(info) = marker.strip_prefix(FENCE) else {
                    continue;
                };
                if info.contains('`') {
                    continue;
                }
                let language = info.split_whitespace().next().unwrap_or_default();
                open = Some((language, fence_indent(line), offset));
            }
            Some((language, indent, body_start)) => {
                if marker != FENCE {
                    continue;
                }
                let body = dedent(&content[body_start..line_start], indent);
                if !body.is_empty() {
                    blocks.push(FencedBlock { language, body });
                }
                open = None;
            }
        }
    }

    blocks
}

fn fence_indent(line: &str) -> usize {
    line.bytes()
        .take_while(|byte| matches!(byte, b' ' | b'\t'))
        .count()
}

// Fences nested in list items are indented; their body lines carry the same
// indentation, which is removed up to the width of the opening fence.
fn dedent(body: &str, indent: usize) -> Cow<'_, str> {
    if indent == 0 {
        return Cow::Borrowed(body.trim());
    }

    let mut dedented = String::with_capacity(body.len());
    for line in body.split_inclusive('\n') {
        let strip = line
            .bytes()
            .take(indent)
            .take_while(|byte| matches!(byte, b' ' | b'\t'))
            .count();
        dedented.push_str(&line[strip..]);
    }
    Cow::Owned(dedented.trim().to_string())
}
