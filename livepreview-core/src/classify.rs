use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{PreviewError, Result};
use crate::model::ClassifiedSource;

pub const ENTRY_COMPONENT: &str = "App";

static ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(?:export\s+(?:default\s+)?)?(?:function|const)\s+App\b")
        .expect("valid regex")
});
static DECLARATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(?:export\s+(?:default\s+)?)?(?:function|const)\s+([A-Z][A-Za-z0-9_]*)")
        .expect("valid regex")
});
static DEFAULT_EXPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*export\s+default\s+([A-Z][A-Za-z0-9_]*)[ \t]*;?[ \t]*(?://[^\n]*)?\r?$")
        .expect("valid regex")
});
static INLINE_DEFAULT_EXPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^export\s+default\s+function\s+([A-Z][A-Za-z0-9_]*)")
        .expect("valid regex")
});

pub fn classify(source: &str) -> ClassifiedSource {
    let source = source.trim();

    let shape = if ENTRY_RE.is_match(source) {
        ClassifiedSource::HasEntryComponent
    } else if let Some(name) = default_exported_component(source) {
        ClassifiedSource::NamedExportComponent(name)
    } else if source.starts_with('<') && source.ends_with('>') {
        ClassifiedSource::BareMarkup
    } else {
        ClassifiedSource::Unrecognized
    };

    debug!(%shape, "classified source");
    shape
}

pub fn classification_to_raw_json(shape: &ClassifiedSource) -> Result<String> {
    serde_json::to_string(shape).map_err(|err| PreviewError::Serialization(err.to_string()))
}

fn default_exported_component(source: &str) -> Option<String> {
    if let Some(captures) = INLINE_DEFAULT_EXPORT_RE.captures(source) {
        return Some(captures[1].to_string());
    }

    let declared = DECLARATION_RE
        .captures_iter(source)
        .map(|captures| captures[1].to_string())
        .collect::<BTreeSet<_>>();

    DEFAULT_EXPORT_RE
        .captures_iter(source)
        .map(|captures| captures[1].to_string())
        .find(|name| declared.contains(name))
}
