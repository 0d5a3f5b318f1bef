use tracing::debug;

use crate::compile::compile_with;
use crate::config::PreviewConfig;
use crate::extract::{extract, latest_code_snapshot};
use crate::model::{ChatMessage, CodeTemplate, RenderableDocument};
use crate::templates::DEFAULT_CODE;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewSession {
    generated: Option<String>,
    template: Option<&'static CodeTemplate>,
}

impl PreviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, transcript: &[ChatMessage]) -> bool {
        let Some(candidate) = extract(transcript) else {
            return false;
        };
        if self.generated.as_deref() == Some(candidate.as_str()) {
            return false;
        }

        debug!(bytes = candidate.source_text.len(), "generated code updated");
        self.generated = Some(candidate.source_text);
        true
    }

    pub fn restore(&mut self, transcript: &[ChatMessage]) {
        self.generated = latest_code_snapshot(transcript).map(|candidate| candidate.source_text);
        self.template = None;
    }

    pub fn select_template(&mut self, template: &'static CodeTemplate) {
        self.template = Some(template);
    }

    pub fn clear_template(&mut self) {
        self.template = None;
    }

    pub fn selected_template(&self) -> Option<&'static CodeTemplate> {
        self.template
    }

    pub fn generated_code(&self) -> Option<&str> {
        self.generated.as_deref()
    }

    pub fn active_source(&self) -> Option<&str> {
        match self.template {
            Some(template) => Some(template.code),
            None => self.generated_code(),
        }
    }

    pub fn document(&self, config: &PreviewConfig) -> RenderableDocument {
        compile_with(config, self.active_source(), DEFAULT_CODE)
    }
}
