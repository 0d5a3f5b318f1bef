pub mod classify;
pub mod compile;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod session;
pub mod templates;
pub mod transcript;

pub use classify::{classification_to_raw_json, classify};
pub use compile::{compile, compile_with, synthesize_program};
pub use config::PreviewConfig;
pub use error::{PreviewError, Result};
pub use extract::{extract, extract_from_message, latest_code_snapshot};
pub use model::{
    ChatMessage, ClassifiedSource, CodeCandidate, CodeTemplate, MessageRole, RenderableDocument,
    SANDBOX_POLICY,
};
pub use session::PreviewSession;
pub use templates::{DEFAULT_CODE, TEMPLATES, find_template, templates_to_raw_json};
pub use transcript::{conversation_name, parse_transcript, read_text_file, read_transcript};
