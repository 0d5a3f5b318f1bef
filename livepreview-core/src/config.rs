use std::env;

use crate::error::{PreviewError, Result};

pub const DEFAULT_REACT_URL: &str = "https://unpkg.com/react@18.3.1/umd/react.development.js";
pub const DEFAULT_REACT_DOM_URL: &str =
    "https://unpkg.com/react-dom@18.3.1/umd/react-dom.development.js";
pub const DEFAULT_BABEL_URL: &str = "https://unpkg.com/@babel/standalone@7.26.4/babel.min.js";
pub const DEFAULT_TAILWIND_URL: &str = "https://cdn.tailwindcss.com/3.4.16";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewConfig {
    pub react_url: String,
    pub react_dom_url: String,
    pub babel_url: String,
    pub tailwind_url: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            react_url: DEFAULT_REACT_URL.to_string(),
            react_dom_url: DEFAULT_REACT_DOM_URL.to_string(),
            babel_url: DEFAULT_BABEL_URL.to_string(),
            tailwind_url: DEFAULT_TAILWIND_URL.to_string(),
        }
    }
}

impl PreviewConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let pick = |key: &str, default: String| -> Result<String> {
            match lookup(key).filter(|value| !value.trim().is_empty()) {
                Some(value) => validate_asset_url(key, value.trim()),
                None => Ok(default),
            }
        };

        Ok(Self {
            react_url: pick("LIVEPREVIEW_REACT_URL", defaults.react_url)?,
            react_dom_url: pick("LIVEPREVIEW_REACT_DOM_URL", defaults.react_dom_url)?,
            babel_url: pick("LIVEPREVIEW_BABEL_URL", defaults.babel_url)?,
            tailwind_url: pick("LIVEPREVIEW_TAILWIND_URL", defaults.tailwind_url)?,
        })
    }
}

// Asset URLs are written into `src="..."` attributes unescaped.
fn validate_asset_url(key: &str, value: &str) -> Result<String> {
    let has_scheme = value.starts_with("https://") || value.starts_with("http://");
    let has_markup = value
        .chars()
        .any(|ch| matches!(ch, '"' | '\'' | '<' | '>') || ch.is_whitespace());

    if !has_scheme || has_markup {
        return Err(PreviewError::InvalidConfig(format!(
            "{key} must be an http(s) url, got {value:?}"
        )));
    }

    Ok(value.to_string())
}
