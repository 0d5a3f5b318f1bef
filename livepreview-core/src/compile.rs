use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::classify::{ENTRY_COMPONENT, classify};
use crate::config::PreviewConfig;
use crate::model::{ClassifiedSource, RenderableDocument};

pub const MOUNT_ID: &str = "root";
pub const PROGRAM_ID: &str = "preview-program";
pub const PLACEHOLDER_MESSAGE: &str = "Component code executed above";

/// Hooks brought into scope unqualified for generated code.
pub const SCOPED_HOOKS: &[&str] = &[
    "useState",
    "useEffect",
    "useContext",
    "useReducer",
    "useCallback",
    "useMemo",
    "useRef",
    "useLayoutEffect",
    "useId",
];

static RUNTIME_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?m)^[ \t]*import\s+[\w$*{},\s]+?\s+from\s+['"](?:react|react-dom|react-dom/client)['"][ \t]*;?[ \t]*(?:\r?\n|$)"#,
    )
    .expect("valid regex")
});
static DEFAULT_EXPORT_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*export\s+default\s+[A-Z][A-Za-z0-9_]*[ \t]*;?[ \t]*(?://[^\r\n]*)?(?:\r?\n|$)")
        .expect("valid regex")
});
static EXPORT_KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([ \t]*)export\s+(?:default\s+)?((?:async\s+)?function\b|const\b|let\b|class\b)")
        .expect("valid regex")
});
static SCRIPT_BREAKOUT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<(\\*)(/script|!--)").expect("valid regex"));

const STYLE_RESET: &str = r"    <style>
      body {
        margin: 0;
        padding: 0;
        font-family: system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
        background: white;
        overflow-x: hidden;
      }
      * { box-sizing: border-box; }
    </style>
";

const BOOTSTRAP: &str = r#"    <script>
      (function () {
        var mount = document.getElementById("root");
        var label = "Error rendering component:\n";

        function renderError(error) {
          console.error("Error rendering component:", error);
          var panel = document.createElement("pre");
          panel.setAttribute(
            "style",
            "margin: 0; padding: 20px; color: red; font-family: monospace; white-space: pre-wrap;"
          );
          panel.textContent = label + String(error);
          mount.replaceChildren(panel);
        }

        try {
          class PreviewBoundary extends React.Component {
            constructor(props) {
              super(props);
              this.state = { error: null };
            }

            static getDerivedStateFromError(error) {
              return { error: error };
            }

            componentDidCatch(error) {
              console.error("Error rendering component:", error);
            }

            render() {
              if (this.state.error) {
                return React.createElement(
                  "pre",
                  {
                    style: {
                      margin: 0,
                      padding: "20px",
                      color: "red",
                      fontFamily: "monospace",
                      whiteSpace: "pre-wrap"
                    }
                  },
                  label + String(this.state.error)
                );
              }
              return this.props.children;
            }
          }

          var program = document
            .getElementById("preview-program")
            .textContent.replace(/<\\(\\*)(\/script|!--)/gi, "<$1$2");
          var compiled = Babel.transform(program, {
            filename: "preview.tsx",
            presets: ["react", ["typescript", { isTSX: true, allExtensions: true }]]
          }).code;
          new Function("PreviewBoundary", compiled)(PreviewBoundary);
        } catch (error) {
          renderError(error);
        }
      })();
    </script>
"#;

pub fn compile(source_text: Option<&str>, fallback_text: &str) -> RenderableDocument {
    compile_with(&PreviewConfig::default(), source_text, fallback_text)
}

/// Compiles `source_text`, or `fallback_text` when the source is absent or
/// blank. With neither, the result is an idle placeholder document.
pub fn compile_with(
    config: &PreviewConfig,
    source_text: Option<&str>,
    fallback_text: &str,
) -> RenderableDocument {
    let source = source_text
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .or_else(|| {
            let fallback = fallback_text.trim();
            if fallback.is_empty() {
                return None;
            }
            debug!("source absent, compiling fallback");
            Some(fallback)
        });

    let Some(source) = source else {
        debug!("no source or fallback, emitting placeholder document");
        return RenderableDocument::new(placeholder_document());
    };

    let shape = classify(source);
    let program = synthesize_program(source, &shape);
    RenderableDocument::new(render_document(config, &program))
}

pub fn synthesize_program(source: &str, shape: &ClassifiedSource) -> String {
    let body = match shape {
        ClassifiedSource::HasEntryComponent => strip_module_syntax(source).into_owned(),
        ClassifiedSource::NamedExportComponent(name) => format!(
            "{}\n\nfunction {ENTRY_COMPONENT}() {{\n  return <{name} />;\n}}",
            strip_module_syntax(source).trim_end()
        ),
        ClassifiedSource::BareMarkup => {
            format!("function {ENTRY_COMPONENT}() {{\n  return (\n{source}\n  );\n}}")
        }
        ClassifiedSource::Unrecognized => format!(
            "{source}\n\nfunction {ENTRY_COMPONENT}() {{\n  return (\n    <div>\n      {PLACEHOLDER_MESSAGE}\n    </div>\n  );\n}}"
        ),
    };

    let mut program = String::new();
    program.push_str(&format!("const {{ {} }} = React;\n", SCOPED_HOOKS.join(", ")));
    program.push_str("{\n");
    program.push_str(&body);
    program.push_str("\n\n");
    program.push_str(&format!(
        "ReactDOM.createRoot(document.getElementById(\"{MOUNT_ID}\")).render(<PreviewBoundary><{ENTRY_COMPONENT} /></PreviewBoundary>);\n"
    ));
    program.push_str("}\n");
    program
}

// Module syntax is a parse error inside the program block: runtime imports,
// `export default Name;` lines and `export` keywords on declarations go.
pub fn strip_module_syntax(source: &str) -> Cow<'_, str> {
    let mut text = Cow::Borrowed(source);
    for (pattern, replacement) in [
        (&*RUNTIME_IMPORT_RE, ""),
        (&*DEFAULT_EXPORT_LINE_RE, ""),
        (&*EXPORT_KEYWORD_RE, "${1}${2}"),
    ] {
        if pattern.is_match(&text) {
            let replaced = pattern.replace_all(&text, replacement).into_owned();
            text = Cow::Owned(replaced);
        }
    }
    text
}

fn render_document(config: &PreviewConfig, program: &str) -> String {
    let mut output = String::new();
    output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n  <head>\n");
    output.push_str("    <meta charset=\"UTF-8\">\n");
    output.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    output.push_str("    <title>React Component Preview</title>\n");
    for url in [
        &config.react_url,
        &config.react_dom_url,
        &config.babel_url,
        &config.tailwind_url,
    ] {
        output.push_str(&format!("    <script src=\"{url}\"></script>\n"));
    }
    output.push_str(STYLE_RESET);
    output.push_str("  </head>\n");
    output.push_str("  <body class=\"flex items-center justify-center min-h-screen\">\n");
    output.push_str(&format!("    <div id=\"{MOUNT_ID}\"></div>\n"));
    output.push_str(&format!(
        "    <script type=\"text/plain\" id=\"{PROGRAM_ID}\">\n"
    ));
    output.push_str(&escape_script_text(program));
    output.push_str("    </script>\n");
    output.push_str(BOOTSTRAP);
    output.push_str("  </body>\n</html>\n");
    output
}

fn placeholder_document() -> String {
    let mut output = String::new();
    output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n  <head>\n");
    output.push_str("    <meta charset=\"UTF-8\">\n");
    output.push_str("    <title>React Component Preview</title>\n");
    output.push_str(STYLE_RESET);
    output.push_str("  </head>\n  <body>\n");
    output.push_str(&format!(
        "    <div id=\"{MOUNT_ID}\" data-state=\"idle\"></div>\n"
    ));
    output.push_str("  </body>\n</html>\n");
    output
}

// A raw-text `<script>` element ends at the first `</script`, and `<!--`
// switches the tokenizer into escaped mode. Both sequences, and any that
// already carry backslashes after the `<`, get one more backslash; the
// bootstrap removes exactly one again before transforming.
fn escape_script_text(program: &str) -> Cow<'_, str> {
    SCRIPT_BREAKOUT_RE.replace_all(program, r"<\${1}${2}")
}
