use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;

const CARD_REPLY: &str = "Here is a card:\n\n```jsx\nimport React from 'react';\n\nfunction Card() {\n  return (\n    <div className=\"p-4\">card</div>\n  );\n}\n\nexport default Card;\n```\n\nLet me know if you want changes.";

fn livepreview() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("livepreview"));
    cmd.env_remove("RUST_LOG")
        .env_remove("LIVEPREVIEW_REACT_URL")
        .env_remove("LIVEPREVIEW_REACT_DOM_URL")
        .env_remove("LIVEPREVIEW_BABEL_URL")
        .env_remove("LIVEPREVIEW_TAILWIND_URL");
    cmd
}

fn transcript_json(assistant: &str) -> String {
    messages_json(&[("user", "build me a card"), ("assistant", assistant)])
}

fn messages_json(messages: &[(&str, &str)]) -> String {
    let items = messages
        .iter()
        .map(|(role, content)| json!({ "role": role, "content": content }))
        .collect::<Vec<_>>();
    serde_json::to_string(&items).expect("serialize transcript")
}

#[test]
fn extract_prints_latest_assistant_code() {
    livepreview()
        .arg("extract")
        .write_stdin(transcript_json(CARD_REPLY))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("import React from 'react';\n\nfunction Card()"))
        .stdout(predicate::str::contains("export default Card;\n"))
        .stdout(predicate::str::contains("Let me know").not());
}

#[test]
fn extract_reads_transcript_file() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("chat.jsonl");
    let lines = [
        json!({ "role": "user", "content": "hi" }),
        json!({ "role": "ai", "message": "```tsx\nconst A = 1;\n```" }),
    ]
    .iter()
    .map(|line| format!("{line}\n"))
    .collect::<String>();
    fs::write(&path, lines).expect("write");

    livepreview()
        .arg("extract")
        .arg(&path)
        .assert()
        .success()
        .stdout("const A = 1;\n");
}

#[test]
fn extract_miss_prints_nothing() {
    livepreview()
        .arg("extract")
        .write_stdin(messages_json(&[("user", "```jsx\n<div/>\n```")]))
        .assert()
        .success()
        .stdout("");
}

#[test]
fn extract_single_message_mode() {
    livepreview()
        .arg("extract")
        .arg("--message")
        .write_stdin("```\nfunction Hello() {\n  return (<p>hi</p>);\n}\n```\n")
        .assert()
        .success()
        .stdout("function Hello() {\n  return (<p>hi</p>);\n}\n");
}

#[test]
fn extract_reports_invalid_json() {
    livepreview()
        .arg("extract")
        .write_stdin("{\"role\":\"user\"\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: invalid json in <stdin> at line 1"));
}

#[test]
fn classify_outputs_text_and_raw_json() {
    livepreview()
        .arg("classify")
        .write_stdin("<div>hello</div>")
        .assert()
        .success()
        .stdout("bare_markup\n");

    livepreview()
        .arg("classify")
        .arg("--raw")
        .write_stdin("function Card(){ return <div/>; }\nexport default Card;")
        .assert()
        .success()
        .stdout("{\"kind\":\"named_export_component\",\"name\":\"Card\"}\n");
}

#[test]
fn compile_outputs_document_with_boundary() {
    livepreview()
        .arg("compile")
        .write_stdin("function App() { return <div>Hi</div>; }")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("function App() { return <div>Hi</div>; }"))
        .stdout(predicate::str::contains("catch (error)"))
        .stdout(predicate::str::contains("react@18.3.1"));
}

#[test]
fn compile_empty_input_uses_fallback_file() {
    let temp = tempdir().expect("tempdir");
    let fallback = temp.path().join("fallback.jsx");
    fs::write(&fallback, "<p>fallback markup</p>\n").expect("write");

    livepreview()
        .arg("compile")
        .arg("--fallback")
        .arg(&fallback)
        .write_stdin("   \n")
        .assert()
        .success()
        .stdout(predicate::str::contains("return (\n<p>fallback markup</p>\n  );"));
}

#[test]
fn compile_empty_input_without_fallback_is_placeholder() {
    livepreview()
        .arg("compile")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("data-state=\"idle\""))
        .stdout(predicate::str::contains("<script").not());
}

#[test]
fn compile_writes_iframe_to_file() {
    let temp = tempdir().expect("tempdir");
    let out = temp.path().join("preview.html");

    livepreview()
        .arg("compile")
        .arg("--iframe")
        .arg("--title")
        .arg("Card")
        .arg("-o")
        .arg(&out)
        .write_stdin("<div>hello</div>")
        .assert()
        .success()
        .stdout("");

    let written = fs::read_to_string(&out).expect("read output");
    assert!(written.starts_with("<iframe "));
    assert!(written.contains("sandbox=\"allow-scripts\""));
    assert!(written.contains("title=\"Card\""));
    assert!(written.contains("srcdoc=\"&lt;!DOCTYPE html&gt;"));
}

#[test]
fn compile_rejects_invalid_asset_override() {
    livepreview()
        .arg("compile")
        .env("LIVEPREVIEW_BABEL_URL", "ftp://example.test/babel.js")
        .write_stdin("<div/>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config: LIVEPREVIEW_BABEL_URL"));
}

#[test]
fn compile_honors_asset_override() {
    livepreview()
        .arg("compile")
        .env("LIVEPREVIEW_TAILWIND_URL", "http://localhost:9000/tailwind.js")
        .write_stdin("<div/>")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<script src=\"http://localhost:9000/tailwind.js\"></script>",
        ));
}

#[test]
fn preview_compiles_extracted_named_export() {
    livepreview()
        .arg("preview")
        .write_stdin(transcript_json(CARD_REPLY))
        .assert()
        .success()
        .stdout(predicate::str::contains("function App() {\n  return <Card />;\n}"))
        .stdout(predicate::str::contains("export default Card").not());
}

#[test]
fn preview_without_code_shows_welcome_screen() {
    livepreview()
        .arg("preview")
        .write_stdin(transcript_json("I can help with that. What colors?"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to AI Code Generator"));
}

#[test]
fn preview_restore_uses_newest_snapshot() {
    let transcript = messages_json(&[
        ("user", "a card"),
        ("assistant", CARD_REPLY),
        ("user", "why?"),
        ("assistant", "Because cards group content."),
    ]);

    livepreview()
        .arg("preview")
        .write_stdin(transcript.clone())
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to AI Code Generator"));

    livepreview()
        .arg("preview")
        .arg("--restore")
        .write_stdin(transcript)
        .assert()
        .success()
        .stdout(predicate::str::contains("return <Card />;"));
}

#[test]
fn preview_template_overrides_generated_code() {
    livepreview()
        .arg("preview")
        .arg("--template")
        .arg("todo list")
        .write_stdin(transcript_json(CARD_REPLY))
        .assert()
        .success()
        .stdout(predicate::str::contains("function TodoList()"))
        .stdout(predicate::str::contains("return <Card />;").not());
}

#[test]
fn preview_unknown_template_fails() {
    livepreview()
        .arg("preview")
        .arg("--template")
        .arg("carousel")
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown template: carousel"));
}

#[test]
fn templates_lists_markdown_and_raw_json() {
    livepreview()
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Templates"))
        .stdout(predicate::str::contains("- 1: Button Component"))
        .stdout(predicate::str::contains("- 3: Todo List"));

    livepreview()
        .arg("templates")
        .arg("--raw")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Card Component\""))
        .stdout(predicate::str::contains("\"code\": \"function Card("));
}

#[test]
fn name_derives_conversation_title() {
    livepreview()
        .arg("name")
        .write_stdin("  Create a\n\nlogin form  ")
        .assert()
        .success()
        .stdout("Create a login form\n");

    livepreview()
        .arg("name")
        .write_stdin("")
        .assert()
        .success()
        .stdout("New Conversation\n");
}

#[test]
fn missing_input_file_returns_non_zero() {
    let temp = tempdir().expect("tempdir");

    livepreview()
        .arg("extract")
        .arg(temp.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("i/o error"));
}

#[test]
fn verbose_logs_to_stderr_only() {
    livepreview()
        .arg("-v")
        .arg("classify")
        .write_stdin("<div/>")
        .assert()
        .success()
        .stdout("bare_markup\n")
        .stderr(predicate::str::contains("classified source"));
}

#[test]
fn extract_keeps_tabs_and_carriage_returns() {
    livepreview()
        .arg("extract")
        .write_stdin(transcript_json("```jsx\r\nconst a = {\r\n\tb: \"\\t\",\r\n};\r\n```"))
        .assert()
        .success()
        .stdout("const a = {\r\n\tb: \"\\t\",\r\n};\n");
}

#[test]
fn preview_renders_list_indented_reply() {
    let reply = "Steps:\n\n1. Paste this:\n   ```jsx\n   import React from 'react';\n\n   function App() {\n     return <p>nested</p>;\n   }\n   ```\n";

    livepreview()
        .arg("preview")
        .write_stdin(transcript_json(reply))
        .assert()
        .success()
        .stdout(predicate::str::contains("\nfunction App() {\n  return <p>nested</p>;\n}"))
        .stdout(predicate::str::contains("Component code executed above").not());
}
