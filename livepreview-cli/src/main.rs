use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use livepreview_core::{
    PreviewConfig, PreviewError, PreviewSession, RenderableDocument, TEMPLATES,
    classification_to_raw_json, classify, compile_with, conversation_name, extract,
    extract_from_message, find_template, parse_transcript, read_text_file,
    templates_to_raw_json,
};
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

const STDIN_LABEL: &str = "<stdin>";

#[derive(Debug, Parser)]
#[command(
    name = "livepreview",
    version,
    about = "Extract generated React components from chat transcripts and compile sandboxed previews"
)]
struct Cli {
    /// Log debug details to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the code block from the latest assistant message
    Extract {
        /// Transcript as a JSON array or JSONL of {role, content}; stdin when omitted or `-`
        input: Option<PathBuf>,

        /// Treat the input as a single message body instead of a transcript
        #[arg(long)]
        message: bool,
    },

    /// Print the shape detected for a component source
    Classify {
        /// Source file; stdin when omitted or `-`
        input: Option<PathBuf>,

        /// Output raw JSON instead of text
        #[arg(long)]
        raw: bool,
    },

    /// Compile a component source into a preview document
    Compile {
        /// Source file; stdin when omitted or `-`
        input: Option<PathBuf>,

        /// Source compiled when the input is empty
        #[arg(long)]
        fallback: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Extract code from a transcript and compile it, falling back to the welcome screen
    Preview {
        /// Transcript as a JSON array or JSONL of {role, content}; stdin when omitted or `-`
        transcript: Option<PathBuf>,

        /// Preview a built-in template (id or name) instead of the generated code
        #[arg(long)]
        template: Option<String>,

        /// Use the newest code of any assistant message, as when reopening a conversation
        #[arg(long)]
        restore: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List built-in templates
    Templates {
        /// Output raw JSON instead of markdown
        #[arg(long)]
        raw: bool,
    },

    /// Print the conversation name derived from a first message
    Name {
        /// Message file; stdin when omitted or `-`
        input: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Emit a sandboxed <iframe> element carrying the document as srcdoc
    #[arg(long)]
    iframe: bool,

    /// Frame title used with --iframe
    #[arg(long, default_value = "React Component Preview")]
    title: String,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Command) -> livepreview_core::Result<()> {
    match command {
        Command::Extract { input, message } => {
            let (path, raw) = read_input(input.as_deref())?;
            let candidate = if message {
                extract_from_message(&raw)
            } else {
                extract(&parse_transcript(&path, &raw)?)
            };

            match candidate {
                Some(candidate) => println!("{}", candidate.source_text),
                None => debug!(path = %path.display(), "no code block found"),
            }
        }
        Command::Classify { input, raw } => {
            let (_, source) = read_input(input.as_deref())?;
            let shape = classify(&source);
            if raw {
                println!("{}", classification_to_raw_json(&shape)?);
            } else {
                println!("{shape}");
            }
        }
        Command::Compile {
            input,
            fallback,
            output,
        } => {
            let config = PreviewConfig::from_env()?;
            let (_, source) = read_input(input.as_deref())?;
            let fallback = fallback
                .as_deref()
                .map(read_text_file)
                .transpose()?
                .unwrap_or_default();

            let document = compile_with(&config, Some(&source), &fallback);
            write_document(&document, &output)?;
        }
        Command::Preview {
            transcript,
            template,
            restore,
            output,
        } => {
            let config = PreviewConfig::from_env()?;
            let (path, raw) = read_input(transcript.as_deref())?;
            let messages = parse_transcript(&path, &raw)?;

            let mut session = PreviewSession::new();
            if restore {
                session.restore(&messages);
            } else {
                session.observe(&messages);
            }
            if let Some(key) = template {
                session.select_template(find_template(&key)?);
            }

            write_document(&session.document(&config), &output)?;
        }
        Command::Templates { raw } => {
            if raw {
                println!("{}", templates_to_raw_json()?);
            } else {
                let mut markdown = String::from("# Templates\n\n");
                for template in TEMPLATES {
                    markdown.push_str(&format!("- {}: {}\n", template.id, template.name));
                }
                print!("{markdown}");
            }
        }
        Command::Name { input } => {
            let (_, message) = read_input(input.as_deref())?;
            println!("{}", conversation_name(&message));
        }
    }

    Ok(())
}

fn read_input(input: Option<&Path>) -> livepreview_core::Result<(PathBuf, String)> {
    match input {
        Some(path) if path != Path::new("-") => {
            let raw = read_text_file(path)?;
            Ok((path.to_path_buf(), raw))
        }
        _ => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .map_err(|source| PreviewError::Io {
                    path: PathBuf::from(STDIN_LABEL),
                    source,
                })?;
            Ok((PathBuf::from(STDIN_LABEL), raw))
        }
    }
}

fn write_document(document: &RenderableDocument, args: &OutputArgs) -> livepreview_core::Result<()> {
    let text = if args.iframe {
        document.to_iframe(&args.title)
    } else {
        document.to_string()
    };

    match &args.output {
        Some(path) => fs::write(path, text).map_err(|source| PreviewError::Io {
            path: path.clone(),
            source,
        }),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}
