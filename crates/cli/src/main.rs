mod config;
mod hook;
mod output;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use session_memory_core::{MemoryStore, SavedSummary, render};
use std::io::{IsTerminal, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "session-memory",
    version,
    about = "Summarize an assistant session transcript into markdown memory files",
    after_help = "When stdin is piped (hook mode), a JSON object with `transcript_path` \
                  and optional `session_id` is read from it instead of TRANSCRIPT."
)]
struct Cli {
    /// Path to the JSONL transcript (argument mode only)
    transcript: Option<PathBuf>,

    /// Directory receiving latest.md and history/
    /// [default: $CLAUDE_PROJECT_DIR/.claude/memory]
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let stdin = std::io::stdin();

    let result = run(cli, stdin.is_terminal(), stdin.lock())
        .and_then(|saved| output::print_report(&saved));
    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Summarize one transcript. An attached terminal selects argument mode;
/// otherwise the hook envelope is read from `stdin`.
fn run<R: Read>(cli: Cli, stdin_is_terminal: bool, stdin: R) -> Result<SavedSummary> {
    let invocation = if stdin_is_terminal {
        match hook::Invocation::from_args(cli.transcript) {
            Some(invocation) => invocation,
            None => {
                eprint!("{}", Cli::command().render_help());
                anyhow::bail!("missing transcript path");
            }
        }
    } else {
        hook::Invocation::from_hook_reader(stdin)?
    };

    let config = config::OutputConfig::resolve(cli.output_dir)?;

    eprintln!("Parsing transcript: {}", invocation.transcript_path.display());
    // Nothing is persisted for a failed parse.
    let record = session_memory_parsers::parse_transcript(&invocation.transcript_path)?;

    let now = chrono::Local::now();
    let session_id = invocation.session_id.as_deref();
    let markdown = render::render_summary(&record, session_id, &now);

    let store = MemoryStore::new(&config.output_dir);
    let saved = store
        .save(&markdown, session_id, &now)
        .with_context(|| format!("Failed to save summary under {}", config.output_dir.display()))?;

    eprintln!("Summary saved to: {}", saved.summary_path.display());
    eprintln!("Latest updated: {}", saved.latest_path.display());

    Ok(saved)
}
