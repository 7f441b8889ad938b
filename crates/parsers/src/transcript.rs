//! Parser for line-delimited JSON session transcripts.
//!
//! Each line is an independent JSON value. Objects carrying a `role` key are
//! conversation entries whose `content` is either a plain string or an array
//! of typed parts (`text`, `tool_use`, ...). Anything that does not fit is
//! skipped; only failing to read the file at all is an error.

use serde::Deserialize;
use serde_json::{Map, Value};
use session_memory_core::{Role, SessionRecord, ToolCall};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("Transcript not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read transcript {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
}

// ── Raw JSONL deserialization types ──────────────────────────────────────────

/// A conversation entry. Only built for objects that have a `role` key.
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    role: Value,
    #[serde(default)]
    content: Option<RawContent>,
}

/// Entry content is either a plain string or an array of parts. Any other
/// shape carries no text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawContent {
    Text(String),
    Parts(Vec<Value>),
    #[allow(dead_code)]
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum RawPart {
    #[serde(rename = "text")]
    Text {
        #[serde(default)]
        text: String,
    },
    #[serde(rename = "tool_use")]
    ToolUse {
        #[serde(default)]
        name: String,
        #[serde(default)]
        input: Value,
    },
    // thinking, tool_result, images, ...
    #[serde(other)]
    Other,
}

// ── Parsing logic ───────────────────────────────────────────────────────────

/// Parse the transcript at `path` into a [`SessionRecord`].
pub fn parse_transcript(path: &Path) -> Result<SessionRecord, TranscriptError> {
    let file = std::fs::File::open(path).map_err(|e| open_error(path, e))?;
    let record =
        parse_reader(io::BufReader::new(file)).map_err(|source| TranscriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(
        "parsed {}: {} messages, {} tool calls",
        path.display(),
        record.messages.len(),
        record.tool_calls.len()
    );
    Ok(record)
}

fn open_error(path: &Path, err: io::Error) -> TranscriptError {
    if err.kind() == io::ErrorKind::NotFound {
        TranscriptError::NotFound(path.to_path_buf())
    } else {
        TranscriptError::Read {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Parse transcript lines from any buffered reader.
///
/// Blank and malformed lines are skipped. Read failures (including invalid
/// UTF-8) abort the whole parse.
pub fn parse_reader<R: BufRead>(reader: R) -> io::Result<SessionRecord> {
    let mut record = SessionRecord::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let value: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!("Skipping unparseable JSONL line {}: {}", idx + 1, e);
                continue;
            }
        };

        apply_line(&mut record, value);
    }

    Ok(record)
}

fn apply_line(record: &mut SessionRecord, value: Value) {
    if !value.as_object().is_some_and(|obj| obj.contains_key("role")) {
        return;
    }
    let entry: RawEntry = match serde_json::from_value(value) {
        Ok(entry) => entry,
        Err(e) => {
            tracing::debug!("Skipping malformed entry: {}", e);
            return;
        }
    };

    // Tool calls are collected even when the role is not a message role.
    let content = resolve_content(entry.content, record);

    if let Some(role) = entry.role.as_str().and_then(Role::from_label) {
        record.push_message(role, &content);
    }
}

/// Flatten entry content into its text, recording any tool-use parts on the way.
fn resolve_content(content: Option<RawContent>, record: &mut SessionRecord) -> String {
    match content {
        Some(RawContent::Text(text)) => text,
        Some(RawContent::Parts(parts)) => {
            let mut texts = Vec::new();
            for part in parts {
                match serde_json::from_value::<RawPart>(part) {
                    Ok(RawPart::Text { text }) => texts.push(text),
                    Ok(RawPart::ToolUse { name, input }) => {
                        let input = match input {
                            Value::Object(map) => map,
                            _ => Map::new(),
                        };
                        record.push_tool_call(ToolCall { name, input });
                    }
                    Ok(RawPart::Other) | Err(_) => {}
                }
            }
            texts.join("\n")
        }
        Some(RawContent::Other(_)) | None => String::new(),
    }
}
