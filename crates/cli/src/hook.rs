use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;

/// Envelope piped on stdin by the hook runner.
#[derive(Debug, Deserialize)]
struct HookInput {
    transcript_path: String,
    #[serde(default)]
    session_id: Option<String>,
}

/// What to summarize, however it was supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub transcript_path: PathBuf,
    pub session_id: Option<String>,
}

impl Invocation {
    /// Argument mode: the positional transcript path, no session id.
    pub fn from_args(transcript: Option<PathBuf>) -> Option<Self> {
        transcript.map(|transcript_path| Self {
            transcript_path,
            session_id: None,
        })
    }

    /// Hook mode: one JSON object read to end of input.
    pub fn from_hook_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut raw = String::new();
        reader
            .read_to_string(&mut raw)
            .context("Invalid hook input")?;
        let input: HookInput = serde_json::from_str(&raw).context("Invalid hook input")?;
        Ok(Self {
            transcript_path: PathBuf::from(input.transcript_path),
            // An empty id behaves like no id at all.
            session_id: input.session_id.filter(|id| !id.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_input_with_session() {
        let inv = Invocation::from_hook_reader(
            r#"{"transcript_path":"/x.jsonl","session_id":"abcdef1234","hook_event_name":"Stop"}"#
                .as_bytes(),
        )
        .expect("valid hook input");
        assert_eq!(inv.transcript_path, PathBuf::from("/x.jsonl"));
        assert_eq!(inv.session_id.as_deref(), Some("abcdef1234"));
    }

    #[test]
    fn hook_input_without_session() {
        let inv = Invocation::from_hook_reader(r#"{"transcript_path":"t.jsonl"}"#.as_bytes())
            .expect("valid hook input");
        assert_eq!(inv.session_id, None);
    }

    #[test]
    fn empty_session_id_is_dropped() {
        let inv = Invocation::from_hook_reader(
            r#"{"transcript_path":"t.jsonl","session_id":""}"#.as_bytes(),
        )
        .expect("valid hook input");
        assert_eq!(inv.session_id, None);
    }

    #[test]
    fn malformed_hook_input_is_rejected() {
        for raw in [
            "",
            "not json",
            "[]",
            r#"{"session_id":"abc"}"#,
            r#"{"transcript_path":null}"#,
            r#"{"transcript_path":42}"#,
        ] {
            let err = Invocation::from_hook_reader(raw.as_bytes()).expect_err(raw);
            assert!(format!("{err:#}").starts_with("Invalid hook input"), "{raw}");
        }
    }

    #[test]
    fn argument_mode_needs_a_path() {
        assert_eq!(Invocation::from_args(None), None);
        let inv = Invocation::from_args(Some(PathBuf::from("s.jsonl"))).expect("path given");
        assert_eq!(inv.transcript_path, PathBuf::from("s.jsonl"));
        assert_eq!(inv.session_id, None);
    }
}
