use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Upper bound, in chars, on a stored message body.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Tool names whose `file_path` argument counts as a modification.
pub const WRITE_TOOLS: &[&str] = &["Write", "Edit"];

/// Tool names whose `file_path` argument counts as a read.
pub const READ_TOOLS: &[&str] = &["Read"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Map a raw transcript role label. Only the exact lowercase labels are
    /// recognized; everything else (system, tool, ...) is not a message.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Build a message, capping the content at [`MAX_MESSAGE_CHARS`].
    pub fn new(role: Role, content: &str) -> Self {
        Self {
            role,
            content: truncate_chars(content, MAX_MESSAGE_CHARS).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolCall {
    pub name: String,
    pub input: Map<String, Value>,
}

impl ToolCall {
    /// Non-empty `file_path` argument, if the call carries one.
    pub fn file_path(&self) -> Option<&str> {
        self.input
            .get("file_path")
            .and_then(Value::as_str)
            .filter(|path| !path.is_empty())
    }

    pub fn kind(&self) -> ToolKind {
        let name = self.name.as_str();
        if WRITE_TOOLS.contains(&name) {
            ToolKind::FileWrite
        } else if READ_TOOLS.contains(&name) {
            ToolKind::FileRead
        } else {
            ToolKind::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    FileWrite,
    FileRead,
    Other,
}

/// Normalized view of one transcript. Built once by the parser and only
/// read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionRecord {
    pub messages: Vec<Message>,
    pub tool_calls: Vec<ToolCall>,
    pub files_modified: BTreeSet<String>,
    pub files_read: BTreeSet<String>,
}

impl SessionRecord {
    /// Record a tool call and fold its path into the matching file set.
    pub fn push_tool_call(&mut self, call: ToolCall) {
        if let Some(path) = call.file_path() {
            match call.kind() {
                ToolKind::FileWrite => {
                    self.files_modified.insert(path.to_string());
                }
                ToolKind::FileRead => {
                    self.files_read.insert(path.to_string());
                }
                ToolKind::Other => {}
            }
        }
        self.tool_calls.push(call);
    }

    /// Append a message unless its content is empty.
    pub fn push_message(&mut self, role: Role, content: &str) {
        if content.is_empty() {
            return;
        }
        self.messages.push(Message::new(role, content));
    }

    pub fn messages_by(&self, role: Role) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(move |m| m.role == role)
    }
}

/// Prefix of `s` holding at most `max_chars` chars.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
