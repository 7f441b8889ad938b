use crate::record::{Message, Role, SessionRecord, truncate_chars};
use std::collections::HashSet;

/// Keywords that mark a sentence as describing a task, scanned in this order.
pub const TOPIC_KEYWORDS: &[&str] = &[
    "create",
    "build",
    "fix",
    "add",
    "implement",
    "set up",
    "configure",
    "design",
    "refactor",
    "update",
    "change",
    "remove",
    "debug",
];

pub const MAX_TOPICS: usize = 10;
pub const MAX_TOPIC_CHARS: usize = 200;
/// Sentences must be strictly longer than this to become a topic.
pub const MIN_TOPIC_SENTENCE_CHARS: usize = 10;

pub const RECENT_REQUEST_COUNT: usize = 5;
pub const MAX_REQUEST_CHARS: usize = 300;

/// Figures derived from a [`SessionRecord`] for the summary document.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStats {
    pub user_messages: usize,
    pub assistant_messages: usize,
    /// Distinct tool names. Iteration order is unspecified.
    pub tools_used: HashSet<String>,
    /// At most [`MAX_TOPICS`] topics. Iteration order is unspecified.
    pub topics: HashSet<String>,
    pub recent_requests: Vec<String>,
}

impl SessionStats {
    pub fn from_record(record: &SessionRecord) -> Self {
        Self {
            user_messages: record.messages_by(Role::User).count(),
            assistant_messages: record.messages_by(Role::Assistant).count(),
            tools_used: record
                .tool_calls
                .iter()
                .map(|call| call.name.clone())
                .collect(),
            topics: extract_topics(&record.messages),
            recent_requests: recent_user_requests(&record.messages),
        }
    }
}

/// Pull task-like sentences out of user messages.
///
/// Each keyword contributes at most the first qualifying sentence of a
/// message, so one message may yield several topics (one per keyword).
/// Matching is a case-insensitive substring test with no word boundaries,
/// e.g. "recreate" matches "create".
pub fn extract_topics(messages: &[Message]) -> HashSet<String> {
    let mut pool = Vec::new();

    for msg in messages.iter().filter(|m| m.role == Role::User) {
        let sentences: Vec<(&str, String)> = msg
            .content
            .split('.')
            .map(|sentence| (sentence, sentence.to_lowercase()))
            .collect();

        for keyword in TOPIC_KEYWORDS {
            let hit = sentences.iter().find(|(sentence, lower)| {
                lower.contains(keyword) && sentence.chars().count() > MIN_TOPIC_SENTENCE_CHARS
            });
            if let Some((sentence, _)) = hit {
                pool.push(truncate_chars(sentence.trim(), MAX_TOPIC_CHARS).to_string());
            }
        }
    }

    pool.into_iter()
        .collect::<HashSet<_>>()
        .into_iter()
        .take(MAX_TOPICS)
        .collect()
}

/// The last [`RECENT_REQUEST_COUNT`] user messages, oldest first, flattened
/// to one line each.
pub fn recent_user_requests(messages: &[Message]) -> Vec<String> {
    let user: Vec<&Message> = messages.iter().filter(|m| m.role == Role::User).collect();
    let start = user.len().saturating_sub(RECENT_REQUEST_COUNT);
    user[start..]
        .iter()
        .map(|m| flatten_request(&m.content))
        .collect()
}

fn flatten_request(content: &str) -> String {
    let head = truncate_chars(content, MAX_REQUEST_CHARS);
    let clipped = if head.len() < content.len() {
        format!("{head}...")
    } else {
        head.to_string()
    };
    clipped.replace('\n', " ").trim().to_string()
}
