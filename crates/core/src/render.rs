//! Markdown rendering of a parsed session.
//!
//! The layout is fixed: header, overview, topics, modified files, read
//! files, recent user requests, and a static next-steps section.

use crate::extract::SessionStats;
use crate::record::SessionRecord;
use chrono::{DateTime, Local};
use std::collections::BTreeSet;

/// Format used for the `**Date**` header line.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Read files listed before the remainder is collapsed into a count.
pub const MAX_FILES_READ: usize = 20;

const NEXT_STEPS_PLACEHOLDER: &str = "_Update this section with any pending tasks or decisions._";

/// One-line document for a transcript that could not be parsed.
pub fn render_error(message: &str) -> String {
    format!("# Session Summary\n\nError: {message}")
}

/// Render the full summary document for `record`.
pub fn render_summary(
    record: &SessionRecord,
    session_id: Option<&str>,
    now: &DateTime<Local>,
) -> String {
    let stats = SessionStats::from_record(record);
    let mut md = String::new();

    md.push_str("# Chat Summary\n");
    md.push_str(&format!("**Date**: {}\n", now.format(DATE_FORMAT)));
    md.push_str(&format!(
        "**Session ID**: {}\n\n",
        session_id.unwrap_or("unknown")
    ));

    md.push_str("## Overview\n");
    md.push_str(&format!("- **User messages**: {}\n", stats.user_messages));
    md.push_str(&format!(
        "- **Assistant responses**: {}\n",
        stats.assistant_messages
    ));
    let tools = if stats.tools_used.is_empty() {
        "None".to_string()
    } else {
        stats
            .tools_used
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    md.push_str(&format!("- **Tools used**: {tools}\n\n"));

    md.push_str("## Key Topics Discussed\n");
    if stats.topics.is_empty() {
        md.push_str("- General conversation\n");
    } else {
        for topic in &stats.topics {
            md.push_str(&format!("- {topic}\n"));
        }
    }

    md.push_str("\n## Files Modified\n");
    append_file_list(&mut md, &record.files_modified, None);

    md.push_str("\n## Files Read\n");
    append_file_list(&mut md, &record.files_read, Some(MAX_FILES_READ));

    md.push_str("\n## Recent User Requests\n");
    for request in &stats.recent_requests {
        md.push_str(&format!("> {request}\n\n"));
    }

    md.push_str("\n## Next Steps / Open Items\n");
    md.push_str(NEXT_STEPS_PLACEHOLDER);
    md.push('\n');

    md
}

fn append_file_list(md: &mut String, files: &BTreeSet<String>, limit: Option<usize>) {
    if files.is_empty() {
        md.push_str("- None\n");
        return;
    }
    let limit = limit.unwrap_or(files.len());
    for path in files.iter().take(limit) {
        md.push_str(&format!("- `{path}`\n"));
    }
    if files.len() > limit {
        md.push_str(&format!("- ... and {} more\n", files.len() - limit));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{assistant, file_tool, record_with, user};
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 3, 14, 9, 26, 53)
            .single()
            .expect("unambiguous local time")
    }

    fn section<'a>(md: &'a str, heading: &str) -> &'a str {
        let start = md.find(heading).expect("heading present") + heading.len();
        let rest = &md[start..];
        match rest.find("\n## ") {
            Some(end) => &rest[..end],
            None => rest,
        }
    }

    #[test]
    fn error_document_is_one_line_after_title() {
        assert_eq!(
            render_error("Transcript not found: /x.jsonl"),
            "# Session Summary\n\nError: Transcript not found: /x.jsonl"
        );
    }

    #[test]
    fn empty_record_renders_defaults() {
        let md = render_summary(&SessionRecord::default(), None, &fixed_now());

        assert!(md.starts_with("# Chat Summary\n**Date**: 2026-03-14 09:26:53\n"));
        assert!(md.contains("**Session ID**: unknown\n"));
        assert!(md.contains("- **User messages**: 0\n"));
        assert!(md.contains("- **Assistant responses**: 0\n"));
        assert!(md.contains("- **Tools used**: None\n"));
        assert!(md.contains("## Key Topics Discussed\n- General conversation\n"));
        assert_eq!(section(&md, "## Files Modified\n"), "- None\n");
        assert_eq!(section(&md, "## Files Read\n"), "- None\n");
        assert!(md.ends_with(
            "## Next Steps / Open Items\n_Update this section with any pending tasks or decisions._\n"
        ));
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let md = render_summary(&SessionRecord::default(), Some("abc"), &fixed_now());
        let order = [
            "# Chat Summary",
            "## Overview",
            "## Key Topics Discussed",
            "## Files Modified",
            "## Files Read",
            "## Recent User Requests",
            "## Next Steps / Open Items",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|h| md.find(h).expect("heading present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(md.contains("**Session ID**: abc\n"));
    }

    #[test]
    fn modified_files_are_sorted_and_deduplicated() {
        let mut record = SessionRecord::default();
        for path in ["/z.rs", "/a.rs", "/m.rs", "/a.rs"] {
            record.push_tool_call(file_tool("Edit", path));
        }
        let md = render_summary(&record, None, &fixed_now());
        assert_eq!(
            section(&md, "## Files Modified\n"),
            "- `/a.rs`\n- `/m.rs`\n- `/z.rs`\n"
        );
        assert!(md.contains("- **Tools used**: Edit\n"));
    }

    #[test]
    fn read_files_are_capped_with_remainder() {
        let mut record = SessionRecord::default();
        for i in 0..23 {
            record.push_tool_call(file_tool("Read", &format!("/src/f{i:02}.rs")));
        }
        let md = render_summary(&record, None, &fixed_now());
        let read = section(&md, "## Files Read\n");
        let bullets: Vec<&str> = read.lines().filter(|l| l.starts_with("- ")).collect();

        assert_eq!(bullets.len(), MAX_FILES_READ + 1);
        assert_eq!(bullets[0], "- `/src/f00.rs`");
        assert_eq!(bullets[MAX_FILES_READ - 1], "- `/src/f19.rs`");
        assert_eq!(bullets[MAX_FILES_READ], "- ... and 3 more");
    }

    #[test]
    fn recent_requests_render_as_blockquotes() {
        let messages: Vec<_> = (1..=6)
            .flat_map(|i| [user(&format!("request number {i}")), assistant("ok")])
            .collect();
        let md = render_summary(&record_with(messages, &[]), None, &fixed_now());
        let recent = section(&md, "## Recent User Requests\n");

        assert!(!recent.contains("request number 1\n"));
        assert_eq!(
            recent,
            "> request number 2\n\n> request number 3\n\n> request number 4\n\n\
             > request number 5\n\n> request number 6\n\n"
        );
    }

    #[test]
    fn topics_are_listed_as_bullets() {
        let record = record_with(vec![user("please fix the login bug")], &[]);
        let md = render_summary(&record, None, &fixed_now());
        assert!(md.contains("## Key Topics Discussed\n- please fix the login bug\n"));
    }
}
