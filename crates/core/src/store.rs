use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

pub const HISTORY_DIR: &str = "history";
pub const LATEST_FILE: &str = "latest.md";

/// Timestamp part of a history file name.
pub const HISTORY_STAMP_FORMAT: &str = "%Y-%m-%d_%H%M%S";

/// Number of session-id chars appended to a history file name.
const SESSION_SUFFIX_CHARS: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Paths written by [`MemoryStore::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSummary {
    /// Absolute path of the new history file.
    pub summary_path: PathBuf,
    pub latest_path: PathBuf,
}

/// Flat-file store for rendered summaries:
/// `<root>/history/<stamp>[_<id8>].md` plus `<root>/latest.md`.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    root: PathBuf,
}

impl MemoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn history_dir(&self) -> PathBuf {
        self.root.join(HISTORY_DIR)
    }

    pub fn latest_path(&self) -> PathBuf {
        self.root.join(LATEST_FILE)
    }

    /// Write `markdown` to a fresh history file and overwrite `latest.md`.
    ///
    /// Creating the history directory is idempotent. Two saves within the
    /// same second with the same (or no) session id land on the same
    /// history file; the later one wins.
    pub fn save(
        &self,
        markdown: &str,
        session_id: Option<&str>,
        now: &DateTime<Local>,
    ) -> Result<SavedSummary, StoreError> {
        let history_dir = self.history_dir();
        std::fs::create_dir_all(&history_dir).map_err(|source| StoreError::CreateDir {
            path: history_dir.clone(),
            source,
        })?;

        let history_file = history_dir.join(history_file_name(session_id, now));
        write_file(&history_file, markdown)?;
        tracing::info!("wrote summary {}", history_file.display());

        let latest = self.latest_path();
        write_file(&latest, markdown)?;
        tracing::debug!("updated {}", latest.display());

        Ok(SavedSummary {
            summary_path: std::path::absolute(&history_file)?,
            latest_path: latest,
        })
    }
}

/// `YYYY-MM-DD_HHMMSS[_<first 8 chars of id>].md`
pub fn history_file_name(session_id: Option<&str>, now: &DateTime<Local>) -> String {
    let stamp = now.format(HISTORY_STAMP_FORMAT);
    match session_id {
        Some(id) => {
            let short: String = id.chars().take(SESSION_SUFFIX_CHARS).collect();
            format!("{stamp}_{short}.md")
        }
        None => format!("{stamp}.md"),
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), StoreError> {
    std::fs::write(path, contents).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}
