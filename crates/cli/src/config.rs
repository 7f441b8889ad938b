use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable naming the project root.
pub const PROJECT_DIR_ENV: &str = "CLAUDE_PROJECT_DIR";

/// Default location of the memory directory below the project root.
pub const MEMORY_SUBDIR: &str = ".claude/memory";

/// Where summaries are written. Resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
}

impl OutputConfig {
    pub fn resolve(flag: Option<PathBuf>) -> Result<Self> {
        if let Some(output_dir) = flag {
            return Ok(Self { output_dir });
        }
        let project_dir = std::env::var_os(PROJECT_DIR_ENV).map(PathBuf::from);
        let cwd = std::env::current_dir().context("Could not determine current directory")?;
        Ok(Self {
            output_dir: resolve_output_dir(None, project_dir, &cwd),
        })
    }
}

/// `--output-dir` wins outright; otherwise the memory subdir of the project
/// root, or of `cwd` when no (non-empty) project root is set.
pub fn resolve_output_dir(
    flag: Option<PathBuf>,
    project_dir: Option<PathBuf>,
    cwd: &Path,
) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }
    let root = project_dir
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| cwd.to_path_buf());
    root.join(MEMORY_SUBDIR)
}
