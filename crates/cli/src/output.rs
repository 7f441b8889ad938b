use anyhow::Result;
use session_memory_core::SavedSummary;
use std::io::Write;

/// The single JSON object written to stdout for the hook runner.
#[derive(Debug, serde::Serialize)]
pub struct SaveReport {
    pub status: &'static str,
    pub summary_path: String,
    pub latest_path: String,
}

impl SaveReport {
    pub fn success(saved: &SavedSummary) -> Self {
        Self {
            status: "success",
            summary_path: saved.summary_path.to_string_lossy().into_owned(),
            latest_path: saved.latest_path.to_string_lossy().into_owned(),
        }
    }
}

pub fn print_report(saved: &SavedSummary) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    write_report(saved, &mut stdout)
}

pub fn write_report(saved: &SavedSummary, writer: &mut dyn Write) -> Result<()> {
    let json = serde_json::to_string(&SaveReport::success(saved))?;
    writeln!(writer, "{json}")?;
    Ok(())
}
