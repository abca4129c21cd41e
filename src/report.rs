use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

use crate::audit::ScanReport;

/// Renders one `File:` block per reported file. Clean files produce nothing.
pub fn render_text(report: &ScanReport) -> String {
    let mut out = String::new();
    for file in &report.files {
        let _ = writeln!(out, "File: {}", file.path);
        if let Some(err) = &file.error {
            let _ = writeln!(out, "  - Unreadable: {err}");
        }
        for finding in &file.findings {
            let _ = writeln!(out, "  - {finding}");
        }
    }
    out
}

pub fn render_json(report: &ScanReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render_file_list<P: AsRef<Path>>(files: &[P]) -> String {
    let mut out = String::new();
    for file in files {
        let _ = writeln!(out, "{}", file.as_ref().display());
    }
    out
}

pub fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
    } else {
        print!("{content}");
    }

    Ok(())
}
