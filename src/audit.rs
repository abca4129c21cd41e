use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::doc::{Finding, SourceFile};
use crate::scan::find_java_files;

#[derive(Debug, Clone, Copy, Default)]
pub struct AuditOptions {
    /// Check files on the rayon pool. Output order is unchanged.
    pub parallel: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub findings: Vec<Finding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty() && self.error.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub root: String,
    pub files_scanned: usize,
    pub files_with_findings: usize,
    pub total_findings: usize,
    pub unreadable_files: usize,
    pub duration_ms: u64,
    /// Only files with findings or read errors, in discovery order.
    pub files: Vec<FileReport>,
}

impl ScanReport {
    pub fn has_problems(&self) -> bool {
        self.total_findings > 0 || self.unreadable_files > 0
    }
}

/// Reads and checks one file. A read failure is captured in the report
/// instead of being returned.
pub fn audit_file(path: &Path) -> FileReport {
    let path_display = path.to_string_lossy().to_string();

    match SourceFile::read(path) {
        Ok(source) => {
            let scan = source.scan();
            if scan.unterminated_comment {
                debug!(
                    path = %path_display,
                    last_comment_end = ?scan.last_comment_end,
                    "file ends inside an unclosed doc comment"
                );
            }
            FileReport {
                path: path_display,
                findings: scan.findings,
                error: None,
            }
        }
        Err(err) => {
            warn!(path = %path_display, error = %format!("{err:#}"), "skipping unreadable file");
            FileReport {
                path: path_display,
                findings: Vec::new(),
                error: Some(format!("{err:#}")),
            }
        }
    }
}

pub fn audit_files(files: &[PathBuf], options: &AuditOptions) -> Vec<FileReport> {
    if options.parallel {
        files.par_iter().map(|p| audit_file(p)).collect()
    } else {
        files.iter().map(|p| audit_file(p)).collect()
    }
}

pub fn run(root: &Path, options: &AuditOptions) -> ScanReport {
    let start = Instant::now();
    let files = find_java_files(root);
    debug!(root = %root.display(), files = files.len(), "discovered java sources");

    let reports = audit_files(&files, options);
    let report = summarize(root, files.len(), reports, start);

    info!(
        root = %report.root,
        files_scanned = report.files_scanned,
        files_with_findings = report.files_with_findings,
        total_findings = report.total_findings,
        unreadable_files = report.unreadable_files,
        duration_ms = report.duration_ms,
        "scan finished"
    );

    report
}

fn summarize(
    root: &Path,
    files_scanned: usize,
    reports: Vec<FileReport>,
    start: Instant,
) -> ScanReport {
    let files: Vec<FileReport> = reports.into_iter().filter(|r| !r.is_clean()).collect();
    let total_findings = files.iter().map(|r| r.findings.len()).sum();
    let files_with_findings = files.iter().filter(|r| !r.findings.is_empty()).count();
    let unreadable_files = files.iter().filter(|r| r.error.is_some()).count();

    ScanReport {
        root: root.to_string_lossy().to_string(),
        files_scanned,
        files_with_findings,
        total_findings,
        unreadable_files,
        duration_ms: start.elapsed().as_millis() as u64,
        files,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::FindingKind;
    use std::fs;

    fn temp_dir(prefix: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!(
            "{prefix}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        p
    }

    fn write_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn run_reports_only_files_with_findings() {
        let base = temp_dir("javadoc-scan-audit");
        write_file(
            &base.join("org/example/Documented.java"),
            "package org.example;\n\n/**\n * Documented.\n */\npublic class Documented {\n}\n",
        );
        write_file(
            &base.join("org/example/Bare.java"),
            "package org.example;\n\npublic class Bare {\n    public void go() {\n    }\n}\n",
        );
        write_file(&base.join("org/example/notes.txt"), "public class Nope {\n");

        let report = run(&base, &AuditOptions::default());
        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.files_with_findings, 1);
        assert_eq!(report.total_findings, 2);
        assert_eq!(report.unreadable_files, 0);
        assert!(report.files[0].path.ends_with("Bare.java"));
        let kinds: Vec<FindingKind> = report.files[0].findings.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, vec![FindingKind::Class, FindingKind::Method]);

        let _ = fs::remove_dir_all(base);
    }

    #[test]
    fn latin1_file_is_still_checked() {
        let base = temp_dir("javadoc-scan-latin1");
        fs::create_dir_all(&base).unwrap();
        let path = base.join("A.java");
        fs::write(
            &path,
            b"/** Caf\xe9 helper. */\npublic class A {\n    public void go() {\n    }\n}\n",
        )
        .unwrap();

        let report = audit_file(&path);
        assert!(report.error.is_none());
        assert_eq!(
            report.findings,
            vec![Finding {
                kind: FindingKind::Method,
                line: 3,
                text: "public void go() {".to_string(),
            }]
        );

        let _ = fs::remove_dir_all(base);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_is_reported_and_scan_continues() {
        let base = temp_dir("javadoc-scan-unreadable");
        fs::create_dir_all(&base).unwrap();
        std::os::unix::fs::symlink(base.join("missing-target"), base.join("A.java")).unwrap();
        write_file(&base.join("B.java"), "public class B {\n}\n");

        let report = run(&base, &AuditOptions::default());
        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.unreadable_files, 1);
        assert_eq!(report.total_findings, 1);
        assert!(report.has_problems());

        let bad = report
            .files
            .iter()
            .find(|f| f.path.ends_with("A.java"))
            .unwrap();
        assert!(bad.findings.is_empty());
        assert!(bad.error.as_deref().unwrap().contains("Failed to read source file"));

        let _ = fs::remove_dir_all(base);
    }

    #[test]
    fn parallel_run_matches_sequential_run() {
        let base = temp_dir("javadoc-scan-parallel");
        for i in 0..12 {
            write_file(
                &base.join(format!("pkg{}/Type{i}.java", i % 3)),
                &format!("public class Type{i} {{\n    public int value() {{\n        return {i};\n    }}\n}}\n"),
            );
        }

        let sequential = run(&base, &AuditOptions { parallel: false });
        let parallel = run(&base, &AuditOptions { parallel: true });
        let paths = |r: &ScanReport| r.files.iter().map(|f| f.path.clone()).collect::<Vec<_>>();
        assert_eq!(paths(&sequential), paths(&parallel));
        assert_eq!(sequential.total_findings, 24);
        assert_eq!(parallel.total_findings, 24);

        let _ = fs::remove_dir_all(base);
    }

    #[test]
    fn missing_root_yields_empty_report() {
        let report = run(&temp_dir("javadoc-scan-nowhere"), &AuditOptions::default());
        assert_eq!(report.files_scanned, 0);
        assert!(report.files.is_empty());
        assert!(!report.has_problems());
    }
}
