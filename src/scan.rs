use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const JAVA_SUFFIX: &str = ".java";

/// Recursively collects every file under `root` whose name ends with `.java`.
///
/// Unreadable entries (including a missing root) are skipped, so the result is
/// simply empty when nothing can be walked. A root that is not a directory
/// yields nothing, even if it is itself a `.java` file.
pub fn find_java_files(root: &Path) -> Vec<PathBuf> {
    if !root.is_dir() {
        debug!(root = %root.display(), "root is not a directory, nothing to scan");
        return Vec::new();
    }

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .ignore(false)
        .parents(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(root = %root.display(), error = %err, "skipping unwalkable entry");
                continue;
            }
        };

        if entry.file_type().is_some_and(|t| t.is_dir()) {
            continue;
        }

        if is_java_source(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files
}

pub fn is_java_source(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(JAVA_SUFFIX))
}
