use std::env;
use std::path::{Path, PathBuf};

pub const ROOT_ENV: &str = "JAVADOC_SCAN_ROOT";
pub const DEFAULT_ROOT: &str = "src/main/java";

/// Picks the scan root: explicit argument, then `$JAVADOC_SCAN_ROOT`, then
/// the conventional Maven/Gradle source directory.
pub fn resolve_root(arg: Option<&Path>) -> PathBuf {
    resolve_root_from(arg, env::var(ROOT_ENV).ok())
}

pub fn resolve_root_from(arg: Option<&Path>, env_value: Option<String>) -> PathBuf {
    if let Some(p) = arg {
        return p.to_path_buf();
    }

    if let Some(p) = env_value.filter(|v| !v.trim().is_empty()) {
        return PathBuf::from(p);
    }

    PathBuf::from(DEFAULT_ROOT)
}
