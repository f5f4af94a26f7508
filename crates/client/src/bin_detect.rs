#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

pub const SERVER_BIN_NAME: &str = "todo_mcp";

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && (m.permissions().mode() & 0o111 != 0))
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_file())
        .unwrap_or(false)
}

fn server_file_name() -> String {
    format!("{SERVER_BIN_NAME}{}", std::env::consts::EXE_SUFFIX)
}

pub fn find_executable_in_dirs(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    if name.trim().is_empty() {
        return None;
    }
    dirs.iter()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

/// Explicit path first, then a `todo_mcp` next to the running executable, then `PATH`.
/// Falls back to the bare name so the spawn error names what was looked for.
pub fn resolve_server_bin(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return path;
    }
    let name = server_file_name();

    let sibling_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    if let Some(found) = sibling_dir.and_then(|dir| find_executable_in_dirs(&name, &[dir])) {
        return found;
    }

    let path_dirs = std::env::var_os("PATH")
        .map(|v| std::env::split_paths(&v).collect::<Vec<_>>())
        .unwrap_or_default();
    find_executable_in_dirs(&name, &path_dirs).unwrap_or_else(|| PathBuf::from(name))
}
