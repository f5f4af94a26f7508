#![forbid(unsafe_code)]

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "todo_mcp", version)]
#[command(about = "Todo store served as MCP tools over stdio (newline JSON or Content-Length framing)")]
pub(crate) struct Config {
    /// Directory holding the SQLite database.
    #[arg(long, env = "TODO_STORAGE_DIR", default_value = ".todo_store")]
    pub(crate) storage_dir: PathBuf,

    /// Log filter directive (tracing EnvFilter syntax). Logs are written to stderr.
    #[arg(long, env = "TODO_LOG", default_value = "info")]
    pub(crate) log: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let config =
            Config::try_parse_from(["todo_mcp", "--storage-dir", "/tmp/todos", "--log", "debug"])
                .unwrap();
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/todos"));
        assert_eq!(config.log, "debug");
    }
}
