#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use todo_client::mcp_client::SpawnOptions;
use todo_client::{ClientError, RemoteTodos, TodoBoard, TodoService, bin_detect, render};
use todo_core::ids::TodoId;
use todo_core::{NewTodo, Title, TodoPatch};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(name = "todo", version, about = "Command line front end for a todo_mcp server")]
struct Cli {
    /// Path to the todo_mcp binary. Defaults to a sibling of this executable, then PATH.
    #[arg(long, env = "TODO_MCP_BIN")]
    server_bin: Option<PathBuf>,

    /// Storage directory handed to the server.
    #[arg(long, env = "TODO_STORAGE_DIR")]
    storage_dir: Option<PathBuf>,

    /// Log filter directive for this process and the server.
    #[arg(long, env = "TODO_LOG", default_value = "info")]
    log: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the board (default).
    List {
        #[arg(long, conflicts_with = "completed")]
        pending: bool,
        #[arg(long)]
        completed: bool,
    },
    /// Create a todo.
    Add {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Change fields of a todo. Unset flags leave fields alone.
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long, conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long)]
        clear_description: bool,
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Flip the completed flag.
    Toggle { id: i64 },
    /// Delete a todo permanently.
    Rm { id: i64 },
    /// Print one todo in full.
    Show { id: i64 },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("invalid title: {0}")]
    Title(#[from] todo_core::TitleError),
    #[error("invalid id: {0}")]
    Id(#[from] todo_core::ids::TodoIdError),
}

fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false))
        .try_init();
}

fn edit_patch(
    title: Option<String>,
    description: Option<String>,
    clear_description: bool,
    completed: Option<bool>,
) -> Result<TodoPatch, CliError> {
    let mut patch = TodoPatch::default();
    if let Some(title) = title {
        patch = patch.title(Title::try_new(title)?);
    }
    if clear_description {
        patch = patch.description(None);
    } else if let Some(description) = description {
        patch = patch.description(Some(description));
    }
    if let Some(completed) = completed {
        patch = patch.completed(completed);
    }
    Ok(patch)
}

fn print_board(board: &TodoBoard, pending: bool, completed: bool) {
    let todos: Vec<_> = if pending {
        board.pending().collect()
    } else if completed {
        board.completed().collect()
    } else {
        board.todos().iter().collect()
    };
    for todo in todos {
        println!("{}", render::todo_line(todo));
    }
    println!("{}", render::stats_line(&board.stats()));
}

fn run<S: TodoService>(service: &mut S, command: Command) -> Result<(), CliError> {
    let mut board = TodoBoard::new();
    board.load(service)?;

    match command {
        Command::List { pending, completed } => print_board(&board, pending, completed),
        Command::Add { title, description } => {
            let mut draft = NewTodo::new(Title::try_new(title)?);
            draft.description = description;
            let todo = board.create(service, &draft)?;
            println!("{}", render::todo_line(&todo));
        }
        Command::Edit {
            id,
            title,
            description,
            clear_description,
            completed,
        } => {
            let patch = edit_patch(title, description, clear_description, completed)?;
            let todo = board.update(service, TodoId::try_new(id)?, &patch)?;
            println!("{}", render::todo_line(&todo));
        }
        Command::Toggle { id } => {
            let todo = board.toggle(service, TodoId::try_new(id)?)?;
            println!("{}", render::todo_line(&todo));
        }
        Command::Rm { id } => {
            let id = TodoId::try_new(id)?;
            if board.delete(service, id)? {
                println!("deleted #{id}");
            } else {
                println!("#{id} was already gone");
            }
        }
        Command::Show { id } => {
            let todo = service.get(TodoId::try_new(id)?)?;
            println!("{}", render::todo_detail(&todo));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log);

    let server_bin = bin_detect::resolve_server_bin(cli.server_bin);
    let options = SpawnOptions {
        storage_dir: cli.storage_dir.as_deref(),
        log: Some(cli.log.as_str()),
    };
    let command = cli.command.unwrap_or(Command::List {
        pending: false,
        completed: false,
    });

    let result = RemoteTodos::connect(&server_bin, options)
        .map_err(CliError::from)
        .and_then(|mut service| run(&mut service, command));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("todo: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn edit_flags_map_to_patch_presence() {
        let patch = edit_patch(None, None, true, None).unwrap();
        assert_eq!(patch.description, Some(None));
        assert!(patch.title.is_none());

        let patch = edit_patch(Some("New".into()), Some("d".into()), false, Some(true)).unwrap();
        assert_eq!(patch.description, Some(Some("d".to_string())));
        assert_eq!(patch.completed, Some(true));

        assert!(edit_patch(None, None, false, None).unwrap().is_empty());
        assert!(matches!(
            edit_patch(Some(String::new()), None, false, None),
            Err(CliError::Title(_))
        ));
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["todo", "edit", "3", "--clear-description"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Edit {
                id: 3,
                clear_description: true,
                ..
            })
        ));
        assert!(Cli::try_parse_from(["todo", "list", "--pending", "--completed"]).is_err());
    }
}
