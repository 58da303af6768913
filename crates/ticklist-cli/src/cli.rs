use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
use ticklist_core::TaskFilter;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct PreprocessedArgs {
    pub cleaned_args: Vec<OsString>,
    pub rc_overrides: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))?;
        Ok(Self {
            key: k.trim().to_string(),
            value: v.trim().to_string(),
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "ticklist",
    version,
    about = "Ticklist: terminal client for the to-do list server",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(
        long = "rc",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append
    )]
    pub rc_overrides: Vec<KeyVal>,

    #[arg(long = "ticklistrc")]
    pub ticklistrc: Option<PathBuf>,

    /// Base URL of the task server; overrides `server.url`.
    #[arg(long = "server")]
    pub server: Option<String>,

    /// Answer yes to every confirmation prompt.
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// `TASK` arguments are a 1-based list position or a unique uuid prefix.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the task list (default command).
    List {
        #[arg(long)]
        filter: Option<TaskFilter>,
    },
    /// Show totals, completion rate and tasks created today.
    Stats,
    Add {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Rename a task.
    Edit {
        task: String,
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    Done { task: String },
    Undone { task: String },
    Toggle { task: String },
    Delete { task: String },
    Up { task: String },
    Down { task: String },
    /// Persist a new order; unlisted tasks keep their order after the listed ones.
    Reorder {
        #[arg(required = true, num_args = 1..)]
        tasks: Vec<String>,
    },
    ClearCompleted,
    /// Write the task list to `todo-export-YYYY-MM-DD.json`.
    Export {
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Replace every task with the contents of an export file.
    Import { file: PathBuf },
    /// Ask the server to shut down.
    Exit,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::List { .. } => "list",
            Command::Stats => "stats",
            Command::Add { .. } => "add",
            Command::Edit { .. } => "edit",
            Command::Done { .. } => "done",
            Command::Undone { .. } => "undone",
            Command::Toggle { .. } => "toggle",
            Command::Delete { .. } => "delete",
            Command::Up { .. } => "up",
            Command::Down { .. } => "down",
            Command::Reorder { .. } => "reorder",
            Command::ClearCompleted => "clear-completed",
            Command::Export { .. } => "export",
            Command::Import { .. } => "import",
            Command::Exit => "exit",
        }
    }
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

/// Pulls positional `rc.KEY=VALUE` / `rc.KEY:VALUE` overrides out of the
/// argument list before clap sees it.
#[tracing::instrument(skip_all)]
pub fn preprocess_args(raw: &[OsString]) -> PreprocessedArgs {
    let mut cleaned = Vec::with_capacity(raw.len());
    let mut overrides: Vec<(String, String)> = Vec::new();

    let mut iter = raw.iter().cloned();
    if let Some(bin) = iter.next() {
        cleaned.push(bin);
    }

    for arg in iter {
        let s = arg.to_string_lossy();
        if let Some(rest) = s.strip_prefix("rc.") {
            let parsed = rest
                .split_once('=')
                .or_else(|| rest.split_once(':'))
                .map(|(k, v)| (format!("rc.{k}"), v.to_string()));

            if let Some((k, v)) = parsed {
                debug!(key = %k, value = %v, "captured positional rc override");
                overrides.push((k, v));
                continue;
            }
        }

        cleaned.push(arg);
    }

    PreprocessedArgs {
        cleaned_args: cleaned,
        rc_overrides: overrides,
    }
}
