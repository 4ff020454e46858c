//! kb CLI
//!
//! Command-line interface for kb - a personal knowledge base kept in
//! per-category YAML files.

use std::fs::OpenOptions;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use kb_core::{
    Config, Filter, Library, ReadingListItem, ShoppingListItem, StorageError, Store, Tool,
};

mod cli;
mod commands;
mod output;
mod prompt;

use cli::{
    Cli, Commands, ConfigCommands, LibraryCommands, LinkCommands, ReadingCommands,
    ShoppingCommands, ToolCommands,
};
use output::{Output, OutputFormat};
use prompt::{stdin_prompter, FieldResolver};

fn main() -> ExitCode {
    let args = cli::normalize_args(&Cli::command(), std::env::args_os());
    let cli = Cli::parse_from(args);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            let hint = e
                .chain()
                .find_map(|cause| cause.downcast_ref::<StorageError>())
                .and_then(StorageError::recovery_suggestion);
            if let Some(hint) = hint {
                eprintln!("Hint: {}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands work on the file itself, not the store
    if let Commands::Config { command } = &cli.command {
        init_logging(cli.verbose, None);
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let mut config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    init_logging(cli.verbose, config.log_file.as_deref());
    debug!("Using data directory {:?}", config.data_dir);

    let store = Store::from_config(&config);

    match cli.command {
        Commands::Links { command } => handle_link_command(command, &store, &output),
        Commands::Reading { command } => handle_reading_command(command, &store, &output),
        Commands::Shopping { command } => handle_shopping_command(command, &store, &output),
        Commands::Tools { command } => handle_tool_command(command, &store, &output),
        Commands::Libraries { command } => handle_library_command(command, &store, &output),
        Commands::Status { category } => commands::status::show(&store, category, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_link_command(command: LinkCommands, store: &Store, output: &Output) -> Result<()> {
    match command {
        LinkCommands::New(args) => {
            let link = with_fields(args.interactive, |fields| args.into_record(fields))?;
            commands::record::create(store, link, output)
        }
        LinkCommands::Search { tag } => {
            commands::record::search(store, commands::record::link_filter(tag), output)
        }
    }
}

fn handle_reading_command(command: ReadingCommands, store: &Store, output: &Output) -> Result<()> {
    match command {
        ReadingCommands::New(args) => {
            let item = with_fields(args.interactive, |fields| args.into_record(fields))?;
            commands::record::create(store, item, output)
        }
        ReadingCommands::Search => {
            commands::record::search(store, Filter::<ReadingListItem>::new(), output)
        }
    }
}

fn handle_shopping_command(
    command: ShoppingCommands,
    store: &Store,
    output: &Output,
) -> Result<()> {
    match command {
        ShoppingCommands::New(args) => {
            commands::record::create(store, ShoppingListItem::from(args), output)
        }
        ShoppingCommands::Search => {
            commands::record::search(store, Filter::<ShoppingListItem>::new(), output)
        }
    }
}

fn handle_tool_command(command: ToolCommands, store: &Store, output: &Output) -> Result<()> {
    match command {
        ToolCommands::New(args) => commands::record::create(store, Tool::from(args), output),
        ToolCommands::Search => commands::record::search(store, Filter::<Tool>::new(), output),
    }
}

fn handle_library_command(command: LibraryCommands, store: &Store, output: &Output) -> Result<()> {
    match command {
        LibraryCommands::New(args) => commands::record::create(store, Library::from(args), output),
        LibraryCommands::Search => {
            commands::record::search(store, Filter::<Library>::new(), output)
        }
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&std::path::PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Build a record from flags, prompting on stdin for the rest with `-i`
fn with_fields<T>(
    interactive: bool,
    build: impl FnOnce(&mut FieldResolver<'_>) -> Result<T>,
) -> Result<T> {
    if interactive {
        let mut prompter = stdin_prompter();
        build(&mut FieldResolver::interactive(&mut prompter))
    } else {
        build(&mut FieldResolver::flags_only())
    }
}

/// Initialize tracing to stderr, or to the configured log file
///
/// `KB_LOG` takes a full filter directive and overrides `-v`.
fn init_logging(verbose: u8, log_file: Option<&Path>) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter = EnvFilter::try_from_env("KB_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("kb_core={0},kb={0}", level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);

    if let Some(path) = log_file {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                // Ignore error if already initialized
                let _ = builder
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init();
                return;
            }
            Err(e) => eprintln!("Warning: Could not open log file {:?}: {}", path, e),
        }
    }

    let _ = builder.with_writer(std::io::stderr).try_init();
}
