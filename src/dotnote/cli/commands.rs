//! # CLI Layer
//!
//! One possible UI client for dotnote. This is the only place that parses
//! shell arguments, writes to the terminal, and persists the selection cache
//! between invocations so `dotnote find x` followed by `dotnote open /2`
//! works.
//!
//! - `run()`: parse, set up logging, build the context, dispatch
//! - `handle_*()`: call the API and render the `CmdResult`

use super::render::{print_config, print_messages, print_paths, print_types};
use super::setup::{
    print_grouped_help, print_help_for_command, print_subcommand_help, Cli, Commands, ConfigArgs,
    CreateArgs, DeleteArgs, FindArgs, RenameArgs, SearchArgs, TargetArgs,
};
use super::terminal::ConsolePrompter;
use clap::Parser;
use dotnote::commands::config::ConfigAction;
use dotnote::commands::CmdResult;
use dotnote::error::{NoteError, Result};
use dotnote::init::{initialize, NotesContext};
use std::env;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "DOTNOTE_LOG";

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.help {
        print_subcommand_help(&cli.command);
        return Ok(());
    }

    let command = match cli.command {
        None => {
            print_grouped_help();
            return Ok(());
        }
        Some(Commands::Help { command }) => {
            match command {
                Some(name) => print_help_for_command(&name),
                None => print_grouped_help(),
            }
            return Ok(());
        }
        Some(command) => command,
    };

    let cwd = env::current_dir().map_err(NoteError::Io)?;
    let mut ctx = initialize(&cwd, Box::new(ConsolePrompter::new()))?;
    debug!(command = command.name(), "dispatching");

    let outcome = match command {
        Commands::Find(args) => handle_find(&mut ctx, args),
        Commands::Create(args) => handle_create(&mut ctx, args),
        Commands::Open(args) => handle_open(&mut ctx, args),
        Commands::Search(args) => handle_search(&mut ctx, args),
        Commands::Path(args) => handle_path(&mut ctx, args),
        Commands::Delete(args) => handle_delete(&mut ctx, args),
        Commands::Rename(args) => handle_rename(&mut ctx, args),
        Commands::Types => handle_types(&ctx),
        Commands::Config(args) => handle_config(&ctx, args),
        Commands::Help { .. } => Ok(()),
    };

    ctx.api.cache().save(&ctx.paths.home)?;
    outcome
}

fn finish(result: CmdResult) -> Result<()> {
    print_paths(&result.note_paths);
    print_messages(&result.messages);
    Ok(())
}

fn handle_find(ctx: &mut NotesContext, args: FindArgs) -> Result<()> {
    let pattern = args.pattern.unwrap_or_default();
    let result = ctx.api.find(
        &pattern,
        args.filter.note_type.as_deref(),
        args.filter.sort_by.as_deref(),
        args.reverse,
    )?;
    finish(result)
}

fn handle_create(ctx: &mut NotesContext, args: CreateArgs) -> Result<()> {
    let result = ctx
        .api
        .create(&args.name, args.note_type.as_deref(), !args.no_editor)?;
    finish(result)
}

fn handle_open(ctx: &mut NotesContext, args: TargetArgs) -> Result<()> {
    let result = ctx.api.open(
        &args.target,
        args.filter.note_type.as_deref(),
        args.filter.sort_by.as_deref(),
    )?;
    finish(result)
}

fn handle_search(ctx: &mut NotesContext, args: SearchArgs) -> Result<()> {
    let result = ctx.api.search(&args.query.unwrap_or_default())?;
    finish(result)
}

fn handle_path(ctx: &mut NotesContext, args: TargetArgs) -> Result<()> {
    let result = ctx.api.path(
        &args.target,
        args.filter.note_type.as_deref(),
        args.filter.sort_by.as_deref(),
    )?;
    finish(result)
}

fn handle_delete(ctx: &mut NotesContext, args: DeleteArgs) -> Result<()> {
    let result = ctx.api.delete(
        &args.target.target,
        args.target.filter.note_type.as_deref(),
        args.target.filter.sort_by.as_deref(),
        args.yes,
    )?;
    finish(result)
}

fn handle_rename(ctx: &mut NotesContext, args: RenameArgs) -> Result<()> {
    let result = ctx
        .api
        .rename(&args.current, &args.new_name, args.note_type.as_deref())?;
    finish(result)
}

fn handle_types(ctx: &NotesContext) -> Result<()> {
    let result = ctx.api.types()?;
    print_types(&result.note_types);
    finish(result)
}

fn handle_config(ctx: &NotesContext, args: ConfigArgs) -> Result<()> {
    let action = match (args.key, args.value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    finish(result)
}
