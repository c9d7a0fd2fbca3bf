//! CLI entry point.
//!
//! # Responsibility
//! - Probe `assistant_core` linkage (ping/version).
//! - Drive one scripted session through two request cycles against the
//!   configured store and print the display-ordered result.
//!
//! Usage: `assistant_cli [--config <path>]`

use assistant_core::db::open_db;
use assistant_core::{
    core_version, init_logging, ping, AssistantConfig, AssistantService, IdAllocator,
    MemorySessionStore, ServiceResult, SessionStore, SqliteSessionStore, StoreKind,
};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Runs one scripted assistant session against the configured store.
#[derive(Debug, Parser)]
#[command(name = "assistant_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// TOML config file; `ASSISTANT_*` environment variables still apply.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    println!("assistant_core ping={}", ping());
    println!("assistant_core version={}", core_version());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = AssistantConfig::load(cli.config.as_deref()).map_err(|err| err.to_string())?;
    init_logging(&config.log).map_err(|err| err.to_string())?;

    let ids = Arc::new(IdAllocator::new());
    let outcome = match config.session.store {
        StoreKind::Memory => {
            let store = MemorySessionStore::new(config.session_max_age());
            demo(AssistantService::with_parts(store, ids, config.validation_limits()))
        }
        StoreKind::Sqlite => {
            let conn = open_db(&config.session.db_path).map_err(|err| err.to_string())?;
            let store = SqliteSessionStore::with_max_age(&conn, config.session_max_age())
                .map_err(|err| err.to_string())?;
            demo(AssistantService::with_parts(store, ids, config.validation_limits()))
        }
    };
    outcome.map_err(|err| err.to_string())
}

fn demo<S: SessionStore>(service: AssistantService<S>) -> ServiceResult<()> {
    let session_id = service.new_session_id();

    service.with_workspace(session_id, |workspace| {
        let groceries = workspace.create_todo_list("Groceries")?;
        workspace.add_todo(groceries, "Buy milk")?;
        let apples = workspace.add_todo(groceries, "apples")?;
        workspace.add_todo(groceries, "Call Bob")?;
        workspace.toggle_todo(groceries, apples)?;

        let errands = workspace.create_todo_list("errands")?;
        workspace.add_todo(errands, "Post office")?;
        workspace.complete_all(errands)?;

        workspace.create_contact("Mike", "Jones", "281-330-8004")?;
        workspace.create_contact("Jenny", "Keys", "768-867-5309")?;
        workspace.create_contact("Alicia", "Keys", "515-489-4608")?;
        Ok(())
    })?;

    let workspace = service.begin(session_id)?;
    println!("session={session_id}");
    for list in workspace.todo_lists_in_display_order() {
        let marker = if list.is_done() { "x" } else { " " };
        println!("[{marker}] {} ({} todos)", list.title(), list.len());
        for todo in workspace.todos_in_display_order(list.id())? {
            let marker = if todo.is_done() { "x" } else { " " };
            println!("    [{marker}] {}", todo.title());
        }
    }
    for contact in workspace.contacts_in_display_order() {
        println!(
            "{}, {} {}",
            contact.last_name(),
            contact.first_name(),
            contact.phone_number()
        );
    }

    service.end_session(session_id)?;
    Ok(())
}
