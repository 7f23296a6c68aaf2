//! Command-line front end for the memo store.
//!
//! # Responsibility
//! - Render the view model's current list and forward user intents.
//! - Own the interactive delete confirmation; the core assumes it happened.

use clap::{Parser, Subcommand};
use memopad_core::db::open_db;
use memopad_core::{default_log_level, init_logging, Memo, MemoStore, SqliteMemoRepository};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "memopad", version, about = "Minimal titled-memo manager")]
struct Cli {
    /// Database file backing the memo store.
    #[arg(long, default_value = "memopad.db3")]
    db: PathBuf,

    /// Absolute directory for rolling log files; logging stays off when unset.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List memos newest first, optionally narrowed by a search string.
    List {
        /// Case-insensitive substring matched against title and content.
        #[arg(long)]
        search: Option<String>,
    },
    /// Create a memo. The title must not be blank.
    Add {
        title: String,
        #[arg(default_value = "")]
        content: String,
    },
    /// Replace a memo's title and content.
    Edit {
        id: Uuid,
        title: String,
        content: String,
    },
    /// Delete a memo after a y/N confirmation.
    Rm {
        id: Uuid,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Search memos by case-insensitive substring over title and content.
    Search { query: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = &cli.log_dir {
        init_logging(default_log_level(), &log_dir.to_string_lossy())?;
    }

    let conn = open_db(&cli.db)?;
    let repo = SqliteMemoRepository::try_new(&conn)?;
    let mut store = MemoStore::new(repo);
    store.load()?;

    match cli.command {
        Command::List { search } => {
            render(&store.filtered(search.as_deref().unwrap_or("")));
        }
        Command::Search { query } => {
            render(&store.filtered(&query));
        }
        Command::Add { title, content } => {
            let memo = store.create(&title, &content)?;
            println!("created {}", memo.id);
        }
        Command::Edit { id, title, content } => {
            store.begin_edit(id)?;
            let memo = store.update(id, &title, &content)?;
            println!("updated {}", memo.id);
        }
        Command::Rm { id, yes } => {
            let title = store
                .memos()
                .iter()
                .find(|memo| memo.id == id)
                .map(|memo| memo.title.clone());
            let title = title.ok_or_else(|| format!("no memo with id {id}"))?;

            if !yes && !confirm_delete(&title)? {
                println!("aborted");
                return Ok(());
            }

            store.delete(id)?;
            println!("deleted {id}");
        }
    }

    Ok(())
}

fn confirm_delete(title: &str) -> io::Result<bool> {
    print!("delete memo `{title}`? [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn render(memos: &[&Memo]) {
    if memos.is_empty() {
        println!("(no memos)");
        return;
    }

    for memo in memos {
        println!("{}  {}", memo.id, memo.title);
        for line in memo.content.lines() {
            println!("    {line}");
        }
    }
}
