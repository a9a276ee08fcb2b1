mod app;
mod board;
mod drag;
mod input;
mod ui;
mod view;

use std::env;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::bail;

use board::kv::{find_store_dir, FileKv, StoreError};
use board::store::BoardStore;
use board::{COLUMN_COUNT, COLUMN_NAMES};

#[derive(Parser)]
#[command(name = "karta", about = "A mouse-driven kanban board for the terminal")]
struct Cli {
    /// Board directory (defaults to the nearest .karta/ above the
    /// current directory)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the board to stdout
    Show,
    /// Add a card to a column without opening the board
    Add {
        /// Column number (1-3)
        column: usize,
        /// Card text
        text: String,
    },
}

fn main() {
    // Install color_eyre for unexpected panics/errors (developer bugs).
    let _ = color_eyre::install();
    let cli = Cli::parse();
    let cwd = match env::current_dir() {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: cannot determine current directory: {e}");
            std::process::exit(1);
        }
    };
    let store_dir = cli.dir.unwrap_or_else(|| find_store_dir(&cwd));

    let result = match cli.command {
        Some(Command::Show) => cmd_show(&store_dir),
        Some(Command::Add { column, text }) => cmd_add(&store_dir, column, &text),
        None => cmd_tui(&store_dir),
    };

    if let Err(e) = result {
        print_user_error(&e);
        std::process::exit(1);
    }
}

/// Print a user-friendly error message, with actionable hints for known error types.
fn print_user_error(error: &color_eyre::Report) {
    if let Some(store_err) = error.downcast_ref::<StoreError>() {
        match store_err {
            StoreError::Io(e) => {
                eprintln!("error: could not read or write the board store.");
                eprintln!("  {e}");
            }
            StoreError::Json(e) => {
                eprintln!("error: failed to serialize the board.");
                eprintln!("  {e}");
            }
            StoreError::InvalidKey(key) => {
                eprintln!("error: invalid store key: {key:?}");
                eprintln!("  Keys must match [a-zA-Z0-9_-]+");
            }
        }
        return;
    }

    // For eyre::eyre!() / bail!() messages, print the full error chain.
    eprintln!("error: {e:#}", e = error);
}

fn cmd_show(store_dir: &Path) -> color_eyre::Result<()> {
    let store = BoardStore::new(FileKv::new(store_dir));
    let board = store.load();

    for (idx, name) in COLUMN_NAMES.iter().enumerate() {
        let cards = &board.columns[idx];
        println!("\n{} ({})", name, cards.len());
        println!("{}", "─".repeat(40));
        for text in cards {
            println!("  {text}");
        }
    }
    println!();
    Ok(())
}

fn cmd_add(store_dir: &Path, column: usize, text: &str) -> color_eyre::Result<()> {
    if !(1..=COLUMN_COUNT).contains(&column) {
        bail!("Column must be between 1 and {COLUMN_COUNT}");
    }
    let text = text.trim();
    if text.is_empty() {
        bail!("Card text must not be empty");
    }

    let mut store = BoardStore::new(FileKv::new(store_dir));
    let mut board = store.load();
    board.add_card(column - 1, text);
    store.save(&board)?;
    println!("Added to {}: {}", COLUMN_NAMES[column - 1], text);
    Ok(())
}

fn cmd_tui(store_dir: &Path) -> color_eyre::Result<()> {
    let mut terminal = ratatui::init();
    crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture)?;
    let result = app::run(&mut terminal, store_dir);
    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmd_add_appends_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store_dir = dir.path().join(".karta");
        cmd_add(&store_dir, 2, "Buy milk").unwrap();
        cmd_add(&store_dir, 2, "Walk dog").unwrap();

        let store = BoardStore::new(FileKv::new(&store_dir));
        let board = store.load();
        assert_eq!(board.columns[1], vec!["Buy milk", "Walk dog"]);
    }

    #[test]
    fn cmd_add_rejects_out_of_range_column() {
        let dir = tempfile::tempdir().unwrap();
        let store_dir = dir.path().join(".karta");
        assert!(cmd_add(&store_dir, 0, "x").is_err());
        assert!(cmd_add(&store_dir, 4, "x").is_err());
    }

    #[test]
    fn cmd_add_rejects_blank_text() {
        let dir = tempfile::tempdir().unwrap();
        let store_dir = dir.path().join(".karta");
        assert!(cmd_add(&store_dir, 1, "   ").is_err());
    }

    #[test]
    fn cmd_add_trims_text() {
        let dir = tempfile::tempdir().unwrap();
        let store_dir = dir.path().join(".karta");
        cmd_add(&store_dir, 1, "  spaced  ").unwrap();
        let store = BoardStore::new(FileKv::new(&store_dir));
        assert_eq!(store.load().columns[0], vec!["spaced"]);
    }

    #[test]
    fn cmd_show_on_missing_store_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        assert!(cmd_show(&dir.path().join(".karta")).is_ok());
    }
}
