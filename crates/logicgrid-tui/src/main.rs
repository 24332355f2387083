mod app;
mod render;
mod theme;

use app::{App, AppAction};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use logicgrid_core::{build_groups, NormalizeError, RawPuzzle};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Terminal viewer for decoded logic-grid puzzle datasets
#[derive(Parser)]
#[command(name = "logicgrid", version, about)]
struct Args {
    /// Path to the decoded dataset (JSON array of puzzle records)
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Color theme: dark, light, or high-contrast
    #[arg(short, long, default_value = "dark")]
    theme: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let path = args.dataset.clone().unwrap_or_else(default_dataset_path);
    let data = match fs::read_to_string(&path) {
        Ok(data) => data,
        Err(error) => {
            eprintln!("Failed to read {}: {}", path.display(), error);
            return ExitCode::FAILURE;
        }
    };
    let puzzles: Vec<RawPuzzle> = match serde_json::from_str(&data) {
        Ok(puzzles) => puzzles,
        Err(error) => {
            eprintln!("Failed to parse {}: {}", path.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let (groups, skipped) = build_groups(puzzles);
    if groups.is_empty() {
        eprintln!("No displayable puzzles in {}", path.display());
        report_skipped(&skipped);
        return ExitCode::FAILURE;
    }

    let mut app = App::new(groups, &args.theme);
    let result = run_terminal(&mut app);
    report_skipped(&skipped);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}

/// `--dataset` fallback: the per-user data directory, then the working
/// directory.
fn default_dataset_path() -> PathBuf {
    if let Some(dir) = dirs::data_local_dir() {
        let path = dir.join("logicgrid").join("decoded.json");
        if path.exists() {
            return path;
        }
    }
    PathBuf::from("decoded.json")
}

fn report_skipped(skipped: &[NormalizeError]) {
    for error in skipped {
        eprintln!("Skipped malformed record: {}", error);
    }
}

fn run_terminal(app: &mut App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = run_app(&mut stdout, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    result
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    loop {
        render::render(stdout, app)?;
        stdout.flush()?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }
                match app.handle_key(key) {
                    AppAction::Continue => {}
                    AppAction::Quit => break,
                }
            }
            Event::Resize(_, _) => {}
            _ => {}
        }
    }
    Ok(())
}
