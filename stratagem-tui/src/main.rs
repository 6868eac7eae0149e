//! Stratagem trainer: enter stratagem codes by swiping or with arrow keys.
//!
//! Left-drag with the mouse to swipe a direction, or press the arrow keys.
//! A recognised code shows its name and icon; an impossible sequence flashes
//! and clears. `q`, `Esc` or `Ctrl-C` quits.

mod app;
mod audio;
mod canvas;
mod input;
mod logging;
mod theme;
mod ui;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use stratagem_core::{AppConfig, StratagemDictionary};

use crate::app::AppState;
use crate::audio::Bell;

#[derive(Parser)]
#[command(name = "stratagem", about = "Stratagem code trainer for the terminal")]
struct Args {
    /// Config file. Defaults to <config dir>/stratagem/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dictionary JSON, overriding the config file.
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Never ring the terminal bell.
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Everything that can fail on bad input happens before the terminal
    // switches modes, so errors land on a normal screen.
    let mut config = load_config(args.config.as_ref())?;
    if let Some(path) = args.dictionary {
        config.dictionary = path;
    }
    if args.quiet {
        config.audio.bell = false;
    }
    // Runs without a subscriber when the log file cannot be opened.
    if let Err(err) = logging::init(&config.log) {
        eprintln!("warning: logging disabled: {err:#}");
    }
    tracing::info!(dictionary = %config.dictionary.display(), "starting");

    let dictionary = StratagemDictionary::load_file(&config.dictionary).with_context(|| {
        format!(
            "failed to load stratagem dictionary {}",
            config.dictionary.display()
        )
    })?;
    let conflicts = dictionary.prefix_conflicts().len();

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));

    let result = setup_and_run(dictionary, &config, conflicts);

    // Restore terminal
    restore_terminal()?;

    if let Err(err) = &result {
        tracing::error!("{err:#}");
    }
    tracing::info!("exiting");
    result
}

fn load_config(explicit: Option<&PathBuf>) -> Result<AppConfig> {
    match explicit {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => {
            let path = dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("stratagem")
                .join("config.toml");
            AppConfig::load_or_default(&path)
                .with_context(|| format!("failed to load config {}", path.display()))
        }
    }
}

fn setup_and_run(
    dictionary: StratagemDictionary,
    config: &AppConfig,
    conflicts: usize,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Key release events need the kitty keyboard protocol.
    let release_events = matches!(supports_keyboard_enhancement(), Ok(true));
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    tracing::info!(release_events, "terminal ready");

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let bell = Bell::new(io::stdout(), config.audio.bell);
    let mut app = AppState::new(
        Arc::new(dictionary),
        config,
        Box::new(bell),
        release_events,
        Instant::now(),
    );
    if conflicts > 0 {
        app.set_warning(format!(
            "{conflicts} code(s) shadowed by longer codes and unreachable"
        ));
    } else if !release_events {
        app.set_status("arrow keys act on press");
    } else {
        app.set_status(format!("{} stratagems ready", app.dictionary_len));
    }

    let result = run_app(&mut terminal, &mut app);
    terminal.show_cursor()?;
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render when the core presented a frame
        if app.canvas.take_dirty() {
            terminal.draw(|f| ui::draw(f, app))?;
        }

        // 2. Wait for input, at most until the next dwell deadline
        let timeout = app.poll_timeout(Instant::now());
        if event::poll(timeout)? {
            let event = event::read()?;
            app.handle_event(&event, Instant::now());
        } else {
            app.tick(Instant::now());
        }

        // 3. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Undo every terminal mode the trainer turns on. Safe to call more than once.
fn restore_terminal() -> io::Result<()> {
    let mut out = io::stdout();
    // Popping with nothing pushed is ignored by terminals.
    let _ = execute!(out, PopKeyboardEnhancementFlags);
    execute!(out, DisableMouseCapture, LeaveAlternateScreen)?;
    disable_raw_mode()
}
