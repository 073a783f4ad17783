//! VeriPura Workflow Simulator — interactive Ratatui TUI
//!
//! Pick an industry, type a product description and press Enter. The six
//! agent stages are revealed one step delay apart while the generation call
//! runs on a worker thread.
//!
//! Logging is off by default so the screen stays clean. Set
//! `VERIPURA_LOG_FILE=/path/to/file` to write `tracing` output there.

mod app;
mod ui;

use std::{fs::File, io, path::PathBuf, sync::Mutex, time::Instant};

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use veripura_config::{api_key_from_env, Settings};
use veripura_core::traits::TextGenerator;
use veripura_gemini::GeminiClient;
use veripura_ref_trade::{mock_data::CannedGenerator, requester::trade_requester};

use crate::app::{App, Focus};

/// VeriPura — interactive workflow simulator.
#[derive(Parser)]
#[command(name = "veripura-tui", about = "Interactive VeriPura workflow simulator")]
struct Cli {
    /// Settings file (TOML).
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Answer from canned data instead of calling the generation service.
    #[arg(long)]
    offline: bool,
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_file_logging() -> io::Result<()> {
    let Some(path) = std::env::var_os("VERIPURA_LOG_FILE") else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .init();
    Ok(())
}

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

// ── Main event loop ───────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_file_logging()?;

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("veripura-tui: {e}");
            std::process::exit(1);
        }
    };

    let generator: Box<dyn TextGenerator> = if cli.offline {
        Box::new(CannedGenerator::new())
    } else {
        Box::new(GeminiClient::new(&settings.generator, api_key_from_env()))
    };
    let requester = trade_requester(generator);
    let mut app = App::new(
        requester,
        settings.step_delay(),
        settings.routing.hitm_threshold,
    );

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    loop {
        terminal.draw(|f| ui::ui(f, &app))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Esc => break,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                    KeyCode::Char('q') | KeyCode::Char('Q') if app.focus == Focus::Sidebar => {
                        break
                    }

                    KeyCode::Up => app.select_previous(),
                    KeyCode::Down => app.select_next(),
                    KeyCode::Tab => app.toggle_focus(),
                    KeyCode::Enter => app.trigger(),

                    KeyCode::Backspace if app.focus == Focus::Input => app.backspace(),
                    KeyCode::Char(c) if app.focus == Focus::Input => app.type_char(c),

                    _ => {}
                }
            }
        }

        app.on_tick(Instant::now());
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}
