//! A mouse-driven chess board for the terminal.
//!
//! Click a piece of the side to move, then click where it should go.
//! `--variant` picks how much help the board gives along the way.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr, Stderr};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use crate::app::{
    event::{spawn_event_reader, AppEvent, FRAME_INTERVAL},
    handler,
    state::AppState,
};
use crate::config::{AppConfig, Variant};
use crate::core::{game::Game, glyph::GlyphStyle};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Play chess in the terminal with the mouse")]
struct Cli {
    /// Feature preset.  Overrides the toggles saved in the config file.
    #[arg(long, value_enum)]
    variant: Option<Variant>,

    /// Start from this position instead of the initial one.
    #[arg(long)]
    fen: Option<String>,

    /// Put Black at the bottom.
    #[arg(long)]
    flip: bool,

    /// Draw pieces as letters instead of chess symbols.
    #[arg(long)]
    ascii: bool,

    /// How long transient notices stay up, in milliseconds.
    #[arg(long)]
    notification_ms: Option<u64>,

    /// Move animation length in milliseconds (0 disables it).
    #[arg(long)]
    animation_ms: Option<u64>,
}

impl Cli {
    /// Layer command-line overrides on top of the loaded config.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(variant) = self.variant {
            variant.apply(config);
        }
        if self.ascii {
            config.glyph_style = GlyphStyle::Ascii;
        }
        if let Some(ms) = self.notification_ms {
            config.notification_ms = config::clamp_notification_ms(ms);
        }
        if let Some(ms) = self.animation_ms {
            config.animation_ms = config::clamp_animation_ms(ms);
        }
    }
}

type Tui = Terminal<CrosstermBackend<Stderr>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only prints when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    // ── build the game ────────────────────────────────────────
    let game = match cli.fen.as_deref() {
        Some(fen) => Game::from_fen(fen).with_context(|| format!("cannot start from {fen:?}"))?,
        None => Game::new(),
    };
    let mut user_config = AppConfig::load();
    cli.apply(&mut user_config);
    tracing::info!(variant = ?cli.variant, fen = %game.fen(), "starting");

    let mut state = AppState::new(game, user_config);
    state.flipped = cli.flip;

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    // Restore the terminal even when the loop failed.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn run(terminal: &mut Tui, state: &mut AppState) -> Result<()> {
    let mut events = spawn_event_reader(FRAME_INTERVAL);
    let size = terminal.size()?;
    state.terminal_area = Rect::new(0, 0, size.width, size.height);

    loop {
        let now = Instant::now();
        terminal.draw(|frame| ui::draw(frame, state, now))?;

        let Some(event) = events.recv().await else {
            tracing::debug!("event reader closed");
            break;
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(state, k, Instant::now()),
            AppEvent::Mouse(m) => handler::handle_mouse(state, m, Instant::now()),
            AppEvent::Resize(w, h) => {
                state.terminal_area = Rect::new(0, 0, w, h);
            }
            AppEvent::Tick(at) => handler::handle_tick(state, at),
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_are_clamped() {
        let cli = Cli::parse_from([
            "term-chess",
            "--variant",
            "basic",
            "--ascii",
            "--notification-ms",
            "50",
            "--animation-ms",
            "9000",
        ]);
        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert!(!config.show_legal_moves);
        assert!(!config.animate_moves);
        assert_eq!(config.glyph_style, GlyphStyle::Ascii);
        assert_eq!(config.notification_ms, 500);
        assert_eq!(config.animation_ms, 1500);
    }

    #[test]
    fn without_a_variant_the_saved_toggles_survive() {
        let cli = Cli::parse_from(["term-chess"]);
        let mut config = AppConfig::default();
        config.show_side_panel = false;
        cli.apply(&mut config);
        assert!(!config.show_side_panel);
    }
}
