//! Terminal falling-block game (default binary).
//!
//! Drives the engine from crossterm key events and a fixed frame clock, and
//! draws it with the framebuffer renderer.

use std::fs::File;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use blockfall::config::Config;
use blockfall::core::{GameSnapshot, GameState, HighScoreStore, Randomizer, SimpleRng};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::store::FileHighScoreStore;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GAME_OVER_FLASHES, GAME_OVER_FLASH_MS, TICK_MS};

fn main() -> Result<()> {
    let config = Config::from_env();
    init_logging(&config)?;

    let seed = config.seed.unwrap_or_else(rand::random::<u32>);
    info!(seed, high_score_file = %config.high_score_file.display(), "starting");
    let mut game = GameState::new(
        SimpleRng::new(seed),
        FileHighScoreStore::new(config.high_score_file),
    );

    let mut term = TerminalRenderer::new();
    with_terminal(
        &mut term,
        TerminalRenderer::enter,
        |term| run(term, &mut game),
        TerminalRenderer::exit,
    )?;

    println!("Score: {}", game.score());
    println!("High score: {}", game.high_score());
    Ok(())
}

/// Run `body` between `enter` and `exit`. `exit` runs whatever happened
/// before it, including a failed `enter`, and its own error is ignored.
fn with_terminal<T, R>(
    term: &mut T,
    enter: impl FnOnce(&mut T) -> Result<()>,
    body: impl FnOnce(&mut T) -> Result<R>,
    exit: impl FnOnce(&mut T) -> Result<()>,
) -> Result<R> {
    let result = enter(term).and_then(|()| body(term));
    let _ = exit(term);
    result
}

/// Install a file logger when `BLOCKFALL_LOG_PATH` is set. The terminal
/// belongs to the renderer, so nothing is logged to stdout/stderr.
fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = config.log_path.as_ref() else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run<R: Randomizer, S: HighScoreStore>(
    term: &mut TerminalRenderer,
    game: &mut GameState<R, S>,
) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    while !game.game_over() {
        // Render.
        game.snapshot_into(&mut snap);
        view.render_into(&snap, viewport(), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!(score = game.score(), "quit");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick with the real elapsed time so gravity follows the wall clock.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            game.tick(elapsed_ms);
        }
    }

    // Show the final board once, then flash.
    game.snapshot_into(&mut snap);
    view.render_into(&snap, viewport(), &mut fb);
    term.draw_swap(&mut fb)?;
    flash_game_over(term, &view, &mut fb)
}

fn flash_game_over(
    term: &mut TerminalRenderer,
    view: &GameView,
    fb: &mut FrameBuffer,
) -> Result<()> {
    let phase = Duration::from_millis(GAME_OVER_FLASH_MS as u64);
    for _ in 0..GAME_OVER_FLASHES {
        for lit in [true, false] {
            view.render_flash_into(viewport(), lit, fb);
            term.draw_swap(fb)?;
            thread::sleep(phase);
        }
    }
    Ok(())
}

fn viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}
