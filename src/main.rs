//! Terminal front-end (default binary).
//!
//! Drives the engine on the two cadences it is designed for: a gravity
//! timer calling `tick()` and a faster redraw loop reading snapshots.
//! Input events funnel through `GameAction` dispatch between frames.

use std::io::{stdout, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::{cursor, execute, terminal};

use blockfall::core::Game;
use blockfall::types::{GameAction, DEFAULT_HEIGHT, DEFAULT_WIDTH, FRAME_MS, GRAVITY_MS};
use blockfall::view;

fn main() -> Result<()> {
    let mut out = stdout();
    terminal::enable_raw_mode()?;
    execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;

    let result = run(&mut out);

    // Always try to restore terminal state.
    let _ = execute!(out, cursor::Show, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    result
}

fn run(out: &mut impl Write) -> Result<()> {
    let mut game = Game::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)?;
    let mut snapshot = game.snapshot();

    let gravity_interval = Duration::from_millis(GRAVITY_MS);
    let frame_interval = Duration::from_millis(FRAME_MS);
    let mut last_tick = Instant::now();

    loop {
        // Redraw cadence: copy the state, then paint.
        game.snapshot_into(&mut snapshot);
        draw(out, &view::render(&snapshot))?;

        // Input with timeout until the next frame.
        if event::poll(frame_interval)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        return Ok(());
                    }
                    if let Some(action) = map_key(key.code) {
                        game.apply_action(action);
                    }
                }
            }
        }

        // Logic cadence: gravity step on its own interval.
        if last_tick.elapsed() >= gravity_interval {
            game.tick();
            last_tick = Instant::now();
        }
    }
}

fn map_key(code: KeyCode) -> Option<GameAction> {
    match code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Char('z') => Some(GameAction::RotateCcw),
        KeyCode::Char('x') | KeyCode::Up => Some(GameAction::RotateCw),
        KeyCode::Char(' ') | KeyCode::Down => Some(GameAction::HardDrop),
        KeyCode::Char('r') => Some(GameAction::Restart),
        _ => None,
    }
}

fn draw(out: &mut impl Write, lines: &[String]) -> Result<()> {
    execute!(out, terminal::Clear(terminal::ClearType::All))?;
    for (row, line) in lines.iter().enumerate() {
        execute!(out, cursor::MoveTo(0, row as u16))?;
        write!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}
