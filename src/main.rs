mod args;
mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        ModifierKeyCode, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use beam_barrage::config::GameConfig;
use beam_barrage::director::{init_state, start_or_fire, tick, GameState, Mode};
use beam_barrage::input::HeldKeys;

use crate::args::Args;
use crate::display::SpriteSheet;

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 6 frames (120 ms at
/// 50 ticks/s) is refreshed before expiry.
const HOLD_WINDOW: u64 = 6;

/// Pseudo-key recorded whenever Shift is seen, either as its own key event
/// (keyboard-enhancement terminals) or as a modifier on another key.
const BOOST_KEY: KeyCode = KeyCode::Modifier(ModifierKeyCode::LeftShift);

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| is_held(key_frame, key, frame))
}

fn held_keys(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> HeldKeys {
    use KeyCode::{Char, Down, Left, Right, Up};
    HeldKeys {
        up: any_held(key_frame, &[Up, Char('w'), Char('W')], frame),
        down: any_held(key_frame, &[Down, Char('s'), Char('S')], frame),
        left: any_held(key_frame, &[Left, Char('a'), Char('A')], frame),
        right: any_held(key_frame, &[Right, Char('d'), Char('D')], frame),
        boost: any_held(
            key_frame,
            &[BOOST_KEY, KeyCode::Modifier(ModifierKeyCode::RightShift)],
            frame,
        ),
    }
}

fn record_key(
    key_frame: &mut HashMap<KeyCode, u64>,
    code: KeyCode,
    modifiers: KeyModifiers,
    frame: u64,
) {
    key_frame.insert(code, frame);
    if modifiers.contains(KeyModifiers::SHIFT) {
        key_frame.insert(BOOST_KEY, frame);
    }
}

/// Releasing either Shift clears the boost pseudo-key as well.
fn release_key(key_frame: &mut HashMap<KeyCode, u64>, code: KeyCode) {
    key_frame.remove(&code);
    if matches!(
        code,
        KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift)
    ) {
        key_frame.remove(&BOOST_KEY);
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run one session until quit or game over; returns the final state.
///
/// Input events are drained fully before the tick runs. Space is a one-shot
/// action (start, then fire); movement and boost use the held-key map so
/// several keys can be combined.
fn game_loop<W: Write>(
    out: &mut W,
    mut state: GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut impl Rng,
    sheet: &SpriteSheet,
) -> std::io::Result<GameState> {
    let frame_len = Duration::from_secs_f64(1.0 / state.config.tick_rate as f64);

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    record_key(&mut key_frame, code, modifiers, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            info!("quit requested");
                            return Ok(state);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            info!("quit requested");
                            return Ok(state);
                        }
                        KeyCode::Char(' ') => state = start_or_fire(&state),
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => record_key(&mut key_frame, code, modifiers, frame),
                KeyEventKind::Release => release_key(&mut key_frame, code),
            }
        }

        match state.mode {
            Mode::Menu => display::render_menu(out, sheet)?,
            Mode::Playing => {
                let held = held_keys(&key_frame, frame);
                state = tick(&state, &held, rng);
                display::render(out, &state, sheet)?;
                if state.mode == Mode::GameOver {
                    display::render_game_over(out, sheet)?;
                    thread::sleep(Duration::from_millis(state.config.game_over_pause_ms));
                    return Ok(state);
                }
            }
            Mode::GameOver => return Ok(state),
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Logs go to a file because the game owns the terminal.
fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("could not load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(seed = ?args.seed, tick_rate = config.tick_rate, "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events and standalone modifier keys (Shift) from the
    // terminal. Kitty-protocol terminals support this; others fall back to the
    // hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let sheet = SpriteSheet::new();
    let result = game_loop(&mut out, init_state(config), &rx, &mut rng, &sheet);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let state = result.context("terminal i/o failed")?;
    info!(
        score = state.score.value,
        lives = state.life.value,
        ticks = state.tick,
        "session ended"
    );
    if state.mode == Mode::GameOver {
        println!("GAME OVER, final score {}", state.score.value);
    }
    Ok(())
}
