mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use star_catcher::config::GameConfig;
use star_catcher::entities::{GameStatus, InputState};
use star_catcher::game::GameController;
use star_catcher::physics::ArcadePhysics;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so at 60 FPS a window of 8 frames
/// (≈133 ms) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

#[derive(Parser, Debug)]
#[command(name = "star_catcher", about = "Catch the stars, dodge the bombs")]
struct Cli {
    /// TOML config file; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw/alternate-screen mode, so logs only go to a file.
fn init_logging(config: &GameConfig) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("star_catcher=info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum SessionEnd {
    Quit,
    Restart,
}

/// Runs one session until the player quits or asks for a new game.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key. Each frame we check which keys are still "fresh"
/// (within `HOLD_WINDOW` frames) and build one `InputState` from them, so
/// run + jump can be held together.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut GameController,
    physics: &mut ArcadePhysics,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<SessionEnd> {
    let frame_time = Duration::from_secs_f32(game.config().tick_seconds());
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(SessionEnd::Quit);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(SessionEnd::Quit);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if game.status() == GameStatus::GameOver =>
                        {
                            return Ok(SessionEnd::Restart);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let input = InputState {
            left: any_held(
                &key_frame,
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                frame,
            ),
            right: any_held(
                &key_frame,
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                frame,
            ),
            up: any_held(
                &key_frame,
                &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W'), KeyCode::Char(' ')],
                frame,
            ),
        };

        game.tick(input, physics, rng);
        display::render(out, game, physics)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        }
    }
}

fn run<W: Write>(
    out: &mut W,
    config: &GameConfig,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    loop {
        let mut game = GameController::initialize(config.clone(), rng);
        let mut physics = ArcadePhysics::new(config);
        match game_loop(out, &mut game, &mut physics, rng, rx)? {
            SessionEnd::Quit => {
                info!(score = game.score().current_score(), "quit");
                return Ok(());
            }
            SessionEnd::Restart => info!(score = game.score().current_score(), "new session"),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    init_logging(&config)?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
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

    let result = run(&mut out, &config, &mut rng, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.map_err(Into::into)
}
