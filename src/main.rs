mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use pixel_defender::app::{App, Flow};
use pixel_defender::assets::SpriteSheet;
use pixel_defender::audio::TerminalAudio;
use pixel_defender::config::Args;
use pixel_defender::constants::{FIELD_HEIGHT, FIELD_WIDTH};
use pixel_defender::input::{FrameGate, InputTracker};
use pixel_defender::scores::DEFAULT_SCORE_FILE;
use pixel_defender::surface::{Bounds, Canvas};

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("pixel_defender=info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Frame loop ────────────────────────────────────────────────────────────────

/// One frame: drain input, step the current screen, draw, present, then
/// wait out the rest of the frame budget.
fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    args: &Args,
    sprites: SpriteSheet,
) -> anyhow::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut canvas = Canvas::new(cols, rows, Bounds::new(FIELD_WIDTH, FIELD_HEIGHT), sprites);
    let mut app = App::new(args.rng(), PathBuf::from(DEFAULT_SCORE_FILE));
    let mut tracker = InputTracker::new();
    let mut audio = TerminalAudio::new(stdout(), args.bell);
    let mut gate = FrameGate::new(args.fps);

    loop {
        gate.begin();

        // Drain all pending input events (non-blocking)
        while let Ok(event) = rx.try_recv() {
            if let Event::Resize(c, r) = event {
                canvas.resize(c, r);
            }
            tracker.handle(&event, |c, r| canvas.to_field(c, r));
        }

        let input = tracker.snapshot();
        if app.frame(&input, &mut audio) == Flow::Quit {
            break;
        }

        canvas.clear();
        app.draw(&mut canvas);
        display::present(out, &canvas)?;

        gate.wait();
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;
    log::info!("starting with {:?}", args);

    let sprites = SpriteSheet::load(&args.assets);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the frame loop never has to block on I/O.
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

    let result = run(&mut out, &rx, &args, sprites);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("exiting after error: {:#}", e);
    }
    log::info!("bye");
    result
}
