//! Per-frame input snapshots built from crossterm events, and the frame
//! rate gate.
//!
//! Held keys use a `key_seen` map recording when the last press or repeat
//! arrived for every key.  A key counts as held while that moment is within
//! `HOLD_WINDOW`, which covers terminals that never send release events:
//! OS key-repeat refreshes the entry before it expires.  The window is wall
//! time, not frames, so it holds at any `--fps`.  Terminals with keyboard
//! enhancement send proper releases and the key is dropped at once.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::constants::frame_budget;

/// How long a key stays live after its last press/repeat event.  Longer
/// than the gap between OS key-repeat events.
const HOLD_WINDOW: Duration = Duration::from_millis(133);

/// The subset of input gameplay cares about.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    // Held this frame.
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    // Pressed this frame.
    pub pause: bool,
    pub save: bool,
    pub back: bool,
    pub quit: bool,
    pub tab: bool,
    pub enter: bool,
    pub backspace: bool,
    /// SPACE went down while it was not already held.  Auto-repeat never
    /// sets this.
    pub resume: bool,
    /// Printable characters typed this frame, in order.
    pub typed: Vec<char>,
    /// Logical playfield position of the pointer.
    pub pointer: (f32, f32),
    pub pointer_pressed: bool,
}

impl InputSnapshot {
    pub fn controls(&self) -> Controls {
        Controls { left: self.left, right: self.right, fire: self.fire }
    }
}

#[derive(Default)]
pub struct InputTracker {
    key_seen: HashMap<KeyCode, Instant>,
    edges: InputSnapshot,
    pointer: (f32, f32),
}

impl InputTracker {
    pub fn new() -> Self {
        InputTracker::default()
    }

    /// Feed one terminal event.  `to_field` maps a terminal cell to
    /// logical playfield coordinates.
    pub fn handle<F>(&mut self, event: &Event, to_field: F)
    where
        F: Fn(u16, u16) -> (f32, f32),
    {
        self.handle_at(event, Instant::now(), to_field);
    }

    /// `handle` with an explicit arrival time.
    pub fn handle_at<F>(&mut self, event: &Event, now: Instant, to_field: F)
    where
        F: Fn(u16, u16) -> (f32, f32),
    {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                self.pointer = to_field(*column, *row);
                if let MouseEventKind::Down(MouseButton::Left) = kind {
                    self.edges.pointer_pressed = true;
                }
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Instant) {
        match key.kind {
            KeyEventKind::Press => {
                // Without keyboard enhancement, repeats arrive as presses.
                let fresh = !self.is_held(&key.code, now);
                self.key_seen.insert(key.code, now);
                self.press(key, fresh);
            }
            KeyEventKind::Repeat => {
                self.key_seen.insert(key.code, now);
                match key.code {
                    KeyCode::Backspace => self.edges.backspace = true,
                    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.edges.typed.push(c)
                    }
                    _ => {}
                }
            }
            KeyEventKind::Release => {
                self.key_seen.remove(&key.code);
            }
        }
    }

    fn press(&mut self, key: &KeyEvent, fresh: bool) {
        let edges = &mut self.edges;
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => edges.quit = true,
            KeyCode::Esc => edges.quit = true,
            KeyCode::Tab => edges.tab = true,
            KeyCode::Enter => edges.enter = true,
            KeyCode::Backspace => edges.backspace = true,
            KeyCode::Char(c) => {
                match c {
                    ' ' => edges.resume |= fresh,
                    'p' | 'P' => edges.pause = true,
                    's' | 'S' => edges.save = true,
                    'b' | 'B' => edges.back = true,
                    _ => {}
                }
                edges.typed.push(c);
            }
            _ => {}
        }
    }

    fn is_held(&self, key: &KeyCode, now: Instant) -> bool {
        self.key_seen
            .get(key)
            .map(|&last| now.saturating_duration_since(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode], now: Instant) -> bool {
        keys.iter().any(|k| self.is_held(k, now))
    }

    /// Close the current frame: report held keys plus everything pressed
    /// since the last snapshot.
    pub fn snapshot(&mut self) -> InputSnapshot {
        self.snapshot_at(Instant::now())
    }

    /// `snapshot` taken at an explicit time.
    pub fn snapshot_at(&mut self, now: Instant) -> InputSnapshot {
        let mut snap = std::mem::take(&mut self.edges);
        snap.left = self.any_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], now);
        snap.right = self.any_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], now);
        snap.fire = self.is_held(&KeyCode::Char(' '), now);
        snap.pointer = self.pointer;
        snap
    }
}

// ── Frame pacing ──────────────────────────────────────────────────────────────

/// Caps the loop at a fixed frame rate by sleeping out the rest of each
/// frame's budget.
pub struct FrameGate {
    budget: Duration,
    start: Instant,
}

impl FrameGate {
    pub fn new(fps: u32) -> Self {
        FrameGate { budget: frame_budget(fps), start: Instant::now() }
    }

    pub fn begin(&mut self) {
        self.start = Instant::now();
    }

    /// Block until the current frame's budget has elapsed.
    pub fn wait(&mut self) {
        let elapsed = self.start.elapsed();
        if elapsed < self.budget {
            std::thread::sleep(self.budget - elapsed);
        }
    }
}
