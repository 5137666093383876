//! Sound cues.
//!
//! Gameplay triggers cues through the `Audio` trait and never waits on
//! them.  The terminal backend can only ring the bell, so it logs every cue
//! and rings for the loud ones when enabled.

use std::io::Write;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Shoot,
    Hit,
    Kill,
    GameOver,
    Heal,
}

/// Configured volume per sound; `-1.0` keeps the backend default.
pub const fn configured_volume(cue: Cue) -> f32 {
    match cue {
        Cue::Shoot => 0.5,
        Cue::Hit => -1.0,
        Cue::Kill => 0.8,
        Cue::GameOver => 0.8,
        Cue::Heal => 0.5,
    }
}

pub const THEME_VOLUME: f32 = -1.0;

const DEFAULT_VOLUME: f32 = 1.0;

/// Cues at or above this effective volume ring the bell.
const BELL_THRESHOLD: f32 = 0.8;

pub fn effective_volume(configured: f32) -> f32 {
    if configured < 0.0 {
        DEFAULT_VOLUME
    } else {
        configured
    }
}

pub trait Audio {
    fn play(&mut self, cue: Cue);
    fn start_music(&mut self);
    fn stop_music(&mut self);
}

pub struct TerminalAudio<W: Write> {
    out: W,
    bell: bool,
    music: bool,
}

impl<W: Write> TerminalAudio<W> {
    pub fn new(out: W, bell: bool) -> Self {
        TerminalAudio { out, bell, music: false }
    }

    pub fn music_playing(&self) -> bool {
        self.music
    }
}

impl<W: Write> Audio for TerminalAudio<W> {
    fn play(&mut self, cue: Cue) {
        let volume = effective_volume(configured_volume(cue));
        log::debug!("cue {:?} at volume {:.2}", cue, volume);
        if self.bell && volume >= BELL_THRESHOLD {
            // A missed bell is not worth interrupting the frame for.
            let _ = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
        }
    }

    fn start_music(&mut self) {
        if !self.music {
            log::debug!("theme loop started at volume {:.2}", effective_volume(THEME_VOLUME));
            self.music = true;
        }
    }

    fn stop_music(&mut self) {
        if self.music {
            log::debug!("theme loop stopped");
            self.music = false;
        }
    }
}

/// Discards everything.
#[derive(Default)]
pub struct Silent;

impl Audio for Silent {
    fn play(&mut self, _cue: Cue) {}
    fn start_music(&mut self) {}
    fn stop_music(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bell_only_for_loud_cues() {
        let mut audio = TerminalAudio::new(Vec::new(), true);
        audio.play(Cue::Shoot);
        assert!(audio.out.is_empty());
        audio.play(Cue::Hit);
        audio.play(Cue::Kill);
        assert_eq!(audio.out, b"\x07\x07");
    }

    #[test]
    fn bell_disabled_stays_quiet() {
        let mut audio = TerminalAudio::new(Vec::new(), false);
        audio.play(Cue::GameOver);
        assert!(audio.out.is_empty());
    }

    #[test]
    fn music_toggles() {
        let mut audio = TerminalAudio::new(Vec::new(), false);
        audio.start_music();
        assert!(audio.music_playing());
        audio.stop_music();
        assert!(!audio.music_playing());
    }
}
