#![allow(dead_code)]

use pixel_defender::audio::{Audio, Cue};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Records every cue instead of playing it.
#[derive(Default)]
pub struct RecordingAudio {
    pub cues: Vec<Cue>,
    pub music: bool,
    pub music_stops: u32,
}

impl RecordingAudio {
    pub fn count(&self, cue: Cue) -> usize {
        self.cues.iter().filter(|c| **c == cue).count()
    }
}

impl Audio for RecordingAudio {
    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    fn start_music(&mut self) {
        self.music = true;
    }

    fn stop_music(&mut self) {
        self.music = false;
        self.music_stops += 1;
    }
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}
