//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::DEFAULT_FPS;

#[derive(Parser, Debug, Clone)]
#[command(name = "pixel_defender")]
#[command(about = "Shoot down descending alien waves in your terminal")]
pub struct Args {
    /// Directory holding the ASCII-art sprite files
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    /// Frame-rate cap
    #[arg(long, default_value_t = DEFAULT_FPS, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Seed for a reproducible game (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Ring the terminal bell for loud sound cues
    #[arg(long)]
    pub bell: bool,

    /// Where log output goes; the terminal itself is busy drawing the game
    #[arg(long, default_value = "pixel_defender.log")]
    pub log_file: PathBuf,
}

impl Args {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
