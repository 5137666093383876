//! Pixel Defender: a terminal arcade shooter.
//!
//! The library holds every rule of the game; the binary only wires it to a
//! real terminal.

pub mod app;
pub mod assets;
pub mod audio;
pub mod collision;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod input;
pub mod scores;
pub mod session;
pub mod spawn;
pub mod surface;
pub mod ui;
