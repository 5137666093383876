//! Tuning constants. Geometry is in logical playfield pixels.

use std::time::Duration;

// ── Playfield ─────────────────────────────────────────────────────────────────

pub const FIELD_WIDTH: f32 = 700.0;
pub const FIELD_HEIGHT: f32 = 900.0;

/// Distance above the bottom edge at which an enemy counts as having
/// reached the player.
pub const DANGER_MARGIN: f32 = 120.0;

pub const DEFAULT_FPS: u32 = 60;

pub fn frame_budget(fps: u32) -> Duration {
    Duration::from_micros(1_000_000 / u64::from(fps.max(1)))
}

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: f32 = 130.0;
pub const PLAYER_CENTER_X: f32 = 350.0;
pub const PLAYER_CENTER_Y: f32 = 780.0;
pub const PLAYER_SPEED: f32 = 10.0;
pub const PLAYER_MAX_HEALTH: i32 = 100;
pub const PLAYER_BULLET_DAMAGE: i32 = 1;

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const BULLET_WIDTH: f32 = 5.0;
pub const BULLET_HEIGHT: f32 = 20.0;
pub const BULLET_SPEED: f32 = 30.0;

// ── Heart pickup ──────────────────────────────────────────────────────────────

pub const HEART_SIZE: f32 = 80.0;
pub const HEART_CENTER_X: f32 = 350.0;
pub const HEART_SPEED: f32 = 1.0;
pub const HEART_RESTORE: i32 = 30;

// ── Progression ───────────────────────────────────────────────────────────────

pub const FIRST_GOAL: u32 = 10;
pub const GOAL_STEP: u32 = 10;
/// Every this many kills the level (and with it the enemy cap) rises by one.
pub const POINTS_PER_LEVEL: u32 = 25;
pub const WAVE_SIZE: usize = 2;

// ── Spawn lanes (inclusive x ranges) ──────────────────────────────────────────

pub const LANE_LEFT: (i32, i32) = (75, 175);
pub const LANE_MIDDLE: (i32, i32) = (325, 375);
pub const LANE_RIGHT: (i32, i32) = (525, 625);
