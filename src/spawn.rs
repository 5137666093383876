//! Enemy spawn placement.
//!
//! Enemies enter in one of three lanes.  Two spawns in a row never share a
//! lane, which keeps a wave from stacking ships on top of each other.

use rand::Rng;

use crate::constants::{LANE_LEFT, LANE_MIDDLE, LANE_RIGHT, WAVE_SIZE};
use crate::entities::{EnemyClass, Ship};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lane {
    Left,
    Middle,
    Right,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Middle, Lane::Right];

    /// Inclusive x range.  The middle lane is narrower on purpose.
    pub fn range(self) -> (i32, i32) {
        match self {
            Lane::Left => LANE_LEFT,
            Lane::Middle => LANE_MIDDLE,
            Lane::Right => LANE_RIGHT,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Lane {
        Lane::ALL[rng.gen_range(0..Lane::ALL.len())]
    }
}

/// Lane of the previous spawn, or `None` when the next pick is free.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpawnState {
    pub previous: Option<Lane>,
}

/// Pick an x position for the next spawn.
///
/// With no previous lane the `hint` is taken as is.  Otherwise the hint is
/// ignored and one of the two other lanes is chosen uniformly.  The
/// returned state remembers the lane actually used.
pub fn pick_lane(state: SpawnState, hint: Lane, rng: &mut impl Rng) -> (SpawnState, Lane, f32) {
    let mut state = state;
    let mut lane = hint;
    // At most two passes: a clash with the previous lane clears it and
    // retries with a different lane.
    loop {
        match state.previous {
            None => {
                state.previous = Some(lane);
                let (lo, hi) = lane.range();
                return (state, lane, rng.gen_range(lo..=hi) as f32);
            }
            Some(previous) => {
                let others: Vec<Lane> = Lane::ALL.into_iter().filter(|l| *l != previous).collect();
                lane = others[rng.gen_range(0..others.len())];
                state.previous = None;
            }
        }
    }
}

/// Append `count` enemies of random class in alternating lanes.
pub fn populate_wave(
    enemies: &mut Vec<Ship>,
    state: &mut SpawnState,
    count: usize,
    rng: &mut impl Rng,
) {
    for _ in 0..count {
        let class = EnemyClass::ALL[rng.gen_range(0..EnemyClass::ALL.len())];
        let hint = Lane::random(rng);
        let (next, lane, x) = pick_lane(*state, hint, rng);
        *state = next;
        log::trace!("spawning {:?} enemy in {:?} lane at x={}", class, lane, x);
        enemies.push(Ship::enemy(class, x));
    }
}

pub fn populate_default_wave(enemies: &mut Vec<Ship>, state: &mut SpawnState, rng: &mut impl Rng) {
    populate_wave(enemies, state, WAVE_SIZE, rng);
}
