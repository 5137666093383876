//! One play-through: the player, the live enemies, the heart pickup and
//! the score/level/goal counters, advanced one frame at a time by `tick`.
//!
//! All randomness comes through the injected RNG and all sound through the
//! injected `Audio`, so a seeded RNG and a recording audio double make
//! every frame reproducible in tests.

use crossterm::style::Color;
use rand::Rng;

use crate::audio::{Audio, Cue};
use crate::collision::overlaps;
use crate::constants::{FIELD_HEIGHT, FIELD_WIDTH, FIRST_GOAL, GOAL_STEP, POINTS_PER_LEVEL};
use crate::entities::{Entity, Pickup, Ship};
use crate::input::Controls;
use crate::spawn::{populate_default_wave, SpawnState};
use crate::surface::{Bounds, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverReason {
    Died,
    AliensReachedYou,
}

impl GameOverReason {
    pub fn text(self) -> &'static str {
        match self {
            GameOverReason::Died => "YOU DIED",
            GameOverReason::AliensReachedYou => "ALIENS REACHED YOU",
        }
    }
}

/// Something that happened during a frame.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    EnemyKilled { score: u32 },
    LevelUp { level: u32 },
    PlayerHit { damage: i32, health: i32 },
    HeartClaimed { health: i32 },
    GameOver(GameOverReason),
}

#[derive(Clone, Debug)]
pub struct Session {
    pub player: Ship,
    pub enemies: Vec<Ship>,
    pub pickup: Pickup,
    pub spawn: SpawnState,
    pub score: u32,
    /// Score at which the next heart starts falling.
    pub goal: u32,
    /// Also the minimum number of live enemies.
    pub level: u32,
    pub game_over: Option<GameOverReason>,
    pub frame: u64,
    pub bounds: Bounds,
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            player: Ship::player(),
            enemies: Vec::new(),
            pickup: Pickup::heart(),
            spawn: SpawnState::default(),
            score: 0,
            goal: FIRST_GOAL,
            level: 1,
            game_over: None,
            frame: 0,
            bounds: Bounds::new(FIELD_WIDTH, FIELD_HEIGHT),
        }
    }

    pub fn is_over(&self) -> bool {
        self.game_over.is_some()
    }

    /// True while the heart is in play.
    pub fn pickup_active(&self) -> bool {
        self.score >= self.goal && !self.pickup.claimed
    }

    // ── Per-frame update ─────────────────────────────────────────────────────

    /// Advance the game by one frame.  Does nothing once the game is over.
    ///
    /// Order: player movement and fire, wave top-up, player shot, each
    /// enemy in turn, then the heart.  Processing stops at the enemy that
    /// ends the game.
    pub fn tick(
        &mut self,
        controls: Controls,
        rng: &mut impl Rng,
        audio: &mut dyn Audio,
    ) -> Vec<FrameEvent> {
        let mut events = Vec::new();
        if self.is_over() {
            return events;
        }
        self.frame += 1;
        let bounds = self.bounds;

        if controls.left {
            self.player.advance(-1, bounds);
        }
        if controls.right {
            self.player.advance(1, bounds);
        }
        if controls.fire {
            self.player.fire(audio);
        }

        if self.enemies.len() < self.level as usize {
            populate_default_wave(&mut self.enemies, &mut self.spawn, rng);
        }

        self.player.projectile.advance(-1, bounds);

        self.resolve_enemies(audio, &mut events);
        if !self.is_over() {
            self.resolve_pickup(audio, &mut events);
        }
        events
    }

    fn resolve_enemies(&mut self, audio: &mut dyn Audio, events: &mut Vec<FrameEvent>) {
        let bounds = self.bounds;
        let mut i = 0;
        while i < self.enemies.len() {
            let enemy = &mut self.enemies[i];
            enemy.advance(1, bounds);
            if enemy.destroyed {
                // Crossed the danger line.
                self.player.health = 0;
                self.end(GameOverReason::AliensReachedYou, audio, events);
                return;
            }

            if !enemy.projectile.fired {
                enemy.auto_fire(audio);
            }
            enemy.projectile.advance(1, bounds);

            if overlaps(&self.player.projectile, enemy.body.rect()) {
                enemy.destroyed = true;
                self.player.projectile.reset(bounds);
                self.score += 1;
                events.push(FrameEvent::EnemyKilled { score: self.score });
                if self.score % POINTS_PER_LEVEL == 0 {
                    self.level += 1;
                    log::info!("level {} reached at score {}", self.level, self.score);
                    events.push(FrameEvent::LevelUp { level: self.level });
                }
                audio.play(Cue::Kill);
            }

            if overlaps(&enemy.projectile, self.player.body.rect()) {
                let damage = enemy.projectile.damage;
                self.player.take_damage(damage);
                enemy.projectile.reset(bounds);
                events.push(FrameEvent::PlayerHit { damage, health: self.player.health });
                audio.play(Cue::Hit);
            }

            if enemy.destroyed {
                self.enemies.swap_remove(i);
            } else {
                i += 1;
            }

            if self.player.health <= 0 {
                self.end(GameOverReason::Died, audio, events);
                return;
            }
        }
    }

    fn resolve_pickup(&mut self, audio: &mut dyn Audio, events: &mut Vec<FrameEvent>) {
        if self.score < self.goal {
            return;
        }
        if self.pickup.claimed {
            self.pickup = Pickup::heart();
            return;
        }

        let bounds = self.bounds;
        self.pickup.advance(1, bounds);
        if overlaps(&self.player.projectile, self.pickup.body.rect()) {
            self.pickup.claimed = true;
            self.player.heal(self.pickup.restore);
            self.player.projectile.reset(bounds);
            self.goal += GOAL_STEP;
            events.push(FrameEvent::HeartClaimed { health: self.player.health });
            audio.play(Cue::Heal);
        }
    }

    fn end(&mut self, reason: GameOverReason, audio: &mut dyn Audio, events: &mut Vec<FrameEvent>) {
        self.game_over = Some(reason);
        audio.stop_music();
        audio.play(Cue::GameOver);
        log::info!(
            "game over ({}) at score {}, level {}, frame {}",
            reason.text(),
            self.score,
            self.level,
            self.frame
        );
        events.push(FrameEvent::GameOver(reason));
    }

    // ── Rendering ────────────────────────────────────────────────────────────

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.player.draw(surface);
        self.player.projectile.draw(surface);
        for enemy in &self.enemies {
            enemy.draw(surface);
            enemy.projectile.draw(surface);
        }
        if self.pickup_active() {
            self.pickup.draw(surface);
        }
        self.draw_hud(surface);
    }

    /// Score bottom-left, level centred, health bottom-right.
    pub fn draw_hud(&self, surface: &mut dyn Surface) {
        let field = surface.field();
        let y = field.height - 50.0;
        surface.text(30.0, y, &format!("Score: {}", self.score), Color::Green);
        surface.text_centered(y, &format!("Level {}", self.level), Color::Yellow);
        surface.text(field.width - 170.0, y, &format!("Health: {}", self.player.health), Color::Red);
    }
}
