//! Game entities: ships, their projectiles and the heart pickup.
//!
//! Every entity embeds a `Body` for shared geometry and implements `Entity`
//! for its own movement rule.  Positions may sit outside the playfield:
//! new enemies and hearts start just above it, and spent projectiles are
//! parked past its far corner.

use crossterm::style::Color;

use crate::assets::SpriteId;
use crate::audio::{Audio, Cue};
use crate::constants::*;
use crate::surface::{Bounds, Rect, Surface};

// ── Shared geometry ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per frame.
    pub speed: f32,
    pub sprite: Option<SpriteId>,
    /// Placeholder colour when there is no sprite to draw.
    pub color: Color,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32, speed: f32) -> Self {
        Body { x, y, width, height, speed, sprite: None, color: Color::White }
    }

    pub fn with_sprite(mut self, sprite: SpriteId) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Blit the sprite if one is loaded, otherwise a solid rectangle.
    pub fn draw(&self, surface: &mut dyn Surface) {
        if let Some(sprite) = self.sprite {
            if surface.blit(sprite, self.rect()) {
                return;
            }
        }
        surface.fill_rect(self.rect(), self.color);
    }
}

pub trait Entity {
    fn body(&self) -> &Body;

    /// Apply one frame of movement.  `direction` is -1 or 1.
    fn advance(&mut self, direction: i32, bounds: Bounds);

    fn draw(&self, surface: &mut dyn Surface) {
        self.body().draw(surface);
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub body: Body,
    pub damage: i32,
    /// In flight.  A ship may only have one shot out at a time.
    pub fired: bool,
}

impl Projectile {
    pub fn new(damage: i32, color: Color) -> Self {
        Projectile {
            body: Body::new(0.0, 0.0, BULLET_WIDTH, BULLET_HEIGHT, BULLET_SPEED).with_color(color),
            damage,
            fired: false,
        }
    }

    pub fn fire(&mut self, x: f32, y: f32) {
        self.body.x = x;
        self.body.y = y;
        self.fired = true;
    }

    /// Disarm after a hit and park past the far corner so the same shot
    /// cannot register twice.
    pub fn reset(&mut self, bounds: Bounds) {
        self.fired = false;
        self.body.x = bounds.width;
        self.body.y = bounds.height;
    }
}

impl Entity for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn advance(&mut self, direction: i32, bounds: Bounds) {
        if !self.fired {
            return;
        }
        self.body.y += self.body.speed * direction as f32;
        if self.body.y <= 0.0 || self.body.y >= bounds.height {
            self.fired = false;
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if self.fired {
            self.body.draw(surface);
        }
    }
}

// ── Ships ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyClass {
    Small,
    Medium,
    Large,
}

/// Fixed attributes of an enemy class.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    pub size: f32,
    pub speed: f32,
    pub fire_delay: u32,
    pub damage: i32,
    pub sprite: SpriteId,
}

impl EnemyClass {
    pub const ALL: [EnemyClass; 3] = [EnemyClass::Small, EnemyClass::Medium, EnemyClass::Large];

    pub fn stats(self) -> EnemyStats {
        match self {
            EnemyClass::Small => EnemyStats {
                size: 100.0,
                speed: 3.0,
                fire_delay: 50,
                damage: 10,
                sprite: SpriteId::AlienSmall,
            },
            EnemyClass::Medium => EnemyStats {
                size: 120.0,
                speed: 1.5,
                fire_delay: 75,
                damage: 25,
                sprite: SpriteId::AlienMedium,
            },
            EnemyClass::Large => EnemyStats {
                size: 150.0,
                speed: 0.75,
                fire_delay: 100,
                damage: 50,
                sprite: SpriteId::AlienLarge,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub body: Body,
    /// Only meaningful for the player; enemies die to a single hit.
    pub health: i32,
    pub destroyed: bool,
    pub projectile: Projectile,
    /// Frames between enemy shots.  Zero for the player.
    pub fire_delay: u32,
    /// Frames since the last enemy shot.
    pub fire_timer: u32,
    pub owner: Owner,
}

impl Ship {
    pub fn player() -> Self {
        let half = PLAYER_SIZE / 2.0;
        Ship {
            body: Body::new(
                PLAYER_CENTER_X - half,
                PLAYER_CENTER_Y - half,
                PLAYER_SIZE,
                PLAYER_SIZE,
                PLAYER_SPEED,
            )
            .with_sprite(SpriteId::Player),
            health: PLAYER_MAX_HEALTH,
            destroyed: false,
            projectile: Projectile::new(PLAYER_BULLET_DAMAGE, Color::Cyan),
            fire_delay: 0,
            fire_timer: 0,
            owner: Owner::Player,
        }
    }

    /// A fresh enemy at lane position `x`, just above the playfield.
    pub fn enemy(class: EnemyClass, x: f32) -> Self {
        let stats = class.stats();
        Ship {
            body: Body::new(x, -stats.size, stats.size, stats.size, stats.speed)
                .with_sprite(stats.sprite)
                .with_color(stats.sprite.color()),
            health: 1,
            destroyed: false,
            projectile: Projectile::new(stats.damage, Color::Magenta),
            fire_delay: stats.fire_delay,
            fire_timer: 0,
            owner: Owner::Enemy,
        }
    }

    pub fn is_player(&self) -> bool {
        self.owner == Owner::Player
    }

    /// Where a new shot appears: horizontally centred, on the top edge for
    /// the player and the bottom edge for enemies.
    pub fn muzzle(&self) -> (f32, f32) {
        let x = self.body.x + self.body.width / 2.0 - self.projectile.body.width / 2.0;
        let y = match self.owner {
            Owner::Player => self.body.y,
            Owner::Enemy => self.body.y + self.body.height,
        };
        (x, y)
    }

    /// Fire unless a shot is already in flight.  Returns whether it fired.
    pub fn fire(&mut self, audio: &mut dyn Audio) -> bool {
        if self.projectile.fired {
            return false;
        }
        let (x, y) = self.muzzle();
        self.projectile.fire(x, y);
        audio.play(Cue::Shoot);
        true
    }

    /// Enemy fire timer.  Holds fire until half the hull is on screen.
    pub fn auto_fire(&mut self, audio: &mut dyn Audio) {
        if self.is_player() {
            return;
        }
        self.fire_timer += 1;
        let visible = self.body.y + self.body.height / 2.0 >= 0.0;
        if self.fire_timer >= self.fire_delay && visible {
            self.fire(audio);
            self.fire_timer = 0;
        }
    }

    pub fn take_damage(&mut self, damage: i32) {
        self.health = (self.health - damage).max(0);
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(PLAYER_MAX_HEALTH);
    }

    pub fn danger_line(bounds: Bounds) -> f32 {
        bounds.height - DANGER_MARGIN
    }
}

impl Entity for Ship {
    fn body(&self) -> &Body {
        &self.body
    }

    fn advance(&mut self, direction: i32, bounds: Bounds) {
        let step = self.body.speed * direction as f32;
        match self.owner {
            Owner::Player => {
                self.body.x = (self.body.x + step).clamp(0.0, bounds.width - self.body.width);
            }
            Owner::Enemy => {
                self.body.y += step;
                if self.body.y + self.body.height >= Ship::danger_line(bounds) {
                    self.destroyed = true;
                }
            }
        }
    }
}

// ── Pickups ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Pickup {
    pub body: Body,
    pub restore: i32,
    /// Collected, or fell off the bottom.  Either way it gets replaced.
    pub claimed: bool,
}

impl Pickup {
    pub fn heart() -> Self {
        Pickup {
            body: Body::new(
                HEART_CENTER_X - HEART_SIZE / 2.0,
                -HEART_SIZE,
                HEART_SIZE,
                HEART_SIZE,
                HEART_SPEED,
            )
            .with_sprite(SpriteId::Heart)
            .with_color(Color::Magenta),
            restore: HEART_RESTORE,
            claimed: false,
        }
    }
}

impl Entity for Pickup {
    fn body(&self) -> &Body {
        &self.body
    }

    fn advance(&mut self, direction: i32, bounds: Bounds) {
        self.body.y += self.body.speed * direction as f32;
        if self.body.y >= bounds.height + self.body.height {
            self.claimed = true;
        }
    }
}
