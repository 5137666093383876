mod common;

use common::{seeded_rng, RecordingAudio};
use pixel_defender::audio::Cue;
use pixel_defender::collision::overlaps;
use pixel_defender::entities::*;
use pixel_defender::input::Controls;
use pixel_defender::session::*;
use pixel_defender::surface::Rect;

fn idle() -> Controls {
    Controls::default()
}

/// Session with one parked enemy so no wave spawns at level 1.
fn session_with_enemy(class: EnemyClass, x: f32, y: f32) -> Session {
    let mut s = Session::new();
    let mut enemy = Ship::enemy(class, x);
    enemy.body.y = y;
    s.enemies.push(enemy);
    s
}

// ── Collision ─────────────────────────────────────────────────────────────────

#[test]
fn point_inside_rect_collides() {
    let mut bullet = Projectile::new(1, crossterm::style::Color::Cyan);
    bullet.fire(350.0, 400.0);
    let target = Rect::new(340.0, 390.0, 100.0, 100.0);
    assert!(overlaps(&bullet, target));
    bullet.body.y = 300.0;
    assert!(!overlaps(&bullet, target));
}

#[test]
fn unfired_projectile_never_collides() {
    let mut bullet = Projectile::new(1, crossterm::style::Color::Cyan);
    bullet.body.x = 350.0;
    bullet.body.y = 400.0;
    assert!(!overlaps(&bullet, Rect::new(340.0, 390.0, 100.0, 100.0)));
}

#[test]
fn collision_edges_are_inclusive() {
    let mut bullet = Projectile::new(1, crossterm::style::Color::Cyan);
    bullet.fire(440.0, 490.0);
    assert!(overlaps(&bullet, Rect::new(340.0, 390.0, 100.0, 100.0)));
}

#[test]
fn projectile_is_a_point_not_a_box() {
    // The bullet's box would overlap the target, but its top-left point
    // sits just left of it.
    let mut bullet = Projectile::new(1, crossterm::style::Color::Cyan);
    bullet.fire(338.0, 400.0);
    assert!(!overlaps(&bullet, Rect::new(340.0, 390.0, 100.0, 100.0)));
}

// ── Initial state ─────────────────────────────────────────────────────────────

#[test]
fn new_session_defaults() {
    let s = Session::new();
    assert_eq!(s.score, 0);
    assert_eq!(s.goal, 10);
    assert_eq!(s.level, 1);
    assert!(s.enemies.is_empty());
    assert!(!s.is_over());
    assert!(!s.pickup_active());
}

// ── Waves ─────────────────────────────────────────────────────────────────────

#[test]
fn first_tick_spawns_a_wave() {
    let mut s = Session::new();
    let mut audio = RecordingAudio::default();
    s.tick(idle(), &mut seeded_rng(), &mut audio);
    assert_eq!(s.enemies.len(), 2);
    for e in &s.enemies {
        assert!(!e.is_player());
        // Spawned above the field and advanced once.
        assert_eq!(e.body.y, -e.body.height + e.body.speed);
    }
}

#[test]
fn no_spawn_while_enemy_count_meets_level() {
    let mut s = session_with_enemy(EnemyClass::Large, 100.0, 0.0);
    s.tick(idle(), &mut seeded_rng(), &mut RecordingAudio::default());
    assert_eq!(s.enemies.len(), 1);
}

#[test]
fn higher_level_tops_up_waves() {
    let mut s = session_with_enemy(EnemyClass::Large, 100.0, 0.0);
    s.level = 2;
    s.tick(idle(), &mut seeded_rng(), &mut RecordingAudio::default());
    assert_eq!(s.enemies.len(), 3);
}

// ── Player controls ───────────────────────────────────────────────────────────

#[test]
fn controls_move_and_fire() {
    let mut s = session_with_enemy(EnemyClass::Large, 0.0, 0.0);
    let mut audio = RecordingAudio::default();
    s.tick(Controls { left: true, right: false, fire: true }, &mut seeded_rng(), &mut audio);
    assert_eq!(s.player.body.x, 275.0);
    assert!(s.player.projectile.fired);
    // Fired from the top edge, then moved once.
    assert_eq!(s.player.projectile.body.y, 685.0);
    assert_eq!(audio.count(Cue::Shoot), 1);
}

#[test]
fn left_and_right_cancel_out() {
    let mut s = session_with_enemy(EnemyClass::Large, 0.0, 0.0);
    s.tick(
        Controls { left: true, right: true, fire: false },
        &mut seeded_rng(),
        &mut RecordingAudio::default(),
    );
    assert_eq!(s.player.body.x, 285.0);
}

// ── Kills, score and levels ───────────────────────────────────────────────────

#[test]
fn player_bullet_kills_enemy() {
    let mut s = session_with_enemy(EnemyClass::Small, 300.0, 300.0);
    s.player.projectile.fire(350.0, 420.0);
    let mut audio = RecordingAudio::default();
    let events = s.tick(idle(), &mut seeded_rng(), &mut audio);

    assert!(s.enemies.is_empty());
    assert_eq!(s.score, 1);
    assert!(!s.player.projectile.fired);
    assert_eq!((s.player.projectile.body.x, s.player.projectile.body.y), (700.0, 900.0));
    assert_eq!(events, vec![FrameEvent::EnemyKilled { score: 1 }]);
    assert_eq!(audio.count(Cue::Kill), 1);
}

#[test]
fn missed_shot_leaves_enemy_alive() {
    let mut s = session_with_enemy(EnemyClass::Small, 0.0, 300.0);
    s.player.projectile.fire(350.0, 420.0);
    s.tick(idle(), &mut seeded_rng(), &mut RecordingAudio::default());
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.score, 0);
    assert!(s.player.projectile.fired);
}

#[test]
fn level_rises_every_25_points() {
    let mut s = session_with_enemy(EnemyClass::Small, 300.0, 300.0);
    s.score = 24;
    s.player.projectile.fire(350.0, 420.0);
    let events = s.tick(idle(), &mut seeded_rng(), &mut RecordingAudio::default());
    assert_eq!(s.score, 25);
    assert_eq!(s.level, 2);
    assert!(events.contains(&FrameEvent::LevelUp { level: 2 }));

    // 26 does not level up again.
    let mut enemy = Ship::enemy(EnemyClass::Small, 300.0);
    enemy.body.y = 300.0;
    s.enemies = vec![enemy.clone(), enemy];
    s.player.projectile.fire(350.0, 420.0);
    s.tick(idle(), &mut seeded_rng(), &mut RecordingAudio::default());
    assert_eq!(s.score, 26);
    assert_eq!(s.level, 2);
}

#[test]
fn second_level_up_at_fifty() {
    let mut s = session_with_enemy(EnemyClass::Small, 300.0, 300.0);
    s.score = 49;
    s.level = 2;
    let mut other = Ship::enemy(EnemyClass::Large, 0.0);
    other.body.y = 0.0;
    s.enemies.push(other);
    s.player.projectile.fire(350.0, 420.0);
    s.tick(idle(), &mut seeded_rng(), &mut RecordingAudio::default());
    assert_eq!(s.score, 50);
    assert_eq!(s.level, 3);
}

#[test]
fn one_bullet_kills_at_most_one_enemy() {
    let mut s = session_with_enemy(EnemyClass::Small, 300.0, 300.0);
    s.level = 2;
    let mut twin = Ship::enemy(EnemyClass::Small, 300.0);
    twin.body.y = 300.0;
    s.enemies.push(twin);
    s.player.projectile.fire(350.0, 420.0);
    s.tick(idle(), &mut seeded_rng(), &mut RecordingAudio::default());
    assert_eq!(s.score, 1);
    assert_eq!(s.enemies.len(), 1);
}

// ── Enemy fire ────────────────────────────────────────────────────────────────

#[test]
fn enemy_bullet_damages_player() {
    let mut s = session_with_enemy(EnemyClass::Medium, 0.0, 0.0);
    s.enemies[0].projectile.fire(300.0, 700.0);
    let mut audio = RecordingAudio::default();
    let events = s.tick(idle(), &mut seeded_rng(), &mut audio);

    assert_eq!(s.player.health, 75);
    assert!(!s.enemies[0].projectile.fired);
    assert_eq!(events, vec![FrameEvent::PlayerHit { damage: 25, health: 75 }]);
    assert_eq!(audio.count(Cue::Hit), 1);
    assert!(!s.is_over());
}

#[test]
fn lethal_hit_ends_game_with_zero_health() {
    let mut s = session_with_enemy(EnemyClass::Small, 0.0, 0.0);
    s.player.health = 5;
    s.enemies[0].projectile.fire(300.0, 700.0);
    let mut audio = RecordingAudio::default();
    audio.music = true;
    let events = s.tick(idle(), &mut seeded_rng(), &mut audio);

    assert_eq!(s.player.health, 0);
    assert_eq!(s.game_over, Some(GameOverReason::Died));
    assert_eq!(GameOverReason::Died.text(), "YOU DIED");
    assert_eq!(events.last(), Some(&FrameEvent::GameOver(GameOverReason::Died)));
    assert_eq!(audio.count(Cue::GameOver), 1);
    assert!(!audio.music);
}

#[test]
fn enemy_reaching_danger_line_ends_game() {
    let mut s = session_with_enemy(EnemyClass::Small, 300.0, 677.0);
    let mut audio = RecordingAudio::default();
    s.tick(idle(), &mut seeded_rng(), &mut audio);

    assert_eq!(s.game_over, Some(GameOverReason::AliensReachedYou));
    assert_eq!(GameOverReason::AliensReachedYou.text(), "ALIENS REACHED YOU");
    assert_eq!(s.player.health, 0);
    assert_eq!(audio.count(Cue::GameOver), 1);
    assert_eq!(audio.music_stops, 1);
}

#[test]
fn game_over_stops_processing_remaining_enemies() {
    let mut s = session_with_enemy(EnemyClass::Small, 300.0, 677.0);
    s.level = 2;
    let mut second = Ship::enemy(EnemyClass::Large, 500.0);
    second.body.y = 100.0;
    s.enemies.push(second);
    s.tick(idle(), &mut seeded_rng(), &mut RecordingAudio::default());
    assert_eq!(s.enemies[1].body.y, 100.0);
}

#[test]
fn tick_after_game_over_is_a_no_op() {
    let mut s = session_with_enemy(EnemyClass::Small, 300.0, 677.0);
    let mut audio = RecordingAudio::default();
    s.tick(idle(), &mut seeded_rng(), &mut audio);
    let frame = s.frame;
    let events = s.tick(Controls { left: true, right: false, fire: true }, &mut seeded_rng(), &mut audio);
    assert!(events.is_empty());
    assert_eq!(s.frame, frame);
    assert_eq!(audio.count(Cue::GameOver), 1);
    assert!(!s.player.projectile.fired);
}

// ── Heart pickup ──────────────────────────────────────────────────────────────

#[test]
fn heart_stays_put_below_goal() {
    let mut s = session_with_enemy(EnemyClass::Large, 0.0, 0.0);
    s.score = 9;
    s.tick(idle(), &mut seeded_rng(), &mut RecordingAudio::default());
    assert_eq!(s.pickup.body.y, -80.0);
    assert!(!s.pickup_active());
}

#[test]
fn heart_falls_once_goal_reached() {
    let mut s = session_with_enemy(EnemyClass::Large, 0.0, 0.0);
    s.score = 10;
    assert!(s.pickup_active());
    s.tick(idle(), &mut seeded_rng(), &mut RecordingAudio::default());
    assert_eq!(s.pickup.body.y, -79.0);
}

#[test]
fn shooting_heart_heals_and_raises_goal() {
    let mut s = session_with_enemy(EnemyClass::Large, 0.0, 0.0);
    s.score = 10;
    s.player.health = 90;
    s.pickup.body.y = 300.0;
    s.player.projectile.fire(350.0, 400.0);
    let mut audio = RecordingAudio::default();
    let events = s.tick(idle(), &mut seeded_rng(), &mut audio);

    assert!(s.pickup.claimed);
    assert_eq!(s.player.health, 100);
    assert_eq!(s.goal, 20);
    assert!(!s.player.projectile.fired);
    assert_eq!(events, vec![FrameEvent::HeartClaimed { health: 100 }]);
    assert_eq!(audio.count(Cue::Heal), 1);
}

#[test]
fn claimed_heart_is_replaced_at_next_goal() {
    let mut s = session_with_enemy(EnemyClass::Large, 0.0, 0.0);
    s.score = 10;
    s.pickup.body.y = 300.0;
    s.player.projectile.fire(350.0, 400.0);
    s.tick(idle(), &mut seeded_rng(), &mut RecordingAudio::default());
    assert!(s.pickup.claimed);

    // Below the new goal nothing happens.
    s.tick(idle(), &mut seeded_rng(), &mut RecordingAudio::default());
    assert!(s.pickup.claimed);

    s.score = 20;
    s.tick(idle(), &mut seeded_rng(), &mut RecordingAudio::default());
    assert!(!s.pickup.claimed);
    assert_eq!(s.pickup.body.y, -80.0);
}

#[test]
fn expired_heart_is_replaced_without_raising_goal() {
    let mut s = session_with_enemy(EnemyClass::Large, 0.0, 0.0);
    s.score = 10;
    s.pickup.body.y = 979.0;
    s.tick(idle(), &mut seeded_rng(), &mut RecordingAudio::default());
    assert!(s.pickup.claimed);
    s.tick(idle(), &mut seeded_rng(), &mut RecordingAudio::default());
    assert!(!s.pickup.claimed);
    assert_eq!(s.goal, 10);
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[test]
fn same_seed_same_game() {
    let run = || {
        let mut s = Session::new();
        let mut rng = seeded_rng();
        let mut audio = RecordingAudio::default();
        for i in 0..300 {
            let fire = i % 7 == 0;
            s.tick(Controls { left: i % 50 < 25, right: false, fire }, &mut rng, &mut audio);
        }
        (s.score, s.player.health, s.enemies.iter().map(|e| e.body.x).collect::<Vec<_>>())
    };
    assert_eq!(run(), run());
}
