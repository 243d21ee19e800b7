//! Enemies and their collision reactions

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Bounds, Rect, overlaps};
use super::state::{GameEvent, GameOverReason, World};
use crate::render::Sprite;

/// Enemy variants. Formation and collision code only see the box and hit
/// points, so a new kind is a new arm here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Beetlemorph,
}

impl EnemyKind {
    pub fn max_hit_points(&self) -> u32 {
        match self {
            EnemyKind::Beetlemorph => 1,
        }
    }

    /// Last frame of the death animation
    pub fn max_death_frame(&self) -> u32 {
        match self {
            EnemyKind::Beetlemorph => 2,
        }
    }

    /// Number of alternative sprite rows to pick from at spawn
    pub fn sprite_rows(&self) -> u32 {
        match self {
            EnemyKind::Beetlemorph => 4,
        }
    }
}

/// A single member of a wave formation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Absolute position, recomputed every tick from the formation origin
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Fixed offset within the formation
    pub position_x: f32,
    pub position_y: f32,
    pub hit_points: u32,
    pub max_hit_points: u32,
    /// Progress through the death animation
    pub death_frame: u32,
    /// Sprite row, chosen once at spawn
    pub frame_y: u32,
    pub marked_for_deletion: bool,
}

impl Enemy {
    pub fn new<R: Rng>(
        kind: EnemyKind,
        size: f32,
        position_x: f32,
        position_y: f32,
        rng: &mut R,
    ) -> Self {
        Self {
            kind,
            x: 0.0,
            y: 0.0,
            width: size,
            height: size,
            position_x,
            position_y,
            hit_points: kind.max_hit_points(),
            max_hit_points: kind.max_hit_points(),
            death_frame: 0,
            frame_y: rng.random_range(0..kind.sprite_rows()),
            marked_for_deletion: false,
        }
    }

    /// Out of hit points and playing the death animation
    #[inline]
    pub fn is_dying(&self) -> bool {
        self.hit_points < 1
    }

    pub fn hit(&mut self, damage: u32) {
        self.hit_points = self.hit_points.saturating_sub(damage);
    }

    pub fn sprite(&self) -> Sprite {
        Sprite {
            kind: self.kind,
            frame_x: self.death_frame,
            frame_y: self.frame_y,
        }
    }

    /// Follow the formation and resolve this tick's collisions.
    ///
    /// Checks run in a fixed order without short-circuiting: projectiles,
    /// death animation, player contact, bottom edge.
    pub fn update(&mut self, origin: Vec2, world: &mut World) {
        self.x = origin.x + self.position_x;
        self.y = origin.y + self.position_y;
        let bounds = self.bounds();
        // Only an enemy that entered this tick already dying spares the player
        let was_dying = self.is_dying();

        // Projectiles, including against enemies already dying
        for projectile in world.projectiles.in_flight_mut() {
            if overlaps(&bounds, &*projectile) {
                self.hit(1);
                projectile.reset();
            }
        }

        if self.is_dying() {
            self.death_frame += 1;
            if self.death_frame > self.kind.max_death_frame() && !self.marked_for_deletion {
                self.marked_for_deletion = true;
                if !world.is_game_over() {
                    *world.score += self.max_hit_points;
                    world.events.push(GameEvent::EnemyDestroyed {
                        points: self.max_hit_points,
                    });
                }
            }
        }

        if !was_dying && overlaps(&bounds, &*world.player) {
            self.marked_for_deletion = true;
            // Crashing into the ship after the game ended costs a point
            if world.is_game_over() && *world.score > 0 {
                *world.score -= 1;
            }
            world.player.lives = world.player.lives.saturating_sub(1);
            world.events.push(GameEvent::PlayerHit {
                lives_left: world.player.lives,
            });
            if world.player.lives < 1 {
                world.end_game(GameOverReason::OutOfLives);
            }
        }

        if bounds.bottom() > world.canvas_height {
            world.end_game(GameOverReason::Breached);
            self.marked_for_deletion = true;
        }
    }
}

impl Bounds for Enemy {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::player::Player;
    use crate::sim::projectile::ProjectilePool;
    use crate::sim::state::GamePhase;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Fixture {
        projectiles: ProjectilePool,
        player: Player,
        score: u32,
        phase: GamePhase,
        events: Vec<GameEvent>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                projectiles: ProjectilePool::new(PROJECTILE_POOL_SIZE),
                player: Player::new(CANVAS_WIDTH, CANVAS_HEIGHT, PLAYER_SPEED),
                score: 0,
                phase: GamePhase::Playing,
                events: Vec::new(),
            }
        }

        fn world(&mut self) -> World<'_> {
            World {
                projectiles: &mut self.projectiles,
                player: &mut self.player,
                score: &mut self.score,
                phase: &mut self.phase,
                events: &mut self.events,
                canvas_width: CANVAS_WIDTH,
                canvas_height: CANVAS_HEIGHT,
            }
        }
    }

    fn enemy() -> Enemy {
        let mut rng = Pcg32::seed_from_u64(7);
        Enemy::new(EnemyKind::Beetlemorph, ENEMY_SIZE, 0.0, 0.0, &mut rng)
    }

    #[test]
    fn test_new_enemy() {
        let enemy = enemy();
        assert_eq!(enemy.hit_points, 1);
        assert_eq!(enemy.max_hit_points, 1);
        assert!(enemy.frame_y < 4);
        assert!(!enemy.is_dying());
    }

    #[test]
    fn test_follows_formation_origin() {
        let mut fx = Fixture::new();
        let mut enemy = enemy();
        enemy.position_x = 60.0;
        enemy.position_y = 120.0;
        enemy.update(Vec2::new(10.0, 20.0), &mut fx.world());
        assert_eq!((enemy.x, enemy.y), (70.0, 140.0));
    }

    #[test]
    fn test_projectile_kill_scores_after_death_animation() {
        let mut fx = Fixture::new();
        let mut enemy = enemy();
        let origin = Vec2::new(100.0, 100.0);
        fx.projectiles.acquire().unwrap().start(130.0, 110.0);

        // Hit tick: projectile consumed, animation starts
        enemy.update(origin, &mut fx.world());
        assert!(enemy.is_dying());
        assert_eq!(fx.projectiles.free_count(), PROJECTILE_POOL_SIZE);
        assert!(!enemy.marked_for_deletion);

        let max = EnemyKind::Beetlemorph.max_death_frame();
        for _ in 1..max {
            enemy.update(origin, &mut fx.world());
            assert!(!enemy.marked_for_deletion);
        }
        enemy.update(origin, &mut fx.world());
        assert!(enemy.marked_for_deletion);
        assert_eq!(fx.score, 1);
        assert_eq!(fx.events, vec![GameEvent::EnemyDestroyed { points: 1 }]);
    }

    #[test]
    fn test_dying_enemy_still_absorbs_projectiles() {
        let mut fx = Fixture::new();
        let mut enemy = enemy();
        enemy.hit(1);
        fx.projectiles.acquire().unwrap().start(30.0, 10.0);

        enemy.update(Vec2::ZERO, &mut fx.world());
        assert_eq!(enemy.hit_points, 0);
        assert_eq!(fx.projectiles.in_flight().count(), 0);
    }

    #[test]
    fn test_player_collision_costs_a_life() {
        let mut fx = Fixture::new();
        let mut enemy = enemy();
        let origin = Vec2::new(fx.player.x, fx.player.y - 10.0);

        enemy.update(origin, &mut fx.world());
        assert!(enemy.marked_for_deletion);
        assert_eq!(fx.player.lives, 2);
        assert_eq!(fx.phase, GamePhase::Playing);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut fx = Fixture::new();
        fx.player.lives = 1;
        let mut enemy = enemy();
        let origin = Vec2::new(fx.player.x, fx.player.y - 10.0);

        enemy.update(origin, &mut fx.world());
        assert_eq!(fx.player.lives, 0);
        assert_eq!(fx.phase, GamePhase::GameOver);
        assert!(fx.events.contains(&GameEvent::GameOver {
            reason: GameOverReason::OutOfLives
        }));
    }

    #[test]
    fn test_dying_enemy_ignores_player() {
        let mut fx = Fixture::new();
        let mut enemy = enemy();
        enemy.hit(1);
        let origin = Vec2::new(fx.player.x, fx.player.y - 10.0);

        enemy.update(origin, &mut fx.world());
        assert_eq!(fx.player.lives, 3);
    }

    #[test]
    fn test_shot_and_ram_on_same_tick_both_apply() {
        let mut fx = Fixture::new();
        let mut enemy = enemy();
        let origin = Vec2::new(fx.player.x, fx.player.y - 10.0);
        fx.projectiles
            .acquire()
            .unwrap()
            .start(origin.x + ENEMY_SIZE * 0.5, origin.y + 10.0);

        enemy.update(origin, &mut fx.world());
        assert_eq!(enemy.hit_points, 0);
        assert_eq!(fx.projectiles.in_flight().count(), 0);
        assert!(enemy.marked_for_deletion);
        assert_eq!(fx.player.lives, 2);
        assert_eq!(fx.events, vec![GameEvent::PlayerHit { lives_left: 2 }]);
    }

    #[test]
    fn test_collision_after_game_over_costs_a_point() {
        let mut fx = Fixture::new();
        fx.phase = GamePhase::GameOver;
        fx.score = 5;
        let mut enemy = enemy();
        let origin = Vec2::new(fx.player.x, fx.player.y - 10.0);

        enemy.update(origin, &mut fx.world());
        assert_eq!(fx.score, 4);

        // Never below zero
        fx.score = 0;
        let mut enemy = self::enemy();
        enemy.update(origin, &mut fx.world());
        assert_eq!(fx.score, 0);
    }

    #[test]
    fn test_no_points_after_game_over() {
        let mut fx = Fixture::new();
        fx.phase = GamePhase::GameOver;
        let mut enemy = enemy();
        enemy.hit(1);
        for _ in 0..=EnemyKind::Beetlemorph.max_death_frame() {
            enemy.update(Vec2::ZERO, &mut fx.world());
        }
        assert!(enemy.marked_for_deletion);
        assert_eq!(fx.score, 0);
    }

    #[test]
    fn test_bottom_breach_ends_game() {
        let mut fx = Fixture::new();
        // Keep clear of the player horizontally
        fx.player.x = -PLAYER_WIDTH / 2.0;
        let mut enemy = enemy();
        let origin = Vec2::new(400.0, CANVAS_HEIGHT - ENEMY_SIZE + 1.0);

        enemy.update(origin, &mut fx.world());
        assert!(enemy.marked_for_deletion);
        assert_eq!(fx.phase, GamePhase::GameOver);
        assert_eq!(fx.player.lives, 3);
        assert_eq!(
            fx.events,
            vec![GameEvent::GameOver {
                reason: GameOverReason::Breached
            }]
        );
    }
}
