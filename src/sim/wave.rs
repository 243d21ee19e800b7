//! Enemy wave formations
//!
//! A wave is a rigid grid of enemies sharing one origin. It slides in from
//! above, sweeps side to side, and steps down every time it bounces off a wall.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, EnemyKind};
use super::state::World;
use crate::consts::WAVE_ENTRY_STEP;

/// Grid dimensions of a formation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formation {
    pub columns: u32,
    pub rows: u32,
}

/// One generation of enemies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wave {
    /// Formation origin (top-left)
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Per-tick movement; `y` is only non-zero on a wall bounce
    pub vel: Vec2,
    pub enemy_size: f32,
    pub enemies: Vec<Enemy>,
    /// Set once this wave has spawned its successor
    pub next_wave_triggered: bool,
}

impl Wave {
    /// Build a formation centered above the canvas, heading left or right at random
    pub fn new<R: Rng>(
        formation: Formation,
        enemy_size: f32,
        speed: f32,
        canvas_width: f32,
        rng: &mut R,
    ) -> Self {
        let width = formation.columns as f32 * enemy_size;
        let height = formation.rows as f32 * enemy_size;
        let speed_x = if rng.random_bool(0.5) { -speed } else { speed };

        let mut wave = Self {
            pos: Vec2::new(canvas_width * 0.5 - width * 0.5, -height),
            width,
            height,
            vel: Vec2::new(speed_x, 0.0),
            enemy_size,
            enemies: Vec::with_capacity(formation.columns as usize * formation.rows as usize),
            next_wave_triggered: false,
        };
        wave.create(formation, rng);
        wave
    }

    /// Lay out enemies row by row on a regular grid
    fn create<R: Rng>(&mut self, formation: Formation, rng: &mut R) {
        for row in 0..formation.rows {
            for col in 0..formation.columns {
                let offset_x = col as f32 * self.enemy_size;
                let offset_y = row as f32 * self.enemy_size;
                self.enemies.push(Enemy::new(
                    EnemyKind::Beetlemorph,
                    self.enemy_size,
                    offset_x,
                    offset_y,
                    rng,
                ));
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Move the formation, update every member, then drop the dead
    pub fn update(&mut self, world: &mut World) {
        // Slide in until fully on screen
        if self.pos.y < 0.0 {
            self.pos.y += WAVE_ENTRY_STEP;
        }

        self.vel.y = 0.0;
        if self.pos.x < 0.0 || self.pos.x > world.canvas_width - self.width {
            self.vel.x = -self.vel.x;
            self.vel.y = self.enemy_size;
        }
        self.pos += self.vel;

        for enemy in &mut self.enemies {
            enemy.update(self.pos, world);
        }
        self.enemies.retain(|e| !e.marked_for_deletion);
    }
}
