//! The player's ship

use serde::{Deserialize, Serialize};

use super::collision::{Bounds, Rect};
use super::projectile::ProjectilePool;
use super::tick::{Key, TickInput};
use crate::consts::*;

/// Horizontal-only avatar at the bottom of the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal pixels per tick
    pub speed: f32,
    pub lives: u32,
}

impl Player {
    pub fn new(canvas_width: f32, canvas_height: f32, speed: f32) -> Self {
        let mut player = Self {
            x: 0.0,
            y: 0.0,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed,
            lives: PLAYER_LIVES,
        };
        player.restart(canvas_width, canvas_height);
        player
    }

    /// Apply held arrow keys, then clamp so at most half the ship leaves the canvas
    pub fn update(&mut self, input: &TickInput, canvas_width: f32) {
        // Both arrows may be held at once and cancel out
        if input.is_held(Key::ArrowLeft) {
            self.x -= self.speed;
        }
        if input.is_held(Key::ArrowRight) {
            self.x += self.speed;
        }

        let half = self.width * 0.5;
        self.x = self.x.clamp(-half, canvas_width - half);
    }

    /// Fire from the muzzle point. Returns false if the pool is exhausted.
    pub fn shoot(&self, pool: &mut ProjectilePool) -> bool {
        match pool.acquire() {
            Some(projectile) => {
                projectile.start(self.bounds().center_x(), self.y);
                true
            }
            None => {
                log::debug!("Projectile pool exhausted, shot dropped");
                false
            }
        }
    }

    /// Back to center-bottom with a full set of lives
    pub fn restart(&mut self, canvas_width: f32, canvas_height: f32) {
        self.x = canvas_width * 0.5 - self.width * 0.5;
        self.y = canvas_height - self.height;
        self.lives = PLAYER_LIVES;
    }
}

impl Bounds for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}
