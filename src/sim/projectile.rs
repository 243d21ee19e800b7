//! Projectile object pool
//!
//! A fixed arena of projectile slots allocated once per session. Slots are
//! toggled between free and in flight, never created or destroyed.

use serde::{Deserialize, Serialize};

use super::collision::{Bounds, Rect};
use crate::consts::*;

/// A single projectile slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Upward pixels per tick
    pub speed: f32,
    pub free: bool,
}

impl Default for Projectile {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: PROJECTILE_WIDTH,
            height: PROJECTILE_HEIGHT,
            speed: PROJECTILE_SPEED,
            free: true,
        }
    }
}

impl Projectile {
    /// Launch from a muzzle point: centered on `x`, top edge at `y`
    pub fn start(&mut self, x: f32, y: f32) {
        self.x = x - self.width * 0.5;
        self.y = y;
        self.free = false;
    }

    /// Return the slot to the pool
    pub fn reset(&mut self) {
        self.free = true;
    }

    fn update(&mut self) {
        if self.free {
            return;
        }
        self.y -= self.speed;
        if self.y < -self.height {
            self.reset();
        }
    }
}

impl Bounds for Projectile {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Fixed-capacity pool of projectiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectilePool {
    slots: Vec<Projectile>,
}

impl ProjectilePool {
    /// Allocate `capacity` free slots. Capacity is validated by `Settings`.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Projectile::default(); capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn free_count(&self) -> usize {
        self.slots.iter().filter(|p| p.free).count()
    }

    /// First free slot, or `None` when every projectile is in flight
    pub fn acquire(&mut self) -> Option<&mut Projectile> {
        self.slots.iter_mut().find(|p| p.free)
    }

    /// Advance every projectile in flight, releasing those past the top edge
    pub fn tick(&mut self) {
        for projectile in &mut self.slots {
            projectile.update();
        }
    }

    /// Release every slot
    pub fn reset_all(&mut self) {
        for projectile in &mut self.slots {
            projectile.reset();
        }
    }

    pub fn in_flight(&self) -> impl Iterator<Item = &Projectile> {
        self.slots.iter().filter(|p| !p.free)
    }

    pub fn in_flight_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.slots.iter_mut().filter(|p| !p.free)
    }

    pub fn slots(&self) -> &[Projectile] {
        &self.slots
    }
}
