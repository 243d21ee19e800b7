//! Drawing seam
//!
//! The core decides what is drawn and where; the host implements `Surface`
//! on whatever it draws with (a canvas 2D context, a test recorder, ...).

use crate::sim::enemy::EnemyKind;
use crate::sim::{Bounds, Enemy, GameState, Player, ProjectilePool, Rect, Wave};

/// Cell of an enemy sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub kind: EnemyKind,
    /// Column: death animation frame
    pub frame_x: u32,
    /// Row: variant picked at spawn
    pub frame_y: u32,
}

/// 2D drawing target supplied by the host
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect);
    fn draw_sprite(&mut self, sprite: Sprite, dest: Rect);
}

/// Something that knows how to put itself on a `Surface`
pub trait Draw {
    fn draw(&self, surface: &mut dyn Surface);
}

impl Draw for Player {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.bounds());
    }
}

impl Draw for ProjectilePool {
    fn draw(&self, surface: &mut dyn Surface) {
        for projectile in self.in_flight() {
            surface.fill_rect(projectile.bounds());
        }
    }
}

impl Draw for Enemy {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_sprite(self.sprite(), self.bounds());
    }
}

impl Draw for Wave {
    fn draw(&self, surface: &mut dyn Surface) {
        for enemy in &self.enemies {
            enemy.draw(surface);
        }
    }
}

/// Status values read by the host's text renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub wave: u32,
    pub lives: u32,
    pub game_over: bool,
}

impl GameState {
    /// Draw the whole scene: player, projectiles, then waves in order
    pub fn render(&self, surface: &mut dyn Surface) {
        self.player.draw(surface);
        self.projectiles.draw(surface);
        for wave in &self.waves {
            wave.draw(surface);
        }
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            wave: self.wave_count,
            lives: self.player.lives,
            game_over: self.is_game_over(),
        }
    }
}
