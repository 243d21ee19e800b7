//! Beetle Waves - A fixed-camera wave shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `render`: Drawing seam implemented by the host
//! - `settings`: Validated game configuration
//! - `error`: Configuration errors

pub mod error;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use render::{Draw, Hud, Sprite, Surface};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default canvas dimensions
    pub const CANVAS_WIDTH: f32 = 600.0;
    pub const CANVAS_HEIGHT: f32 = 800.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 200.0;
    pub const PLAYER_HEIGHT: f32 = 100.0;
    pub const PLAYER_SPEED: f32 = 10.0;
    pub const PLAYER_LIVES: u32 = 3;

    /// Projectile defaults
    pub const PROJECTILE_WIDTH: f32 = 15.0;
    pub const PROJECTILE_HEIGHT: f32 = 20.0;
    pub const PROJECTILE_SPEED: f32 = 20.0;
    pub const PROJECTILE_POOL_SIZE: usize = 10;

    /// Enemy formation defaults
    pub const ENEMY_SIZE: f32 = 60.0;
    /// Opening formation of a fresh session
    pub const START_COLUMNS: u32 = 5;
    pub const START_ROWS: u32 = 11;
    /// Formation used after a restart
    pub const RESTART_COLUMNS: u32 = 2;
    pub const RESTART_ROWS: u32 = 2;
    /// Horizontal formation speed (pixels per tick)
    pub const WAVE_SPEED: f32 = 1.0;
    /// Descent per tick while a formation is still entering the screen
    pub const WAVE_ENTRY_STEP: f32 = 5.0;

    /// Formation growth caps (fraction of canvas size)
    pub const MAX_FORMATION_WIDTH_RATIO: f32 = 0.8;
    pub const MAX_FORMATION_HEIGHT_RATIO: f32 = 0.6;
}
