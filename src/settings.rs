//! Game settings
//!
//! Everything tunable about a session. Defaults reproduce the classic layout;
//! hosts may override any field from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Session configuration, fixed for the lifetime of a `GameState`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Player ===
    /// Horizontal pixels per tick while an arrow key is held
    pub player_speed: f32,

    // === Projectiles ===
    /// Number of reusable projectile slots
    pub projectile_pool_size: usize,

    // === Enemy formation ===
    /// Edge length of a single enemy cell
    pub enemy_size: f32,
    /// Horizontal formation speed (pixels per tick)
    pub wave_speed: f32,
    /// Formation of the first wave in a fresh session
    pub start_columns: u32,
    pub start_rows: u32,
    /// Formation of the first wave after a restart
    pub restart_columns: u32,
    pub restart_rows: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            player_speed: PLAYER_SPEED,

            projectile_pool_size: PROJECTILE_POOL_SIZE,

            enemy_size: ENEMY_SIZE,
            wave_speed: WAVE_SPEED,
            start_columns: START_COLUMNS,
            start_rows: START_ROWS,
            restart_columns: RESTART_COLUMNS,
            restart_rows: RESTART_ROWS,
        }
    }
}

impl Settings {
    /// Default settings on a canvas of the given size
    pub fn with_canvas(width: f32, height: f32) -> Self {
        Self {
            canvas_width: width,
            canvas_height: height,
            ..Self::default()
        }
    }

    /// Parse settings from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject configurations that would make the simulation misbehave silently
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if !positive(self.canvas_width) || !positive(self.canvas_height) {
            return Err(ConfigError::Canvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if self.projectile_pool_size == 0 {
            return Err(ConfigError::EmptyPool);
        }

        for (name, value) in [
            ("player_speed", self.player_speed),
            ("enemy_size", self.enemy_size),
            ("wave_speed", self.wave_speed),
        ] {
            if !positive(value) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        self.validate_formation("start", self.start_columns, self.start_rows)?;
        self.validate_formation("restart", self.restart_columns, self.restart_rows)?;

        Ok(())
    }

    /// A formation needs at least one cell and must fit on the canvas
    fn validate_formation(
        &self,
        name: &'static str,
        columns: u32,
        rows: u32,
    ) -> Result<(), ConfigError> {
        if columns == 0 || rows == 0 {
            return Err(ConfigError::EmptyFormation { name });
        }
        if columns as f32 * self.enemy_size > self.canvas_width
            || rows as f32 * self.enemy_size > self.canvas_height
        {
            return Err(ConfigError::FormationTooLarge {
                name,
                columns,
                rows,
            });
        }
        Ok(())
    }
}
