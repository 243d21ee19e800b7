//! Configuration errors
//!
//! The simulation itself never fails at runtime; everything that can go wrong
//! is caught when a session is constructed.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("canvas must have positive finite dimensions, got {width}x{height}")]
    Canvas { width: f32, height: f32 },
    #[error("projectile pool must hold at least one projectile")]
    EmptyPool,
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} formation must have at least one column and one row")]
    EmptyFormation { name: &'static str },
    #[error("{name} formation of {columns}x{rows} enemies does not fit the canvas")]
    FormationTooLarge {
        name: &'static str,
        columns: u32,
        rows: u32,
    },
    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
