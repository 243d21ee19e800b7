//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (waves in list order, enemies in formation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemy;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{Bounds, Rect, overlaps};
pub use enemy::{Enemy, EnemyKind};
pub use player::Player;
pub use projectile::{Projectile, ProjectilePool};
pub use state::{GameEvent, GameOverReason, GamePhase, GameState, World};
pub use tick::{Key, TickInput, tick};
pub use wave::{Formation, Wave};
