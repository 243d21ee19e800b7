//! Game state and core simulation types
//!
//! Everything a session owns lives here, so a `GameState` can be cloned,
//! compared or serialized as a snapshot.

use std::collections::BTreeSet;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::player::Player;
use super::projectile::ProjectilePool;
use super::tick::Key;
use super::wave::{Formation, Wave};
use crate::consts::*;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Run ended, waiting for a restart
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// An enemy collision took the last life
    OutOfLives,
    /// An enemy reached the bottom of the canvas
    Breached,
}

/// Notable things that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired,
    EnemyDestroyed { points: u32 },
    PlayerHit { lives_left: u32 },
    WaveCleared { next_wave: u32 },
    GameOver { reason: GameOverReason },
    Restarted,
}

/// Mutable view of the shared state an enemy may touch during its update
pub struct World<'a> {
    pub projectiles: &'a mut ProjectilePool,
    pub player: &'a mut Player,
    pub score: &'a mut u32,
    pub phase: &'a mut GamePhase,
    pub events: &'a mut Vec<GameEvent>,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl World<'_> {
    #[inline]
    pub fn is_game_over(&self) -> bool {
        *self.phase == GamePhase::GameOver
    }

    /// Transition to `GameOver`; repeated calls are ignored
    pub fn end_game(&mut self, reason: GameOverReason) {
        if self.is_game_over() {
            return;
        }
        *self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { reason });
        log::info!("Game over ({:?}) with score {}", reason, self.score);
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub settings: Settings,
    pub phase: GamePhase,
    pub score: u32,
    /// Current wave number (1-based)
    pub wave_count: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Difficulty knobs for the next formation
    pub columns: u32,
    pub rows: u32,
    pub enemy_size: f32,
    pub player: Player,
    pub projectiles: ProjectilePool,
    /// Active waves; an exhausted wave lingers only until its successor spawns
    pub waves: Vec<Wave>,
    /// Keys held on the previous tick, for edge-triggered actions
    pub(crate) prev_keys: BTreeSet<Key>,
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Start a session. Fails if the settings are unusable.
    pub fn new(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            score: 0,
            wave_count: 1,
            time_ticks: 0,
            columns: settings.start_columns,
            rows: settings.start_rows,
            enemy_size: settings.enemy_size,
            player: Player::new(
                settings.canvas_width,
                settings.canvas_height,
                settings.player_speed,
            ),
            projectiles: ProjectilePool::new(settings.projectile_pool_size),
            waves: Vec::new(),
            prev_keys: BTreeSet::new(),
            events: Vec::new(),
            settings,
        };
        state.spawn_wave();

        log::info!(
            "Session started with seed {} ({}x{} formation)",
            seed,
            state.columns,
            state.rows
        );
        Ok(state)
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn formation(&self) -> Formation {
        Formation {
            columns: self.columns,
            rows: self.rows,
        }
    }

    /// Split out the waves from the shared state their enemies act on
    pub(crate) fn split_world(&mut self) -> (&mut [Wave], World<'_>) {
        let world = World {
            projectiles: &mut self.projectiles,
            player: &mut self.player,
            score: &mut self.score,
            phase: &mut self.phase,
            events: &mut self.events,
            canvas_width: self.settings.canvas_width,
            canvas_height: self.settings.canvas_height,
        };
        (self.waves.as_mut_slice(), world)
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Push a wave built from the current difficulty knobs
    pub(crate) fn spawn_wave(&mut self) {
        let wave = Wave::new(
            self.formation(),
            self.enemy_size,
            self.settings.wave_speed,
            self.settings.canvas_width,
            &mut self.rng,
        );
        self.waves.push(wave);
    }

    /// Grow the formation along one axis, then spawn it.
    ///
    /// Columns and rows each stop growing once the formation would fill
    /// 80% of the canvas width or 60% of its height.
    pub(crate) fn new_wave(&mut self) {
        let width_cap = self.settings.canvas_width * MAX_FORMATION_WIDTH_RATIO;
        let height_cap = self.settings.canvas_height * MAX_FORMATION_HEIGHT_RATIO;

        if self.rng.random_bool(0.5) && self.columns as f32 * self.enemy_size < width_cap {
            self.columns += 1;
        } else if (self.rows as f32 * self.enemy_size) < height_cap {
            self.rows += 1;
        }

        log::info!(
            "Wave {} spawning ({}x{} formation)",
            self.wave_count + 1,
            self.columns,
            self.rows
        );
        self.spawn_wave();
    }

    /// Start over from `GameOver`. Ignored (returns false) while playing.
    pub fn restart(&mut self) -> bool {
        if !self.is_game_over() {
            return false;
        }

        self.player
            .restart(self.settings.canvas_width, self.settings.canvas_height);
        self.projectiles.reset_all();
        self.columns = self.settings.restart_columns;
        self.rows = self.settings.restart_rows;
        self.enemy_size = self.settings.enemy_size;
        self.waves.clear();
        self.spawn_wave();
        self.wave_count = 1;
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Restarted);

        log::info!("Game restarted");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let state = GameState::new(Settings::default(), 12345).unwrap();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.wave_count, 1);
        assert_eq!(state.player.lives, PLAYER_LIVES);
        assert_eq!(state.waves.len(), 1);
        assert_eq!(
            state.waves[0].enemies.len(),
            (START_COLUMNS * START_ROWS) as usize
        );
        assert_eq!(state.projectiles.capacity(), PROJECTILE_POOL_SIZE);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            projectile_pool_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            GameState::new(settings, 1),
            Err(ConfigError::EmptyPool)
        ));

        let settings = Settings {
            start_columns: 70_000,
            start_rows: 70_000,
            ..Default::default()
        };
        assert!(matches!(
            GameState::new(settings, 1),
            Err(ConfigError::FormationTooLarge { .. })
        ));
    }

    #[test]
    fn test_new_wave_grows_one_axis() {
        let mut state = GameState::new(Settings::default(), 3).unwrap();
        state.columns = 2;
        state.rows = 2;

        state.new_wave();
        assert_eq!(state.columns + state.rows, 5);
        assert_eq!(state.waves.len(), 2);
    }

    #[test]
    fn test_new_wave_respects_caps() {
        let mut state = GameState::new(Settings::default(), 9).unwrap();
        // 8 * 60 = 480 = 80% of 600, 8 * 60 = 480 = 60% of 800
        state.columns = 8;
        state.rows = 8;

        for _ in 0..20 {
            state.new_wave();
        }
        assert_eq!(state.columns, 8);
        assert_eq!(state.rows, 8);
    }

    #[test]
    fn test_growth_stays_below_caps() {
        let mut state = GameState::new(Settings::default(), 77).unwrap();
        state.columns = 1;
        state.rows = 1;

        for _ in 0..50 {
            state.new_wave();
            state.waves.clear();
        }
        assert_eq!(state.columns, 8);
        assert_eq!(state.rows, 8);
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut state = GameState::new(Settings::default(), 5).unwrap();
        state.score = 10;
        assert!(!state.restart());
        assert_eq!(state.score, 10);
        assert_eq!(state.waves[0].enemies.len(), 55);

        state.phase = GamePhase::GameOver;
        state.wave_count = 4;
        state.player.lives = 0;
        assert!(state.restart());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.wave_count, 1);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.waves.len(), 1);
        assert_eq!(
            state.waves[0].enemies.len(),
            (RESTART_COLUMNS * RESTART_ROWS) as usize
        );
        assert_eq!(state.drain_events(), vec![GameEvent::Restarted]);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let state = GameState::new(Settings::default(), 2024).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.seed, state.seed);
        assert_eq!(restored.waves[0].enemies, state.waves[0].enemies);
        assert_eq!(restored.player, state.player);
    }
}
