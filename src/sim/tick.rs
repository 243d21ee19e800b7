//! Simulation tick
//!
//! Advances the game by one frame. The host owns the frame loop and hands in
//! a snapshot of held keys each time; nothing here assumes a frame rate.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};

/// Keys the core reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Fire,
    Restart,
}

impl Key {
    /// Map a host key name (`KeyboardEvent.key`) to a game key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "1" => Some(Key::Fire),
            "r" | "R" => Some(Key::Restart),
            _ => None,
        }
    }
}

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Keys currently held down
    pub keys: BTreeSet<Key>,
}

impl TickInput {
    pub fn holding(keys: &[Key]) -> Self {
        Self {
            keys: keys.iter().copied().collect(),
        }
    }

    #[inline]
    pub fn is_held(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    pub fn press(&mut self, key: Key) {
        self.keys.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.keys.remove(&key);
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Fire and restart act once per press, not while held
    let pressed = |key: Key| input.is_held(key) && !state.prev_keys.contains(&key);
    let fire = pressed(Key::Fire);
    let restart = pressed(Key::Restart);
    state.prev_keys = input.keys.clone();

    if restart {
        state.restart();
    }
    if fire && state.player.shoot(&mut state.projectiles) {
        state.events.push(GameEvent::ShotFired);
    }

    state.time_ticks += 1;

    state.player.update(input, state.settings.canvas_width);
    state.projectiles.tick();

    // Waves spawned this tick are first updated on the next one
    let active = state.waves.len();
    for i in 0..active {
        {
            let (waves, mut world) = state.split_world();
            waves[i].update(&mut world);
        }

        let game_over = state.is_game_over();
        let wave = &mut state.waves[i];
        if wave.is_empty() && !wave.next_wave_triggered && !game_over {
            wave.next_wave_triggered = true;
            state.new_wave();
            state.wave_count += 1;
            state.player.lives += 1;
            state.events.push(GameEvent::WaveCleared {
                next_wave: state.wave_count,
            });
        }
    }

    // Exhausted waves have handed over to their successor
    state
        .waves
        .retain(|w| !(w.is_empty() && w.next_wave_triggered));
}
