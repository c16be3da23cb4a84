/// Tunable game parameters.
///
/// Defaults reproduce the classic timing: 50 ticks per second, a grunt every
/// 200 ticks, the boss at tick 1000 and a 100-tick invulnerability window.
/// Any subset of fields may be overridden from a TOML file.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{GameError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Simulation ticks per second.
    pub tick_rate: u32,
    pub initial_lives: u32,
    /// Ticks during which further hits cost no life.
    pub invulnerable_ticks: u32,
    /// A grunt spawns whenever the tick counter is a multiple of this.
    pub enemy_spawn_interval: u64,
    /// Absolute tick on which the single boss arrives.
    pub boss_spawn_tick: u64,
    pub kill_reward: u32,
    pub point_item_bonus: u32,
    /// Probability that a kill drops a point item.
    pub point_item_chance: f64,
    pub player_speed: f32,
    pub boost_multiplier: f32,
    pub beam_speed: f32,
    pub kill_explosion_life: i32,
    pub hit_explosion_life: i32,
    pub game_over_pause_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            tick_rate: 50,
            initial_lives: 3,
            invulnerable_ticks: 100,
            enemy_spawn_interval: 200,
            boss_spawn_tick: 1000,
            kill_reward: 10,
            point_item_bonus: 50,
            point_item_chance: 0.1,
            player_speed: 10.0,
            boost_multiplier: 2.0,
            beam_speed: 10.0,
            kill_explosion_life: 100,
            hit_explosion_life: 10,
            game_over_pause_ms: 1000,
        }
    }
}

impl GameConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|err| match err {
            GameError::ConfigParse { source, .. } => GameError::ConfigParse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        info!(path = %path.display(), "loaded game config");
        Ok(config)
    }

    /// Parse and validate config text. Missing fields keep their defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(text).map_err(|source| GameError::ConfigParse {
            path: "<inline>".into(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_rate == 0 {
            return Err(GameError::InvalidConfig("tick_rate must be positive".into()));
        }
        if self.enemy_spawn_interval == 0 {
            return Err(GameError::InvalidConfig(
                "enemy_spawn_interval must be positive".into(),
            ));
        }
        if self.initial_lives == 0 {
            return Err(GameError::InvalidConfig("initial_lives must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.point_item_chance) {
            return Err(GameError::InvalidConfig(format!(
                "point_item_chance {} is outside [0, 1]",
                self.point_item_chance
            )));
        }
        for (name, value) in [
            ("player_speed", self.player_speed),
            ("beam_speed", self.beam_speed),
            ("boost_multiplier", self.boost_multiplier),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GameError::InvalidConfig(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}
