//! Engine Configuration
//!
//! Tunable constants for placement, adjacency and the simulation tick.
//! Every field has a default, so a JSON file only needs the values it changes.
//!
//! ## Units
//! One world unit is one block. Items are `1 - space_between_items` wide so
//! that neighbors never share a surface exactly.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::BlockTypeId;
use crate::error::ConfigError;

/// Engine-wide tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Gap left between neighboring items (shrinks every shape)
    pub space_between_items: f64,
    /// Extra slack added to the spacing when matching coincident faces
    pub face_match_margin: f64,
    /// Scale applied to neighbor vertices about their origin during collision checks
    pub collision_shrink_factor: f64,
    /// Upper bound on simulation steps per second
    pub max_ticks_per_second: f64,
    /// Inclusive range of sphere rise speeds, in thousandths of a unit per tick
    pub sphere_rise_speed_thousandths: (u32, u32),
    /// A sphere despawns with probability `1 / sphere_despawn_one_in` each tick
    pub sphere_despawn_one_in: u32,
    /// Sphere tessellation around the Y axis
    pub sphere_segments: u32,
    /// Sphere tessellation from pole to pole
    pub sphere_rings: u32,
    /// Signal the persistence sink after every placement and removal
    pub autosave: bool,
    /// Block type of the seed item created for an empty world
    pub default_block_type: BlockTypeId,
    /// Fixed RNG seed (None = seeded from entropy)
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            space_between_items: 0.0002,
            face_match_margin: 0.001,
            collision_shrink_factor: 0.99,
            max_ticks_per_second: 100.0,
            sphere_rise_speed_thousandths: (1, 9),
            sphere_despawn_one_in: 999,
            sphere_segments: 16,
            sphere_rings: 8,
            autosave: true,
            default_block_type: 201,
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    /// Parses a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|source| ConfigError::Json {
            context: "engine config",
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Edge length of every item after spacing is removed.
    pub fn item_size(&self) -> f64 {
        1.0 - self.space_between_items
    }

    /// Per-axis tolerance for two face vertices to count as coincident.
    pub fn face_match_epsilon(&self) -> f64 {
        self.space_between_items + self.face_match_margin
    }

    /// Minimum wall-clock time between two simulation steps. Saturates at
    /// [`Duration::MAX`] for rates too slow to represent.
    pub fn min_tick_interval(&self) -> Duration {
        Duration::try_from_secs_f64(1.0 / self.max_ticks_per_second).unwrap_or(Duration::MAX)
    }

    /// Rejects values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::InvalidParameter {
                field,
                reason: reason.into(),
            }
        }

        if !(0.0..0.5).contains(&self.space_between_items) {
            return Err(invalid("space_between_items", "must be in [0, 0.5)"));
        }
        if self.face_match_margin.is_nan() || self.face_match_margin < 0.0 {
            return Err(invalid("face_match_margin", "must be non-negative"));
        }
        if !(self.collision_shrink_factor > 0.0 && self.collision_shrink_factor <= 1.0) {
            return Err(invalid("collision_shrink_factor", "must be in (0, 1]"));
        }
        if !(self.max_ticks_per_second > 0.0 && self.max_ticks_per_second.is_finite()) {
            return Err(invalid("max_ticks_per_second", "must be positive and finite"));
        }
        if Duration::try_from_secs_f64(1.0 / self.max_ticks_per_second).is_err() {
            return Err(invalid("max_ticks_per_second", "tick interval is too long to represent"));
        }
        let (low, high) = self.sphere_rise_speed_thousandths;
        if low == 0 || low > high {
            return Err(invalid(
                "sphere_rise_speed_thousandths",
                format!("range [{low}, {high}] must be non-empty and start above zero"),
            ));
        }
        if self.sphere_despawn_one_in == 0 {
            return Err(invalid("sphere_despawn_one_in", "must be at least 1"));
        }
        if self.sphere_segments < 3 {
            return Err(invalid("sphere_segments", "need at least 3 segments"));
        }
        if self.sphere_rings < 2 {
            return Err(invalid("sphere_rings", "need at least 2 rings"));
        }
        if self.face_match_epsilon() >= self.item_size() / 2.0 {
            log::warn!(
                "face match epsilon {} is large relative to item size {}",
                self.face_match_epsilon(),
                self.item_size()
            );
        }
        Ok(())
    }
}
