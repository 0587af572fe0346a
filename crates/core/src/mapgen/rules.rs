//! Generation bounds and room-type weighting presets.
//!
//! Rules are plain data: they deserialize from TOML or JSON with every field
//! optional, and [`GenerationRules::normalized`] repairs inconsistent bounds
//! instead of rejecting them.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::NodeType;
use crate::bosses::SIN_BOSS_COUNT;

/// One layer per catalog encounter.
pub const MAX_LAYERS: usize = SIN_BOSS_COUNT + 1;
const MAX_PATHS: usize = 6;
const MAX_ROOMS_PER_PATH: usize = 12;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulesPreset {
    Safe,
    #[default]
    Balanced,
    Risky,
}

impl RulesPreset {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "safe" => Some(Self::Safe),
            "balanced" => Some(Self::Balanced),
            "risky" => Some(Self::Risky),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationRules {
    pub preset: RulesPreset,
    pub layer_count: usize,
    pub min_paths: usize,
    pub max_paths: usize,
    /// Lower bound on rooms along each path of a layer, boss node excluded.
    pub min_rooms_per_layer: usize,
    pub max_rooms_per_layer: usize,
    pub rest_before_boss: bool,
    pub base_difficulty: f64,
    pub difficulty_per_layer: f64,
}

impl Default for GenerationRules {
    fn default() -> Self {
        Self::balanced()
    }
}

impl GenerationRules {
    pub fn safe() -> Self {
        Self {
            preset: RulesPreset::Safe,
            layer_count: MAX_LAYERS,
            min_paths: 2,
            max_paths: 3,
            min_rooms_per_layer: 3,
            max_rooms_per_layer: 4,
            rest_before_boss: true,
            base_difficulty: 0.8,
            difficulty_per_layer: 0.15,
        }
    }

    pub fn balanced() -> Self {
        Self {
            preset: RulesPreset::Balanced,
            layer_count: MAX_LAYERS,
            min_paths: 2,
            max_paths: 4,
            min_rooms_per_layer: 3,
            max_rooms_per_layer: 6,
            rest_before_boss: false,
            base_difficulty: 1.0,
            difficulty_per_layer: 0.25,
        }
    }

    pub fn risky() -> Self {
        Self {
            preset: RulesPreset::Risky,
            layer_count: MAX_LAYERS,
            min_paths: 2,
            max_paths: 4,
            min_rooms_per_layer: 4,
            max_rooms_per_layer: 7,
            rest_before_boss: false,
            base_difficulty: 1.25,
            difficulty_per_layer: 0.35,
        }
    }

    pub fn for_preset(preset: RulesPreset) -> Self {
        match preset {
            RulesPreset::Safe => Self::safe(),
            RulesPreset::Balanced => Self::balanced(),
            RulesPreset::Risky => Self::risky(),
        }
    }

    /// Missing keys take the balanced defaults, not the named preset's.
    pub fn from_toml_str(text: &str) -> Result<Self, RulesError> {
        let rules: Self = toml::from_str(text).map_err(|e| RulesError::Toml(e.to_string()))?;
        Ok(rules.normalized())
    }

    pub fn from_json_str(text: &str) -> Result<Self, RulesError> {
        let rules: Self = serde_json::from_str(text).map_err(|e| RulesError::Json(e.to_string()))?;
        Ok(rules.normalized())
    }

    pub fn normalized(&self) -> Self {
        let (min_paths, max_paths) = ordered_bounds(self.min_paths, self.max_paths, MAX_PATHS);
        let (min_rooms, max_rooms) =
            ordered_bounds(self.min_rooms_per_layer, self.max_rooms_per_layer, MAX_ROOMS_PER_PATH);
        Self {
            preset: self.preset,
            layer_count: self.layer_count.clamp(1, MAX_LAYERS),
            min_paths,
            max_paths,
            min_rooms_per_layer: min_rooms,
            max_rooms_per_layer: max_rooms,
            rest_before_boss: self.rest_before_boss,
            base_difficulty: finite_or(self.base_difficulty, 1.0).max(0.0),
            difficulty_per_layer: finite_or(self.difficulty_per_layer, 0.25).max(0.0),
        }
    }

    /// Relative weights for non-boss rooms, in [`ROOM_TYPES`] order.
    pub(super) fn room_weights(&self) -> [u32; ROOM_TYPES.len()] {
        match self.preset {
            RulesPreset::Safe => [40, 5, 20, 10, 10, 15],
            RulesPreset::Balanced => [45, 12, 16, 9, 8, 10],
            RulesPreset::Risky => [45, 25, 14, 8, 4, 4],
        }
    }
}

pub(super) const ROOM_TYPES: [NodeType; 6] = [
    NodeType::Combat,
    NodeType::Elite,
    NodeType::Event,
    NodeType::Treasure,
    NodeType::Shop,
    NodeType::Rest,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    Toml(String),
    Json(String),
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toml(message) => write!(f, "invalid generation rules TOML: {message}"),
            Self::Json(message) => write!(f, "invalid generation rules JSON: {message}"),
        }
    }
}

impl Error for RulesError {}

fn ordered_bounds(min: usize, max: usize, ceiling: usize) -> (usize, usize) {
    let low = min.min(max).clamp(1, ceiling);
    let high = min.max(max).clamp(1, ceiling);
    (low, high)
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}
