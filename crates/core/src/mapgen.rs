//! Procedural map generation split into rules, layer layout, and node property rolls.

pub mod model;
pub mod properties;
pub mod rules;

mod generator;
mod layout;

pub use generator::MapGenerator;
pub use model::{DOUBLE_EPSILON, FLOAT_EPSILON, Layer, Map, Node, NodeType, PropertyValue};
pub use rules::{GenerationRules, MAX_LAYERS, RulesError, RulesPreset};

/// `None` uses the balanced defaults.
pub fn generate_map(seed: &str, rules: Option<&GenerationRules>) -> Map {
    MapGenerator::new(rules.cloned().unwrap_or_default()).generate(seed)
}
