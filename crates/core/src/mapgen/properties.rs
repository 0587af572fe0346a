//! Per-node metadata rolls. Draw order here is part of the output contract:
//! reordering any roll changes every map generated afterwards.

use std::collections::BTreeMap;

use super::model::{NodeType, PropertyValue};
use super::rules::GenerationRules;
use crate::random::DeterministicRandom;

pub mod keys {
    pub const DIFFICULTY: &str = "difficulty";
    pub const REWARD_MULTIPLIER: &str = "reward_multiplier";
    pub const ENEMY_COUNT: &str = "enemy_count";
    pub const IS_OPTIONAL: &str = "is_optional";
    pub const VARIANT: &str = "variant";
    pub const SHOP_DISCOUNT: &str = "shop_discount";
    pub const HEAL_FRACTION: &str = "heal_fraction";
    pub const BOSS: &str = "boss";
    pub const PHASE_COUNT: &str = "phase_count";
}

const COMBAT_VARIANTS: &[&str] = &["ambush", "patrol", "swarm", "sentries"];
const ELITE_VARIANTS: &[&str] = &["champion", "twin_guard", "warden"];
const EVENT_VARIANTS: &[&str] = &["shrine", "wanderer", "riddle", "altar", "merchant_ghost"];
const TREASURE_VARIANTS: &[&str] = &["chest", "cache", "reliquary"];
const SHOP_VARIANTS: &[&str] = &["peddler", "smithy", "apothecary"];
const REST_VARIANTS: &[&str] = &["campfire", "spring"];
const BOSS_VARIANTS: &[&str] = &["arena"];

pub(super) struct NodeRollContext<'a> {
    pub(super) rules: &'a GenerationRules,
    pub(super) node_type: NodeType,
    pub(super) layer_index: usize,
    pub(super) boss: &'a str,
}

pub(super) fn roll_properties(
    rng: &mut DeterministicRandom,
    context: &NodeRollContext<'_>,
) -> BTreeMap<String, PropertyValue> {
    let mut properties = BTreeMap::new();

    let layer_difficulty = context.rules.base_difficulty
        + context.rules.difficulty_per_layer * context.layer_index as f64;
    let jitter = rng.next_double() * 0.25;
    let difficulty = (layer_difficulty + jitter) * difficulty_factor(context.node_type);
    insert(&mut properties, keys::DIFFICULTY, PropertyValue::Double(difficulty));

    let reward = (1.0 + rng.next_float() * 0.5) * reward_factor(context.node_type);
    insert(&mut properties, keys::REWARD_MULTIPLIER, PropertyValue::Float(reward));

    let (min_enemies, max_enemies) = enemy_bounds(context.node_type);
    let enemy_count = rng.next_int_range(min_enemies, max_enemies + 1);
    insert(&mut properties, keys::ENEMY_COUNT, PropertyValue::Int(i64::from(enemy_count)));

    let is_optional = match context.node_type {
        NodeType::Event | NodeType::Treasure => rng.next_bool(0.5),
        _ => false,
    };
    insert(&mut properties, keys::IS_OPTIONAL, PropertyValue::Bool(is_optional));

    let variants = variants_for(context.node_type);
    let variant = variants[rng.next_index(variants.len())];
    insert(&mut properties, keys::VARIANT, PropertyValue::Text(variant.to_string()));

    match context.node_type {
        NodeType::Shop => {
            let discount = 0.05 + rng.next_float() * 0.2;
            insert(&mut properties, keys::SHOP_DISCOUNT, PropertyValue::Float(discount));
        }
        NodeType::Rest => {
            let heal = 0.25 + rng.next_double() * 0.25;
            insert(&mut properties, keys::HEAL_FRACTION, PropertyValue::Double(heal));
        }
        NodeType::Boss => {
            insert(&mut properties, keys::BOSS, PropertyValue::Text(context.boss.to_string()));
            let phases = 1 + i64::from(rng.next_int_range(1, 3)) + (context.layer_index / 3) as i64;
            insert(&mut properties, keys::PHASE_COUNT, PropertyValue::Int(phases));
        }
        _ => {}
    }

    properties
}

fn insert(properties: &mut BTreeMap<String, PropertyValue>, key: &str, value: PropertyValue) {
    properties.insert(key.to_string(), value);
}

fn difficulty_factor(node_type: NodeType) -> f64 {
    match node_type {
        NodeType::Combat => 1.0,
        NodeType::Elite => 1.5,
        NodeType::Boss => 2.0,
        NodeType::Event | NodeType::Treasure => 0.5,
        NodeType::Shop | NodeType::Rest => 0.0,
    }
}

fn reward_factor(node_type: NodeType) -> f32 {
    match node_type {
        NodeType::Treasure => 2.0,
        NodeType::Elite => 1.5,
        NodeType::Boss => 3.0,
        _ => 1.0,
    }
}

fn enemy_bounds(node_type: NodeType) -> (i32, i32) {
    match node_type {
        NodeType::Combat => (2, 5),
        NodeType::Elite => (1, 3),
        NodeType::Boss => (1, 1),
        NodeType::Event => (0, 1),
        NodeType::Treasure | NodeType::Shop | NodeType::Rest => (0, 0),
    }
}

fn variants_for(node_type: NodeType) -> &'static [&'static str] {
    match node_type {
        NodeType::Combat => COMBAT_VARIANTS,
        NodeType::Elite => ELITE_VARIANTS,
        NodeType::Event => EVENT_VARIANTS,
        NodeType::Treasure => TREASURE_VARIANTS,
        NodeType::Shop => SHOP_VARIANTS,
        NodeType::Rest => REST_VARIANTS,
        NodeType::Boss => BOSS_VARIANTS,
    }
}
