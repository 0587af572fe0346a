//! Layer planning: which boss closes each layer and how rooms spread over paths.

use log::trace;

use super::model::{Layer, Node, NodeType};
use super::properties::{NodeRollContext, roll_properties};
use super::rules::{GenerationRules, ROOM_TYPES};
use crate::bosses::{BossLocation, final_boss, sin_bosses};
use crate::random::DeterministicRandom;

/// Sin bosses in seeded order, truncated to fit, with the final boss last.
pub(super) fn plan_layer_bosses(
    rng: &mut DeterministicRandom,
    layer_count: usize,
) -> Vec<&'static BossLocation> {
    let mut order: Vec<&'static BossLocation> = sin_bosses().iter().collect();
    rng.shuffle(&mut order);
    order.truncate(layer_count.saturating_sub(1));
    order.push(final_boss());
    order
}

pub(super) struct LayerContext<'a> {
    pub(super) rules: &'a GenerationRules,
    pub(super) layer_index: usize,
    pub(super) boss: &'static BossLocation,
}

pub(super) fn build_layer(rng: &mut DeterministicRandom, context: &LayerContext<'_>) -> Layer {
    let rules = context.rules;
    let path_count = draw_inclusive(rng, rules.min_paths, rules.max_paths);
    let weights = rules.room_weights();

    let mut nodes = Vec::new();
    let mut longest_path = 0;
    for path_index in 0..path_count {
        let room_count =
            draw_inclusive(rng, rules.min_rooms_per_layer, rules.max_rooms_per_layer);
        longest_path = longest_path.max(room_count);
        for node_index in 0..room_count {
            let node_type = pick_room_type(rng, context, &weights, node_index, room_count);
            nodes.push(build_node(rng, context, node_type, path_index, node_index));
        }
    }

    nodes.push(build_node(rng, context, NodeType::Boss, 0, longest_path));
    trace!(
        "layer {} ({}): {} paths, {} nodes",
        context.layer_index,
        context.boss.boss,
        path_count,
        nodes.len()
    );

    Layer {
        layer_index: context.layer_index,
        boss: context.boss.boss.to_string(),
        location: context.boss.identifier.to_string(),
        nodes,
    }
}

fn pick_room_type(
    rng: &mut DeterministicRandom,
    context: &LayerContext<'_>,
    weights: &[u32; ROOM_TYPES.len()],
    node_index: usize,
    room_count: usize,
) -> NodeType {
    if context.layer_index == 0 && node_index == 0 {
        return NodeType::Combat;
    }
    if context.rules.rest_before_boss && node_index + 1 == room_count {
        return NodeType::Rest;
    }
    rng.choose_weighted(weights).map_or(NodeType::Combat, |index| ROOM_TYPES[index])
}

fn build_node(
    rng: &mut DeterministicRandom,
    context: &LayerContext<'_>,
    node_type: NodeType,
    path_index: usize,
    node_index: usize,
) -> Node {
    let roll_context = NodeRollContext {
        rules: context.rules,
        node_type,
        layer_index: context.layer_index,
        boss: context.boss.boss,
    };
    Node {
        id: node_id(context.layer_index, path_index, node_index),
        node_type,
        layer_index: context.layer_index,
        path_index,
        node_index,
        properties: roll_properties(rng, &roll_context),
    }
}

pub(super) fn node_id(layer_index: usize, path_index: usize, node_index: usize) -> String {
    format!("L{layer_index}-P{path_index}-N{node_index}")
}

fn draw_inclusive(rng: &mut DeterministicRandom, min: usize, max: usize) -> usize {
    min + rng.next_index(max.saturating_sub(min) + 1)
}
