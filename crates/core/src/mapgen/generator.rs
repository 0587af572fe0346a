//! High-level map generation orchestration that composes the boss plan and layers.

use log::debug;

use super::layout::{LayerContext, build_layer, plan_layer_bosses};
use super::model::Map;
use super::rules::GenerationRules;
use crate::random::DeterministicRandom;
use crate::seed::{runtime_seed, seed_hash};

/// Offsets each layer's sub-stream so layers draw independently of each other.
const LAYER_STREAM_BASE: u64 = 0x4C41_5945_5200_0000;

#[derive(Clone, Debug, Default)]
pub struct MapGenerator {
    rules: GenerationRules,
}

impl MapGenerator {
    pub fn new(rules: GenerationRules) -> Self {
        Self { rules: rules.normalized() }
    }

    pub fn rules(&self) -> &GenerationRules {
        &self.rules
    }

    /// An empty `seed` draws a fresh runtime seed, which becomes `Map::seed`.
    pub fn generate(&self, seed: &str) -> Map {
        let seed = if seed.is_empty() {
            let fresh = runtime_seed();
            debug!("empty seed requested, drew runtime seed {fresh}");
            fresh
        } else {
            seed.to_string()
        };

        let hash = seed_hash(&seed);
        let mut plan_rng = DeterministicRandom::new(hash);
        let plan = plan_layer_bosses(&mut plan_rng, self.rules.layer_count);

        let layers = plan
            .into_iter()
            .enumerate()
            .map(|(layer_index, boss)| {
                let mut layer_rng =
                    DeterministicRandom::derive(hash, LAYER_STREAM_BASE + layer_index as u64);
                build_layer(
                    &mut layer_rng,
                    &LayerContext { rules: &self.rules, layer_index, boss },
                )
            })
            .collect();

        let map = Map { seed, layers };
        debug!(
            "generated map seed={:?} hash={hash} layers={} nodes={}",
            map.seed,
            map.layers.len(),
            map.node_count()
        );
        map
    }
}
