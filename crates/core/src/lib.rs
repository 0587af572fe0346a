//! Deterministic seed-to-content resolution for a run: seed hashing, a seeded
//! random stream, layered map generation, and left/right boss path selection.

pub mod bosses;
pub mod mapgen;
pub mod random;
pub mod resolver;
pub mod run_file;
pub mod scenes;
pub mod seed;

pub use bosses::{BOSS_CATALOG, BossLocation, final_boss, sin_bosses};
pub use mapgen::{
    GenerationRules, Layer, Map, MapGenerator, Node, NodeType, PropertyValue, RulesPreset,
    generate_map,
};
pub use random::DeterministicRandom;
pub use resolver::{BossPathResolver, PathPhase, PathState};
pub use run_file::RunStateFile;
pub use scenes::SceneRoute;
pub use seed::{SeedHash, runtime_seed, seed_hash};
