//! Boss selection for the two diverging run paths.
//!
//! Selection is a pure function of the persisted [`PathState`] and the path
//! side: the decision stream is derived from the seed hash and the set of
//! defeated bosses, so a reloaded state resumes with exactly the same picks
//! as the instance it was captured from.
//!
//! - Before convergence both sides draw from the remaining sin bosses; the
//!   left side takes the first entry of the seeded shuffle and the right side
//!   the second. With a single sin left, the right side is offered the final
//!   boss instead, so the sides differ whenever two or more bosses remain.
//! - Once all sin bosses are defeated the paths converge on the final boss.
//! - With nothing left available, selection yields `None`.

use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::bosses::{BOSS_CATALOG, BossLocation, catalog_index, final_boss, sin_bosses};
use crate::random::DeterministicRandom;
use crate::seed::{SeedHash, seed_hash};

const DECISION_STREAM_BASE: u64 = 0x5041_5448_0000_0000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathState {
    pub current_seed: String,
    pub defeated_bosses: BTreeSet<String>,
    /// Kept in catalog order.
    pub available_bosses: Vec<BossLocation>,
    pub is_paths_converged: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathPhase {
    Active,
    Converged,
    Exhausted,
}

impl PathState {
    pub fn new(seed: &str) -> Self {
        Self {
            current_seed: seed.to_string(),
            defeated_bosses: BTreeSet::new(),
            available_bosses: BOSS_CATALOG.to_vec(),
            is_paths_converged: false,
        }
    }

    pub fn phase(&self) -> PathPhase {
        if self.available_bosses.is_empty() {
            PathPhase::Exhausted
        } else if self.is_paths_converged {
            PathPhase::Converged
        } else {
            PathPhase::Active
        }
    }

    fn all_sins_defeated(&self) -> bool {
        sin_bosses().iter().all(|location| self.defeated_bosses.contains(location.boss))
    }

    fn defeated_mask(&self) -> u64 {
        self.defeated_bosses
            .iter()
            .filter_map(|boss| catalog_index(boss))
            .fold(0_u64, |mask, index| mask | (1_u64 << index))
    }
}

pub struct BossPathResolver {
    state: PathState,
    seed_hash: SeedHash,
}

impl BossPathResolver {
    pub fn new(seed: &str) -> Self {
        Self { state: PathState::new(seed), seed_hash: seed_hash(seed) }
    }

    pub fn reset_with_new_seed(&mut self, seed: &str) {
        self.state = PathState::new(seed);
        self.seed_hash = seed_hash(seed);
        debug!("boss paths reset with seed {seed:?} (hash {})", self.seed_hash);
    }

    pub fn select_next_boss(&self, use_left_path: bool) -> Option<&'static BossLocation> {
        if self.state.available_bosses.is_empty() {
            return None;
        }

        let final_available = self.state.available_bosses.iter().any(BossLocation::is_final);
        if self.state.is_paths_converged {
            return final_available.then(final_boss);
        }

        let mut pool: Vec<&'static BossLocation> = sin_bosses()
            .iter()
            .filter(|location| self.state.available_bosses.contains(location))
            .collect();
        if pool.is_empty() {
            return final_available.then(final_boss);
        }
        if pool.len() == 1 && final_available {
            // Last sin and the final boss split across the two paths.
            return Some(if use_left_path { pool[0] } else { final_boss() });
        }

        let mut rng = self.decision_rng();
        rng.shuffle(&mut pool);
        let picked = if use_left_path { pool[0] } else { pool.get(1).copied().unwrap_or(pool[0]) };
        debug!(
            "{} path picked {} from {} candidates",
            if use_left_path { "left" } else { "right" },
            picked.boss,
            pool.len()
        );
        Some(picked)
    }

    /// Unknown or already defeated names are ignored.
    pub fn mark_boss_as_defeated(&mut self, boss: &str) {
        if self.state.defeated_bosses.contains(boss) {
            return;
        }
        let Some(position) =
            self.state.available_bosses.iter().position(|location| location.boss == boss)
        else {
            debug!("ignoring defeat of unknown boss {boss:?}");
            return;
        };

        let location = self.state.available_bosses.remove(position);
        self.state.defeated_bosses.insert(location.boss.to_string());
        if !self.state.is_paths_converged && self.state.all_sins_defeated() {
            self.state.is_paths_converged = true;
            debug!("all sin bosses defeated, paths converge on {}", final_boss().boss);
        }
    }

    pub fn state(&self) -> &PathState {
        &self.state
    }

    pub fn current_state(&self) -> PathState {
        self.state.clone()
    }

    /// Replaces the whole state; the seed hash is re-derived from `current_seed`.
    pub fn load_state(&mut self, state: PathState) {
        self.seed_hash = seed_hash(&state.current_seed);
        self.state = state;
    }

    pub fn phase(&self) -> PathPhase {
        self.state.phase()
    }

    pub fn seed_hash(&self) -> SeedHash {
        self.seed_hash
    }

    pub fn available_count(&self) -> usize {
        self.state.available_bosses.len()
    }

    pub fn is_defeated(&self, boss: &str) -> bool {
        self.state.defeated_bosses.contains(boss)
    }

    fn decision_rng(&self) -> DeterministicRandom {
        let stream = DECISION_STREAM_BASE | self.state.defeated_mask();
        DeterministicRandom::derive(self.seed_hash, stream)
    }
}

#[cfg(test)]
mod tests;
