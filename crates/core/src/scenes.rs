//! Scene names an external loader walks through for one boss encounter.

use crate::bosses::BossLocation;

pub const BOSS_DEFEATED_SCENE: &str = "BossDefeated";
pub const STAGING_SCENE: &str = "Staging";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneRoute {
    pub first_connection: String,
    pub second_connection: String,
    pub arena: String,
}

impl SceneRoute {
    pub fn for_location(location: &BossLocation) -> Self {
        Self {
            first_connection: format!("{}_Connection1", location.identifier),
            second_connection: format!("{}_Connection2", location.identifier),
            arena: location.identifier.to_string(),
        }
    }

    /// Full load order, ending with the post-victory and return scenes.
    pub fn scenes(&self) -> [&str; 5] {
        [
            &self.first_connection,
            &self.second_connection,
            &self.arena,
            BOSS_DEFEATED_SCENE,
            STAGING_SCENE,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bosses::{BOSS_CATALOG, find_by_boss, keys};

    #[test]
    fn route_follows_connection_arena_victory_staging_order() {
        let location = find_by_boss(keys::ENVY).unwrap();
        let route = SceneRoute::for_location(location);
        assert_eq!(
            route.scenes(),
            [
                "MirrorGallery_Connection1",
                "MirrorGallery_Connection2",
                "MirrorGallery",
                "BossDefeated",
                "Staging"
            ]
        );
    }

    #[test]
    fn every_catalog_entry_has_distinct_arena_scene() {
        let arenas: Vec<_> =
            BOSS_CATALOG.iter().map(|location| SceneRoute::for_location(location).arena).collect();
        for (index, arena) in arenas.iter().enumerate() {
            assert!(!arenas[index + 1..].contains(arena), "duplicate arena {arena}");
        }
    }
}
