//! Static boss encounter catalog: seven sin encounters followed by the final one.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

pub mod keys {
    pub const PRIDE: &str = "Pride";
    pub const GREED: &str = "Greed";
    pub const WRATH: &str = "Wrath";
    pub const ENVY: &str = "Envy";
    pub const LUST: &str = "Lust";
    pub const GLUTTONY: &str = "Gluttony";
    pub const SLOTH: &str = "Sloth";
    pub const FINAL: &str = "Nemesis";
}

pub const SIN_BOSS_COUNT: usize = 7;

/// One selectable encounter. `identifier` doubles as the arena scene name.
///
/// Serialized with all three fields; deserialization resolves the
/// `identifier` against [`BOSS_CATALOG`] so loaded values always point at the
/// static table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BossLocation {
    pub identifier: &'static str,
    pub display_name: &'static str,
    pub boss: &'static str,
}

impl BossLocation {
    pub fn is_final(&self) -> bool {
        self.boss == keys::FINAL
    }
}

pub static BOSS_CATALOG: [BossLocation; SIN_BOSS_COUNT + 1] = [
    BossLocation {
        identifier: "GildedCathedral",
        display_name: "The Gilded Cathedral",
        boss: keys::PRIDE,
    },
    BossLocation { identifier: "SunkenVault", display_name: "The Sunken Vault", boss: keys::GREED },
    BossLocation {
        identifier: "BurningForge",
        display_name: "The Burning Forge",
        boss: keys::WRATH,
    },
    BossLocation {
        identifier: "MirrorGallery",
        display_name: "The Mirror Gallery",
        boss: keys::ENVY,
    },
    BossLocation {
        identifier: "VelvetGarden",
        display_name: "The Velvet Garden",
        boss: keys::LUST,
    },
    BossLocation {
        identifier: "EndlessBanquet",
        display_name: "The Endless Banquet",
        boss: keys::GLUTTONY,
    },
    BossLocation {
        identifier: "DrowsingCradle",
        display_name: "The Drowsing Cradle",
        boss: keys::SLOTH,
    },
    BossLocation {
        identifier: "LastThreshold",
        display_name: "The Last Threshold",
        boss: keys::FINAL,
    },
];

pub fn sin_bosses() -> &'static [BossLocation] {
    &BOSS_CATALOG[..SIN_BOSS_COUNT]
}

pub fn final_boss() -> &'static BossLocation {
    &BOSS_CATALOG[SIN_BOSS_COUNT]
}

pub fn find_by_boss(boss: &str) -> Option<&'static BossLocation> {
    BOSS_CATALOG.iter().find(|location| location.boss == boss)
}

pub fn find_by_identifier(identifier: &str) -> Option<&'static BossLocation> {
    BOSS_CATALOG.iter().find(|location| location.identifier == identifier)
}

pub(crate) fn catalog_index(boss: &str) -> Option<usize> {
    BOSS_CATALOG.iter().position(|location| location.boss == boss)
}

#[derive(Deserialize)]
struct BossLocationRecord {
    identifier: String,
}

#[derive(Debug)]
pub struct UnknownBossLocation(String);

impl fmt::Display for UnknownBossLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown boss location identifier '{}'", self.0)
    }
}

impl TryFrom<BossLocationRecord> for BossLocation {
    type Error = UnknownBossLocation;

    fn try_from(record: BossLocationRecord) -> Result<Self, Self::Error> {
        find_by_identifier(&record.identifier)
            .copied()
            .ok_or(UnknownBossLocation(record.identifier))
    }
}

impl<'de> Deserialize<'de> for BossLocation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = BossLocationRecord::deserialize(deserializer)?;
        Self::try_from(record).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn catalog_has_seven_sins_and_one_final_encounter() {
        assert_eq!(BOSS_CATALOG.len(), 8);
        assert_eq!(sin_bosses().len(), SIN_BOSS_COUNT);
        assert!(sin_bosses().iter().all(|location| !location.is_final()));
        assert!(final_boss().is_final());
    }

    #[test]
    fn identifiers_and_boss_names_are_unique() {
        let identifiers: BTreeSet<_> = BOSS_CATALOG.iter().map(|l| l.identifier).collect();
        let bosses: BTreeSet<_> = BOSS_CATALOG.iter().map(|l| l.boss).collect();
        assert_eq!(identifiers.len(), BOSS_CATALOG.len());
        assert_eq!(bosses.len(), BOSS_CATALOG.len());
    }

    #[test]
    fn lookups_resolve_catalog_entries() {
        assert_eq!(find_by_boss(keys::WRATH).map(|l| l.identifier), Some("BurningForge"));
        assert_eq!(find_by_identifier("LastThreshold"), Some(final_boss()));
        assert_eq!(catalog_index(keys::SLOTH), Some(6));
        assert_eq!(find_by_boss("Apathy"), None);
    }

    #[test]
    fn json_resolves_identifier_against_catalog() {
        let json = serde_json::to_string(final_boss()).unwrap();
        assert!(json.contains("\"identifier\":\"LastThreshold\""));
        let decoded: BossLocation = serde_json::from_str(&json).unwrap();
        assert_eq!(&decoded, final_boss());

        let unknown = serde_json::from_str::<BossLocation>(r#"{"identifier":"Nowhere"}"#);
        let err = unknown.unwrap_err();
        assert!(err.to_string().contains("Nowhere"), "unexpected error: {err}");
    }

    #[test]
    fn catalog_entries_decode_from_short_lived_buffers() {
        let buffer = serde_json::to_string(&BOSS_CATALOG.to_vec()).unwrap();
        let decoded: Vec<BossLocation> = serde_json::from_str(&buffer.clone()).unwrap();
        drop(buffer);
        assert_eq!(decoded, BOSS_CATALOG.to_vec());
    }
}
