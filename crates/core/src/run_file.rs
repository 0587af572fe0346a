//! JSON save envelope handed to the external save subsystem.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::mapgen::Map;
use crate::resolver::PathState;

pub const RUN_FILE_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunStateFile {
    pub format_version: u32,
    pub path_state: PathState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<Map>,
}

impl RunStateFile {
    pub fn new(path_state: PathState, map: Option<Map>) -> Self {
        Self { format_version: RUN_FILE_FORMAT_VERSION, path_state, map }
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "Pathseed").map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("run_state.json");
            path
        })
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        debug!("wrote run state for seed {:?} to {}", self.path_state.current_seed, path.display());

        Ok(())
    }

    /// Files written by a newer format version are rejected as `InvalidData`.
    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let file: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if file.format_version > RUN_FILE_FORMAT_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "run state format {} is newer than supported {RUN_FILE_FORMAT_VERSION}",
                    file.format_version
                ),
            ));
        }
        debug!(
            "loaded run state for seed {:?} from {} ({} defeated)",
            file.path_state.current_seed,
            path.display(),
            file.path_state.defeated_bosses.len()
        );
        Ok(file)
    }
}
