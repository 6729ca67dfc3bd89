//! Saved filter presets — named `FilterState` snapshots in one JSON file.
//!
//! A preset id is the blake3 hash of the state's canonical JSON, so saving
//! the same selection twice yields the same id. Loading goes through
//! `FilterEngine::replace_state`, which drops ids the current catalog no
//! longer has.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use tradejournal_core::{FilterEngine, FilterState};

/// File name used inside a preset directory.
pub const PRESET_FILE: &str = "presets.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub id: String,
    pub state: FilterState,
    pub saved_at: NaiveDateTime,
}

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("preset name must not be empty")]
    EmptyName,
    #[error("no preset named `{0}`")]
    NotFound(String),
    #[error("preset file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("encode preset: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("preset I/O: {0}")]
    Io(#[from] io::Error),
}

/// Content hash of a filter state.
pub fn preset_id(state: &FilterState) -> Result<String, PresetError> {
    let json = serde_json::to_string(state)?;
    Ok(blake3::hash(json.as_bytes()).to_hex().to_string())
}

/// Preset file manager rooted at a directory.
#[derive(Debug, Clone)]
pub struct PresetStore {
    path: PathBuf,
}

impl PresetStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(PRESET_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All presets, sorted by name. A missing file is an empty store.
    pub fn list(&self) -> Result<Vec<Preset>, PresetError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut presets: Vec<Preset> =
            serde_json::from_str(&content).map_err(|source| PresetError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        presets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(presets)
    }

    /// Save `state` under `name`, replacing any preset with that name.
    pub fn save(&self, name: &str, state: &FilterState) -> Result<Preset, PresetError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PresetError::EmptyName);
        }
        let preset = Preset {
            name: name.to_string(),
            id: preset_id(state)?,
            state: state.clone(),
            saved_at: chrono::Local::now().naive_local(),
        };

        let mut presets = self.list()?;
        presets.retain(|p| p.name != preset.name);
        presets.push(preset.clone());
        self.write_all(&presets)?;

        info!(name = %preset.name, id = %preset.id, "saved filter preset");
        Ok(preset)
    }

    pub fn load(&self, name: &str) -> Result<Preset, PresetError> {
        self.list()?
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| PresetError::NotFound(name.to_string()))
    }

    /// Returns false if nothing was stored under `name`.
    pub fn remove(&self, name: &str) -> Result<bool, PresetError> {
        let mut presets = self.list()?;
        let before = presets.len();
        presets.retain(|p| p.name != name);
        if presets.len() == before {
            return Ok(false);
        }
        self.write_all(&presets)?;
        info!(name, "removed filter preset");
        Ok(true)
    }

    /// Load `name` into `engine`. Stale ids are dropped by the engine.
    pub fn apply_to(&self, name: &str, engine: &mut FilterEngine) -> Result<Preset, PresetError> {
        let preset = self.load(name)?;
        engine.replace_state(preset.state.clone());
        info!(name, "applied filter preset");
        Ok(preset)
    }

    fn write_all(&self, presets: &[Preset]) -> Result<(), PresetError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(presets)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
