//! Settings loaded from TOML.
//!
//! Lookup order: an explicit path, then `$BINGO_CONFIG`, then
//! `<config dir>/buzzword-bingo/settings.toml`. A missing file yields the
//! defaults; a malformed one is an error.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::session::DEFAULT_MAX_CARDS;
use crate::word_bank::WordBank;

const APP_NAME: &str = "buzzword-bingo";

/// Layout of the exported card image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Edge length of one cell in pixels.
    pub cell_px: u32,
    /// Outer margin in pixels.
    pub padding: u32,
    pub font_px: f32,
    /// Font file to use instead of searching the system font directories.
    pub font_path: Option<PathBuf>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            cell_px: 128,
            padding: 20,
            font_px: 18.0,
            font_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// JSON word bank; the built-in bank is used when unset.
    pub word_bank: Option<PathBuf>,
    /// Meeting type used when a request names an unknown one.
    pub default_meeting_type: String,
    /// Reject unknown meeting types instead of falling back.
    pub strict_meeting_types: bool,
    /// Fixed seed for reproducible cards.
    pub seed: Option<u64>,
    pub max_cards: usize,
    pub render: RenderSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            word_bank: None,
            default_meeting_type: "all-hands".into(),
            strict_meeting_types: false,
            seed: None,
            max_cards: DEFAULT_MAX_CARDS,
            render: RenderSettings::default(),
        }
    }
}

impl Settings {
    /// `<config dir>/buzzword-bingo/settings.toml`, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|dir| dir.join(APP_NAME).join("settings.toml"))
    }

    /// Resolves the settings file and loads it.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("BINGO_CONFIG").map(PathBuf::from))
            .or_else(Self::default_path);
        match path {
            Some(p) => Self::load_from(&p),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("no settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&text)?;
        info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// The configured word bank with the configured fallback type.
    pub fn word_bank(&self) -> Result<WordBank> {
        let bank = match &self.word_bank {
            Some(path) => WordBank::read_from_json(path)?,
            None => WordBank::builtin()?,
        };
        let bank = bank.with_default(&self.default_meeting_type)?;
        bank.validate();
        Ok(bank)
    }
}
