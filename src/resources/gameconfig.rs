//! Portrait configuration resource.
//!
//! Settings loaded from an INI file. Missing values keep their defaults, so
//! the overlay always starts even without a configuration file.
//!
//! # Configuration File Format
//!
//! ```ini
//! [portrait]
//! rules = ./assets/portraits.json
//! manifest = ./assets/pictures.json
//! victory_actor = lastActor
//! enabled = true
//!
//! [battle]
//! max_members = 4
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::error::PortraitError;
use crate::resources::party::{DEFAULT_BATTLE_MEMBERS, MAX_BATTLE_MEMBERS};
use crate::resources::picturerules::VictoryActorPolicy;

const DEFAULT_RULES_PATH: &str = "./assets/portraits.json";
const DEFAULT_MANIFEST_PATH: &str = "./assets/pictures.json";
const DEFAULT_CONFIG_PATH: &str = "./portrait.ini";

#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Picture rule JSON file.
    pub rules_path: PathBuf,
    /// Picture size manifest used by the loader thread.
    pub manifest_path: PathBuf,
    /// Overrides the victory policy of the rules file when set.
    pub victory_actor: Option<VictoryActorPolicy>,
    /// Initial value of the overlay's enabled flag.
    pub enabled: bool,
    /// How many party members fight.
    pub max_battle_members: usize,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self {
            rules_path: PathBuf::from(DEFAULT_RULES_PATH),
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            victory_actor: None,
            enabled: true,
            max_battle_members: DEFAULT_BATTLE_MEMBERS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file at `config_path`.
    pub fn load_from_file(&mut self) -> Result<(), PortraitError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| PortraitError::Config(format!("{}: {}", self.config_path.display(), e)))?;
        self.apply(&config)?;

        info!(
            "Loaded config from {}: rules={}, manifest={}, victory_actor={}, enabled={}, max_members={}",
            self.config_path.display(),
            self.rules_path.display(),
            self.manifest_path.display(),
            self.victory_actor
                .map_or_else(|| "(rules file)".to_string(), |p| p.to_string()),
            self.enabled,
            self.max_battle_members
        );
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), PortraitError> {
        let mut config = Ini::new();
        config.read(text.to_string()).map_err(PortraitError::Config)?;
        self.apply(&config)
    }

    /// Parse every key first so a bad value leaves the config untouched.
    fn apply(&mut self, config: &Ini) -> Result<(), PortraitError> {
        // [portrait] section
        let rules = config.get("portrait", "rules");
        let manifest = config.get("portrait", "manifest");
        let victory_actor = config
            .get("portrait", "victory_actor")
            .map(|policy| policy.parse::<VictoryActorPolicy>())
            .transpose()?;
        let enabled = config.getbool("portrait", "enabled").map_err(PortraitError::Config)?;

        // [battle] section
        let max_members = config.getuint("battle", "max_members").map_err(PortraitError::Config)?;

        if let Some(rules) = rules {
            self.rules_path = PathBuf::from(rules);
        }
        if let Some(manifest) = manifest {
            self.manifest_path = PathBuf::from(manifest);
        }
        if victory_actor.is_some() {
            self.victory_actor = victory_actor;
        }
        if let Some(enabled) = enabled {
            self.enabled = enabled;
        }
        if let Some(max) = max_members {
            self.max_battle_members = (max as usize).clamp(1, MAX_BATTLE_MEMBERS);
        }
        Ok(())
    }
}
