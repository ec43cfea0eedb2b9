use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use quickdef_config::Config;
use serde::{Deserialize, Serialize};

/// `$QUICKDEF_HOME`, or `<config dir>/quickdef`
pub fn quickdef_root() -> anyhow::Result<PathBuf> {
    if let Ok(home) = env::var("QUICKDEF_HOME") {
        return Ok(PathBuf::from(home));
    }

    dirs::config_dir()
        .map(|dir| dir.join("quickdef"))
        .context("Could not determine the user config directory")
}

fn profiles_dir(root: &Path) -> PathBuf {
    root.join("profiles")
}

pub fn settings_path(root: &Path) -> PathBuf {
    root.join("settings.json")
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Initialize user config folders and main profile if missing
pub fn init_user_config(root: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(profiles_dir(root))?;

    let main_profile = profiles_dir(root).join("main.json");

    if !main_profile.exists() {
        let profile = Profile {
            name: "main".into(),
            value: Config::default(),
        };
        fs::write(&main_profile, serde_json::to_string_pretty(&profile)?)?;
        tracing::info!("Created main profile at {}", main_profile.display());
    }

    Ok(())
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let profile: Profile = serde_json::from_str(&data)
        .with_context(|| format!("Invalid profile {}", path.display()))?;
    Ok(profile.value)
}

/// Load a user profile by name, defaulting to main if name not found.
/// Environment overrides are applied on top.
pub fn load_user_profile(root: &Path, name: &str) -> anyhow::Result<Config> {
    let profile_file = profiles_dir(root).join(format!("{name}.json"));

    let config = if profile_file.exists() {
        read_profile(&profile_file)?
    } else {
        tracing::warn!("Profile {name} not found, falling back to main profile or defaults");
        let main_file = profiles_dir(root).join("main.json");
        if main_file.exists() {
            read_profile(&main_file)?
        } else {
            Config::default()
        }
    };

    Ok(config.with_env_overrides())
}
