//! Connection profiles: load/save simple JSON mapping of profile name ->
//! { host, port, serial, baud }.
//! Stored under XDG config dir: $XDG_CONFIG_HOME/mediatop/profiles.json
//! (fallback ~/.config/mediatop/profiles.json)

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baud: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfilesFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileEntry>,
    #[serde(default)]
    pub version: u32,
}

pub fn config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("mediatop")
    } else {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mediatop")
    }
}

pub fn profiles_path() -> PathBuf {
    config_dir().join("profiles.json")
}

pub fn load_profiles() -> ProfilesFile {
    let path = profiles_path();
    match fs::read_to_string(&path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
        Err(_) => ProfilesFile::default(),
    }
}

pub fn save_profiles(p: &ProfilesFile) -> std::io::Result<()> {
    let path = profiles_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(p).expect("serialize profiles");
    fs::write(path, data)
}

/// How a profile name plus explicit flags resolve to a usable target.
pub enum ResolveProfile {
    /// Use the provided runtime inputs (not persisted).
    Direct(ProfileEntry),
    /// Loaded from an existing profile entry.
    Loaded(ProfileEntry),
    /// Named profile does not exist yet; caller may create it.
    Missing(String),
    /// Nothing usable was provided.
    None,
}

pub fn resolve(name: Option<String>, explicit: ProfileEntry, pf: &ProfilesFile) -> ResolveProfile {
    let has_explicit = explicit.host.is_some() || explicit.serial.is_some();
    if has_explicit {
        return ResolveProfile::Direct(explicit);
    }
    if let Some(name) = name {
        return match pf.profiles.get(&name) {
            Some(entry) => ResolveProfile::Loaded(entry.clone()),
            None => ResolveProfile::Missing(name),
        };
    }
    ResolveProfile::None
}
