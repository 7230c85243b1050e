//! Named-profile persistence: a TOML mapping of profile definitions plus the
//! current selection, written as a whole on every change.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::profile::{FileRef, PatternRule, Profile};

/// Guaranteed to exist after [`ProfileStore::initialize`].
pub const DEFAULT_PROFILE: &str = "default";

/// On-disk shape of one profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileData {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<PatternRule>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current: Option<String>,
    #[serde(default)]
    profiles: BTreeMap<String, ProfileData>,
}

/// Manages named profiles and the current selection, backed by one config
/// file.
pub struct ProfileStore {
    path: PathBuf,
    data: StoreData,
}

impl ProfileStore {
    /// Load the store from `path`, creating the file and the `default`
    /// profile when either is missing.
    pub fn initialize(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = if path.exists() {
            read_store(&path)?
        } else {
            StoreData::default()
        };
        let mut store = ProfileStore { path, data };
        if !store.data.profiles.contains_key(DEFAULT_PROFILE) {
            store
                .data
                .profiles
                .insert(DEFAULT_PROFILE.to_string(), ProfileData::default());
            store.save()?;
        }
        Ok(store)
    }

    pub fn profile_names(&self) -> Vec<String> {
        self.data.profiles.keys().cloned().collect()
    }

    pub fn profile(&self, name: &str) -> Result<Profile> {
        let data = self
            .data
            .profiles
            .get(name)
            .ok_or_else(|| Error::ProfileNotFound(name.to_string()))?;
        Ok(Profile::with_parts(
            name,
            data.files.clone(),
            data.patterns.clone(),
        ))
    }

    /// Name of the current profile; falls back to `default` when nothing has
    /// been selected yet.
    pub fn current_profile_name(&self) -> &str {
        self.data.current.as_deref().unwrap_or(DEFAULT_PROFILE)
    }

    pub fn current_profile(&self) -> Result<Profile> {
        self.profile(self.current_profile_name())
    }

    pub fn set_current(&mut self, name: &str) -> Result<()> {
        if !self.data.profiles.contains_key(name) {
            return Err(Error::ProfileNotFound(name.to_string()));
        }
        self.data.current = Some(name.to_string());
        self.save()
    }

    /// Create an empty profile. Fails with `ProfileExists`, leaving the store
    /// untouched, when the name is taken.
    pub fn create_profile(&mut self, name: &str) -> Result<Profile> {
        if self.data.profiles.contains_key(name) {
            return Err(Error::ProfileExists(name.to_string()));
        }
        self.data
            .profiles
            .insert(name.to_string(), ProfileData::default());
        self.save()?;
        Ok(Profile::new(name))
    }

    /// Persist a profile definition as a whole; no partial updates.
    pub fn save_profile(&mut self, profile: &Profile) -> Result<()> {
        self.data.profiles.insert(
            profile.name().to_string(),
            ProfileData {
                files: profile.pinned_files().to_vec(),
                patterns: profile.patterns().to_vec(),
            },
        );
        self.save()
    }

    fn save(&self) -> Result<()> {
        let text = toml::to_string_pretty(&self.data)?;
        fs::write(&self.path, text).map_err(|source| Error::ConfigWrite {
            path: self.path.clone(),
            source,
        })
    }
}

fn read_store(path: &Path) -> Result<StoreData> {
    let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}
