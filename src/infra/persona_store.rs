// ============================================================
// Layer 6 — Persona Store
// ============================================================
// Reads and writes the persona configuration file:
//
//   persona_config.json
//     {
//       "persona": { "role": "...", "expertise": "..." },
//       "job": "...",
//       "keywords": [...],
//       "advanced_terms": [...]
//     }
//
// A missing file is ConfigError::Missing, which halts the run
// before any document is touched.

use anyhow::{Context, Result};
use std::{fs, io, path::{Path, PathBuf}};

use crate::domain::errors::ConfigError;
use crate::domain::persona::PersonaProfile;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "persona_config.json";

pub struct PersonaStore {
    path: PathBuf,
}

impl PersonaStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the profile.
    pub fn load(&self) -> Result<PersonaProfile, ConfigError> {
        let json = fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ConfigError::Missing { path: self.path.clone() }
            } else {
                ConfigError::Unreadable { path: self.path.clone(), source }
            }
        })?;

        let profile: PersonaProfile =
            serde_json::from_str(&json).map_err(|source| ConfigError::Invalid {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            "Loaded persona config from '{}' ({} keywords, {} advanced terms)",
            self.path.display(),
            profile.keywords.len(),
            profile.advanced_terms.len()
        );
        Ok(profile)
    }

    /// Save the profile, pretty-printed with 2-space indentation.
    pub fn save(&self, profile: &PersonaProfile) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(profile)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Cannot write persona config to '{}'", self.path.display()))?;

        tracing::debug!("Saved persona config to '{}'", self.path.display());
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_config_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = PersonaStore::new(dir.path().join(DEFAULT_CONFIG_FILE));
        let err = store.load().unwrap_err();
        assert!(matches!(err, ConfigError::Missing { .. }));
        assert!(err.to_string().contains("Please update persona config first."));
    }

    #[test]
    fn test_malformed_file_is_config_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            PersonaStore::new(path).load(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = PersonaStore::new(dir.path().join("nested").join(DEFAULT_CONFIG_FILE));

        let mut profile = PersonaProfile::default();
        profile.persona.role = "Data Scientist".to_string();
        profile.persona.expertise = "Advanced".to_string();
        profile.job = "Find methods".to_string();
        profile.keywords = vec!["regression".to_string()];
        store.save(&profile).unwrap();

        assert_eq!(store.load().unwrap(), profile);
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\n  \"persona\": {"));
        assert!(raw.contains("\"advanced_terms\": []"));
    }
}
