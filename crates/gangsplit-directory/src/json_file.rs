//! Saved-party directory cached in a local JSON file.
//!
//! The whole directory is loaded on open and written back after every
//! change. Writes go to a sibling temp file first and are renamed into
//! place, so a crash mid-write leaves the previous file intact. The
//! in-memory map only takes a change once it is on disk.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use gangsplit_types::{GangSplitError, PartyId, Result, SavedParty, constants};
use serde::{Deserialize, Serialize};

use crate::directory::{SavedPartyDirectory, sort_parties};

/// On-disk document.
#[derive(Debug, Serialize, Deserialize)]
struct DirectoryFile {
    version: u32,
    parties: Vec<SavedParty>,
}

/// Saved-party directory persisted as JSON.
#[derive(Debug)]
pub struct JsonFileDirectory {
    path: PathBuf,
    parties: HashMap<PartyId, SavedParty>,
}

impl JsonFileDirectory {
    /// Load the directory at `path`. A missing file is an empty directory.
    ///
    /// # Errors
    /// - `Io` if the file exists but cannot be read
    /// - `DirectoryCorrupt` if it is not a directory document of the
    ///   current version
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No saved-party cache yet; starting empty");
            return Ok(Self {
                path,
                parties: HashMap::new(),
            });
        }

        let raw = fs::read_to_string(&path)?;
        let file: DirectoryFile =
            serde_json::from_str(&raw).map_err(|e| GangSplitError::DirectoryCorrupt {
                reason: format!("{}: {e}", path.display()),
            })?;

        if file.version != constants::DIRECTORY_FILE_VERSION {
            return Err(GangSplitError::DirectoryCorrupt {
                reason: format!(
                    "{}: version {} (expected {})",
                    path.display(),
                    file.version,
                    constants::DIRECTORY_FILE_VERSION
                ),
            });
        }

        let parties: HashMap<PartyId, SavedParty> =
            file.parties.into_iter().map(|p| (p.id, p)).collect();
        tracing::debug!(path = %path.display(), count = parties.len(), "Loaded saved parties");
        Ok(Self { path, parties })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `parties` to disk. `self.parties` is left alone.
    fn save(&self, parties: &HashMap<PartyId, SavedParty>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut parties: Vec<SavedParty> = parties.values().cloned().collect();
        sort_parties(&mut parties);
        let doc = DirectoryFile {
            version: constants::DIRECTORY_FILE_VERSION,
            parties,
        };
        let json = serde_json::to_string_pretty(&doc)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        tracing::info!(
            path = %self.path.display(),
            count = doc.parties.len(),
            "Saved-party cache written"
        );
        Ok(())
    }
}

impl SavedPartyDirectory for JsonFileDirectory {
    fn list(&self) -> Result<Vec<SavedParty>> {
        let mut parties: Vec<SavedParty> = self.parties.values().cloned().collect();
        sort_parties(&mut parties);
        Ok(parties)
    }

    fn get(&self, id: PartyId) -> Result<Option<SavedParty>> {
        Ok(self.parties.get(&id).cloned())
    }

    fn upsert(&mut self, party: SavedParty) -> Result<()> {
        let mut next = self.parties.clone();
        next.insert(party.id, party);
        self.save(&next)?;
        self.parties = next;
        Ok(())
    }

    fn remove(&mut self, id: PartyId) -> Result<bool> {
        if !self.parties.contains_key(&id) {
            return Ok(false);
        }
        let mut next = self.parties.clone();
        next.remove(&id);
        self.save(&next)?;
        self.parties = next;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fresh path under the system temp dir.
    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("gangsplit-{label}-{}", PartyId::new().0))
            .join("parties.json")
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = JsonFileDirectory::open(temp_path("missing")).unwrap();
        assert!(dir.list().unwrap().is_empty());
    }

    #[test]
    fn upsert_persists_across_reopen() {
        let path = temp_path("persist");
        let party = SavedParty::dummy("Dave");
        {
            let mut dir = JsonFileDirectory::open(&path).unwrap();
            dir.upsert(party.clone()).unwrap();
        }
        let reopened = JsonFileDirectory::open(&path).unwrap();
        assert_eq!(reopened.get(party.id).unwrap(), Some(party));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn remove_persists() {
        let path = temp_path("remove");
        let party = SavedParty::dummy("Dave");
        let mut dir = JsonFileDirectory::open(&path).unwrap();
        dir.upsert(party.clone()).unwrap();
        assert!(dir.remove(party.id).unwrap());
        assert!(!dir.remove(party.id).unwrap());

        let reopened = JsonFileDirectory::open(&path).unwrap();
        assert!(reopened.list().unwrap().is_empty());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn failed_write_keeps_memory_in_step_with_disk() {
        let path = temp_path("blocked");
        let party = SavedParty::dummy("Dave");
        let mut dir = JsonFileDirectory::open(&path).unwrap();
        dir.upsert(party.clone()).unwrap();

        // Put a plain file where the cache directory should be.
        let root = path.parent().unwrap().to_path_buf();
        fs::remove_dir_all(&root).unwrap();
        fs::write(&root, "not a directory").unwrap();

        let kev = SavedParty::dummy("Kev");
        assert!(matches!(dir.upsert(kev.clone()), Err(GangSplitError::Io(_))));
        assert_eq!(dir.get(kev.id).unwrap(), None);

        assert!(matches!(dir.remove(party.id), Err(GangSplitError::Io(_))));
        assert_eq!(dir.get(party.id).unwrap(), Some(party));

        let _ = fs::remove_file(&root);
    }

    #[test]
    fn wrong_version_is_corrupt() {
        let path = temp_path("version");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"version": 99, "parties": []}"#).unwrap();
        let err = JsonFileDirectory::open(&path).unwrap_err();
        assert!(matches!(err, GangSplitError::DirectoryCorrupt { .. }));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn garbage_is_corrupt() {
        let path = temp_path("garbage");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[[[").unwrap();
        let err = JsonFileDirectory::open(&path).unwrap_err();
        assert!(err.to_string().starts_with("GS_ERR_401"));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
