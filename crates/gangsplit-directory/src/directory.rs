//! Saved-party directory abstraction.

use std::collections::HashMap;

use gangsplit_types::{PartyId, Result, SavedParty};

/// Read/write store of saved parties.
pub trait SavedPartyDirectory {
    /// All parties, sorted by name (case-insensitive).
    fn list(&self) -> Result<Vec<SavedParty>>;

    fn get(&self, id: PartyId) -> Result<Option<SavedParty>>;

    /// Insert or replace by id.
    fn upsert(&mut self, party: SavedParty) -> Result<()>;

    /// Returns whether a party was removed.
    fn remove(&mut self, id: PartyId) -> Result<bool>;

    /// First party whose name matches, ignoring case and surrounding space.
    fn find_by_name(&self, name: &str) -> Result<Option<SavedParty>> {
        let wanted = name.trim();
        Ok(self
            .list()?
            .into_iter()
            .find(|p| p.name.trim().eq_ignore_ascii_case(wanted)))
    }
}

/// Order parties for display: name, then id for a stable tie-break.
pub(crate) fn sort_parties(parties: &mut [SavedParty]) {
    parties.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then(a.id.cmp(&b.id))
    });
}

/// Directory held purely in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDirectory {
    parties: HashMap<PartyId, SavedParty>,
}

impl InMemoryDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing parties.
    #[must_use]
    pub fn with_parties(parties: impl IntoIterator<Item = SavedParty>) -> Self {
        Self {
            parties: parties.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }
}

impl SavedPartyDirectory for InMemoryDirectory {
    fn list(&self) -> Result<Vec<SavedParty>> {
        let mut parties: Vec<SavedParty> = self.parties.values().cloned().collect();
        sort_parties(&mut parties);
        Ok(parties)
    }

    fn get(&self, id: PartyId) -> Result<Option<SavedParty>> {
        Ok(self.parties.get(&id).cloned())
    }

    fn upsert(&mut self, party: SavedParty) -> Result<()> {
        self.parties.insert(party.id, party);
        Ok(())
    }

    fn remove(&mut self, id: PartyId) -> Result<bool> {
        Ok(self.parties.remove(&id).is_some())
    }
}
