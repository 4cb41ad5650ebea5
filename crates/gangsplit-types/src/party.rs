//! Saved parties: the directory of previously used gang members.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{MemberIdentity, PartyId, Role};

/// A party remembered for quick re-add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedParty {
    pub id: PartyId,
    pub name: String,
    /// Role suggested when this party is added to a ledger.
    pub role: Role,
    /// When this party was last added to a ledger.
    pub last_used: Option<DateTime<Utc>>,
}

impl SavedParty {
    #[must_use]
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            id: PartyId::new(),
            name: name.into(),
            role,
            last_used: None,
        }
    }

    /// Ledger identity backed by this party.
    #[must_use]
    pub fn identity(&self) -> MemberIdentity {
        MemberIdentity::Saved {
            party_id: self.id,
            name: self.name.clone(),
        }
    }

    /// Record a use now.
    pub fn touch(&mut self) {
        self.last_used = Some(Utc::now());
    }
}

/// Test-only constructors.
#[cfg(any(test, feature = "test-helpers"))]
impl SavedParty {
    #[must_use]
    pub fn dummy(name: &str) -> Self {
        Self::new(name, Role::Bricklayer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_points_at_party() {
        let party = SavedParty::dummy("Dave");
        let identity = party.identity();
        assert_eq!(identity.party_id(), Some(party.id));
        assert_eq!(identity.name(), "Dave");
    }

    #[test]
    fn touch_sets_last_used() {
        let mut party = SavedParty::dummy("Dave");
        assert!(party.last_used.is_none());
        party.touch();
        assert!(party.last_used.is_some());
    }

    #[test]
    fn serde_roundtrip() {
        let mut party = SavedParty::new("Kev", Role::Other("plasterer".into()));
        party.touch();
        let json = serde_json::to_string(&party).unwrap();
        let back: SavedParty = serde_json::from_str(&json).unwrap();
        assert_eq!(party, back);
    }
}
