//! Gang member model.
//!
//! A member is one party receiving a share of the total. Its identity is
//! either a saved party (stable id) or a freeform name typed inline; its
//! role is a display tag and never influences allocation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{MemberId, Money, PartyId};

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Trade category of a gang member. Open enumeration: anything not
/// recognized is kept verbatim in [`Role::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Bricklayer,
    Labourer,
    Other(String),
}

impl Role {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bricklayer => "bricklayer",
            Self::Labourer => "labourer",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("bricklayer") {
            Self::Bricklayer
        } else if trimmed.eq_ignore_ascii_case("labourer") || trimmed.eq_ignore_ascii_case("laborer")
        {
            Self::Labourer
        } else {
            Self::Other(trimmed.to_string())
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MemberIdentity
// ---------------------------------------------------------------------------

/// Who a member is.
///
/// The freeform variant's "type" half is carried by the member's
/// [`Role`], so only the name lives here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberIdentity {
    /// A party picked from the saved-party directory.
    Saved { party_id: PartyId, name: String },
    /// A name entered inline, not backed by the directory.
    Freeform { name: String },
}

impl MemberIdentity {
    /// Freeform identity from a typed name.
    #[must_use]
    pub fn freeform(name: impl Into<String>) -> Self {
        Self::Freeform { name: name.into() }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Saved { name, .. } | Self::Freeform { name } => name,
        }
    }

    /// The saved-party id, if this identity is directory-backed.
    #[must_use]
    pub fn party_id(&self) -> Option<PartyId> {
        match self {
            Self::Saved { party_id, .. } => Some(*party_id),
            Self::Freeform { .. } => None,
        }
    }
}

impl fmt::Display for MemberIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// GangMember
// ---------------------------------------------------------------------------

/// One party holding a share of the ledger total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GangMember {
    /// Ledger-assigned slot handle.
    pub id: MemberId,
    pub identity: MemberIdentity,
    pub role: Role,
    /// Allocated share; never negative, never more than the ledger total.
    pub amount: Money,
}

impl GangMember {
    /// A freshly added member starts with nothing allocated.
    #[must_use]
    pub fn new(identity: MemberIdentity, role: Role) -> Self {
        Self {
            id: MemberId::new(),
            identity,
            role,
            amount: Money::ZERO,
        }
    }

    #[must_use]
    pub fn party_id(&self) -> Option<PartyId> {
        self.identity.party_id()
    }
}

/// Test-only constructors.
#[cfg(any(test, feature = "test-helpers"))]
impl GangMember {
    /// A freeform labourer named `name` holding `amount_minor` pence.
    #[must_use]
    pub fn dummy(name: &str, amount_minor: i64) -> Self {
        Self {
            amount: Money::from_minor(amount_minor),
            ..Self::new(MemberIdentity::freeform(name), Role::Labourer)
        }
    }
}
