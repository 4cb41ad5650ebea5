//! Finalize handoff types.
//!
//! When a ledger is fully allocated it is sealed into an
//! [`AllocationBreakdown`]: the ordered `{identity, role, amount}` list the
//! persistence layer stores and the invoice PDF lists as its payment
//! breakdown. The SHA-256 `digest` commits to the total and every
//! allocation (not to the timestamp), so a resubmit of the same split
//! produces the same digest.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{MemberIdentity, Money, Role, constants};

/// One line of a finalized breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub identity: MemberIdentity,
    pub role: Role,
    pub amount: Money,
}

/// Why a ledger cannot be finalized yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinalizeBlocker {
    /// Nobody to pay.
    NoMembers,
    /// Nothing to split.
    ZeroTotal,
    /// The members' amounts do not add up to the total.
    Unallocated { remaining: Money },
}

impl fmt::Display for FinalizeBlocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMembers => write!(f, "add at least one gang member"),
            Self::ZeroTotal => write!(f, "the invoice total is zero"),
            Self::Unallocated { remaining } => {
                write!(f, "please allocate the full amount ({remaining} remaining)")
            }
        }
    }
}

/// A sealed, fully allocated split ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationBreakdown {
    pub total: Money,
    /// In ledger order.
    pub allocations: Vec<Allocation>,
    pub finalized_at: DateTime<Utc>,
    /// SHA-256 over the total and the ordered allocations.
    pub digest: [u8; 32],
}

impl AllocationBreakdown {
    /// Seal `allocations` against `total`, stamping the digest and time.
    #[must_use]
    pub fn seal(total: Money, allocations: Vec<Allocation>) -> Self {
        let digest = Self::compute_digest(total, &allocations);
        Self {
            total,
            allocations,
            finalized_at: Utc::now(),
            digest,
        }
    }

    /// Sum of all allocated amounts.
    #[must_use]
    pub fn allocated(&self) -> Money {
        self.allocations.iter().map(|a| a.amount).sum()
    }

    /// Recompute the digest and compare with the stored one.
    #[must_use]
    pub fn verify_digest(&self) -> bool {
        Self::compute_digest(self.total, &self.allocations) == self.digest
    }

    /// Hex rendering of the digest, for logs and dedupe keys.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }

    /// The hash commits to:
    /// - total (minor units)
    /// - allocation count
    /// - per allocation: identity kind + id or name, role, amount
    fn compute_digest(total: Money, allocations: &[Allocation]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(constants::BREAKDOWN_DIGEST_DOMAIN);
        hasher.update(total.minor_units().to_le_bytes());
        hasher.update((allocations.len() as u64).to_le_bytes());

        for allocation in allocations {
            match &allocation.identity {
                MemberIdentity::Saved { party_id, .. } => {
                    hasher.update([0u8]);
                    hasher.update(party_id.0.as_bytes());
                }
                MemberIdentity::Freeform { name } => {
                    hasher.update([1u8]);
                    hasher.update((name.len() as u64).to_le_bytes());
                    hasher.update(name.as_bytes());
                }
            }
            let role = allocation.role.as_str();
            hasher.update((role.len() as u64).to_le_bytes());
            hasher.update(role.as_bytes());
            hasher.update(allocation.amount.minor_units().to_le_bytes());
        }

        let result = hasher.finalize();
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }
}
