//! The allocation ledger.
//!
//! Owns a total and an ordered list of members. Every mutation leaves the
//! ledger legal:
//!
//! ```text
//! ∀ member: amount >= 0
//! Σ(amount) <= total
//! ∀ saved party: at most one member
//! ```
//!
//! Over-large requests are clamped, never rejected. The only operation that
//! declines is adding a saved party that is already present.

use gangsplit_types::{
    Allocation, AllocationBreakdown, FinalizeBlocker, GangMember, GangSplitError, LedgerConfig,
    MemberId, MemberIdentity, Money, Result, Role,
};

use crate::invariants;

/// Splits a fixed total across gang members.
#[derive(Debug, Clone)]
pub struct AllocationLedger {
    total: Money,
    /// Insertion order; split works on adjacent positions.
    members: Vec<GangMember>,
    config: LedgerConfig,
}

impl AllocationLedger {
    /// Open an empty ledger over `total` with default config.
    #[must_use]
    pub fn new(total: Money) -> Self {
        Self::with_config(total, LedgerConfig::default())
    }

    /// Open an empty ledger with explicit config.
    #[must_use]
    pub fn with_config(total: Money, config: LedgerConfig) -> Self {
        Self {
            total: total.clamp_non_negative(),
            members: Vec::new(),
            config,
        }
    }

    /// Rebuild a ledger from previously saved allocations.
    ///
    /// Each stored amount goes through [`Self::set_amount`], so a record
    /// that over-allocates is clamped on reload. Repeated saved parties and
    /// entries beyond the member cap are dropped.
    #[must_use]
    pub fn with_members(
        total: Money,
        allocations: impl IntoIterator<Item = Allocation>,
        config: LedgerConfig,
    ) -> Self {
        let mut ledger = Self::with_config(total, config);
        for allocation in allocations {
            match ledger.add_member(allocation.identity, allocation.role) {
                Ok(_) => {
                    let index = ledger.members.len() - 1;
                    ledger.clamp_member(index, allocation.amount);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Dropping saved allocation on reload");
                }
            }
        }
        ledger.debug_check();
        ledger
    }

    // -----------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------

    #[must_use]
    pub fn total(&self) -> Money {
        self.total
    }

    #[must_use]
    pub fn members(&self) -> &[GangMember] {
        &self.members
    }

    #[must_use]
    pub fn member(&self, index: usize) -> Option<&GangMember> {
        self.members.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Current position of the member with this id.
    #[must_use]
    pub fn position_of(&self, id: MemberId) -> Option<usize> {
        self.members.iter().position(|m| m.id == id)
    }

    /// Σ(member amounts).
    #[must_use]
    pub fn total_allocated(&self) -> Money {
        self.members.iter().map(|m| m.amount).sum()
    }

    /// `total - total_allocated`. Never negative while invariants hold.
    #[must_use]
    pub fn remaining(&self) -> Money {
        self.total - self.total_allocated()
    }

    // -----------------------------------------------------------------
    // Amount edits
    // -----------------------------------------------------------------

    /// Set one member's amount, clamped to what the others leave free.
    ///
    /// `max_allowed = max(0, total - Σ(others))`; the member receives
    /// `min(requested, max_allowed)`. Negative requests count as zero.
    /// Returns the amount actually applied.
    pub fn set_amount(&mut self, index: usize, requested: Money) -> Result<Money> {
        self.check_index(index)?;
        let applied = self.clamp_member(index, requested);
        self.debug_check();
        Ok(applied)
    }

    /// [`Self::set_amount`] addressed by member id.
    pub fn set_amount_by_id(&mut self, id: MemberId, requested: Money) -> Result<Money> {
        let index = self
            .position_of(id)
            .ok_or(GangSplitError::MemberNotFound(id))?;
        self.set_amount(index, requested)
    }

    /// Change the total. If it shrinks below what is allocated, every
    /// member is re-clamped in order against the new total.
    pub fn set_total(&mut self, total: Money) {
        let total = total.clamp_non_negative();
        let previous = self.total;
        self.total = total;

        if self.total_allocated() > total {
            for index in 0..self.members.len() {
                let current = self.members[index].amount;
                self.clamp_member(index, current);
            }
            tracing::debug!(
                previous = %previous,
                total = %total,
                allocated = %self.total_allocated(),
                "Total reduced below allocation; members re-clamped"
            );
        }
        self.debug_check();
    }

    /// Split the pool of two adjacent members plus everything unallocated
    /// evenly between them.
    ///
    /// `pool = members[index] + members[index + 1] + remaining`; both get
    /// `floor(pool / 2)`. An odd pool leaves one penny unallocated.
    /// Returns the share each member now holds.
    pub fn split_adjacent_pair(&mut self, index: usize) -> Result<Money> {
        let len = self.members.len();
        if index.checked_add(1).is_none_or(|next| next >= len) {
            return Err(GangSplitError::NoAdjacentPair { index, len });
        }

        let pool = (self.members[index].amount
            + self.members[index + 1].amount
            + self.remaining())
        .clamp_non_negative();
        let share = pool.half_floor();

        self.members[index].amount = share;
        self.members[index + 1].amount = share;

        tracing::debug!(
            index,
            pool = %pool,
            share = %share,
            remaining = %self.remaining(),
            "Split adjacent pair"
        );
        self.debug_check();
        Ok(share)
    }

    // -----------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------

    /// Append a member with nothing allocated.
    ///
    /// # Errors
    /// - `DuplicateParty` if the saved party is already present (ledger unchanged)
    /// - `MemberLimitReached` at the configured cap
    pub fn add_member(&mut self, identity: MemberIdentity, role: Role) -> Result<MemberId> {
        if let Some(party_id) = identity.party_id() {
            if self.members.iter().any(|m| m.party_id() == Some(party_id)) {
                tracing::warn!(party = %party_id, "Party already added to ledger");
                return Err(GangSplitError::DuplicateParty(party_id));
            }
        }
        if self.members.len() >= self.config.max_members {
            return Err(GangSplitError::MemberLimitReached {
                max: self.config.max_members,
            });
        }

        let member = GangMember::new(identity, role);
        let id = member.id;
        self.members.push(member);
        self.debug_check();
        Ok(id)
    }

    /// Remove and return the member at `index`.
    ///
    /// The freed amount becomes part of `remaining`; nobody else's amount
    /// changes.
    pub fn remove_member(&mut self, index: usize) -> Result<GangMember> {
        self.check_index(index)?;
        let removed = self.members.remove(index);
        self.debug_check();
        Ok(removed)
    }

    /// [`Self::remove_member`] addressed by member id.
    pub fn remove_member_by_id(&mut self, id: MemberId) -> Result<GangMember> {
        let index = self
            .position_of(id)
            .ok_or(GangSplitError::MemberNotFound(id))?;
        self.remove_member(index)
    }

    // -----------------------------------------------------------------
    // Finalize gate
    // -----------------------------------------------------------------

    /// The first reason the ledger cannot be finalized, if any.
    #[must_use]
    pub fn finalize_blocker(&self) -> Option<FinalizeBlocker> {
        if self.members.is_empty() {
            return Some(FinalizeBlocker::NoMembers);
        }
        if !self.total.is_positive() {
            return Some(FinalizeBlocker::ZeroTotal);
        }
        let remaining = self.remaining();
        if remaining.abs() > self.config.finalize_tolerance {
            return Some(FinalizeBlocker::Unallocated { remaining });
        }
        None
    }

    /// Members present, total positive, and `|remaining|` within tolerance.
    #[must_use]
    pub fn ready_to_finalize(&self) -> bool {
        self.finalize_blocker().is_none()
    }

    /// The ordered `{identity, role, amount}` list.
    #[must_use]
    pub fn allocations(&self) -> Vec<Allocation> {
        self.members
            .iter()
            .map(|m| Allocation {
                identity: m.identity.clone(),
                role: m.role.clone(),
                amount: m.amount,
            })
            .collect()
    }

    /// Seal the ledger into a breakdown for the persistence layer.
    ///
    /// # Errors
    /// Returns `NotReadyToFinalize` when [`Self::ready_to_finalize`] is false.
    pub fn finalize(&self) -> Result<AllocationBreakdown> {
        if let Some(blocker) = self.finalize_blocker() {
            return Err(GangSplitError::NotReadyToFinalize(blocker));
        }
        let breakdown = AllocationBreakdown::seal(self.total, self.allocations());
        tracing::info!(
            total = %breakdown.total,
            members = breakdown.allocations.len(),
            digest = %breakdown.digest_hex(),
            "Ledger finalized"
        );
        Ok(breakdown)
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.members.len() {
            return Err(GangSplitError::MemberIndexOutOfRange {
                index,
                len: self.members.len(),
            });
        }
        Ok(())
    }

    /// Core clamp. `index` must be valid.
    fn clamp_member(&mut self, index: usize, requested: Money) -> Money {
        let requested = requested.clamp_non_negative();
        let others = self.total_allocated() - self.members[index].amount;
        let max_allowed = (self.total - others).clamp_non_negative();
        let applied = requested.min(max_allowed);

        if applied < requested {
            tracing::debug!(
                index,
                requested = %requested,
                applied = %applied,
                "Amount clamped to remaining allowance"
            );
        }
        self.members[index].amount = applied;
        applied
    }

    fn debug_check(&self) {
        debug_assert!(
            invariants::verify(self).is_ok(),
            "{}",
            invariants::verify(self).err().map(|e| e.to_string()).unwrap_or_default()
        );
    }
}

#[cfg(test)]
impl AllocationLedger {
    /// Build a ledger from raw parts with no clamping or checks.
    pub(crate) fn from_parts_unchecked(total: Money, members: Vec<GangMember>) -> Self {
        Self {
            total,
            members,
            config: LedgerConfig::default(),
        }
    }
}
