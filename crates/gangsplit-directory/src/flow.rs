//! Gang-division editor flow.
//!
//! One `GangDivisionFlow` exists per open invoice/booking editor. It owns the
//! ledger and its edit state, borrows nothing, and is dropped on cancel or
//! after a successful [`GangDivisionFlow::submit`]. Parties are resolved
//! through the injected directory; the ledger only receives identities.

use gangsplit_ledger::{AllocationLedger, EditState, input};
use gangsplit_types::{
    AllocationBreakdown, GangMember, GangSplitError, LedgerConfig, MemberId, MemberIdentity,
    Money, PartyId, Result, Role, SavedParty,
};

use crate::SavedPartyDirectory;

/// Editor session over one ledger and a saved-party directory.
pub struct GangDivisionFlow<D: SavedPartyDirectory> {
    ledger: AllocationLedger,
    edits: EditState,
    directory: D,
}

impl<D: SavedPartyDirectory> GangDivisionFlow<D> {
    /// Open an editor over `total`.
    ///
    /// # Errors
    /// Returns `Configuration` if `config` fails validation.
    pub fn open(total: Money, config: LedgerConfig, directory: D) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            ledger: AllocationLedger::with_config(total, config),
            edits: EditState::new(),
            directory,
        })
    }

    #[must_use]
    pub fn ledger(&self) -> &AllocationLedger {
        &self.ledger
    }

    #[must_use]
    pub fn edits(&self) -> &EditState {
        &self.edits
    }

    #[must_use]
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Close the editor, handing the directory back.
    #[must_use]
    pub fn into_directory(self) -> D {
        self.directory
    }

    /// Parties offered in the "add member" picker.
    pub fn saved_parties(&self) -> Result<Vec<SavedParty>> {
        self.directory.list()
    }

    // -----------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------

    /// Add a saved party, using its remembered role unless `role` overrides.
    ///
    /// # Errors
    /// - `PartyNotFound` if the directory has no such party
    /// - `DuplicateParty` if it is already in the ledger ("already added")
    /// - any directory write error; the ledger is left unchanged
    pub fn add_saved_party(&mut self, id: PartyId, role: Option<Role>) -> Result<MemberId> {
        let mut party = self
            .directory
            .get(id)?
            .ok_or(GangSplitError::PartyNotFound(id))?;
        let role = role.unwrap_or_else(|| party.role.clone());

        let member_id = self.ledger.add_member(party.identity(), role)?;
        party.touch();
        self.store_or_undo(member_id, party)?;

        tracing::info!(party = %id, member = %member_id, "Saved party added to ledger");
        Ok(member_id)
    }

    /// Add a party typed inline.
    ///
    /// With `remember` set the party is saved to the directory (or an
    /// existing party of the same name reused) and added by id; otherwise it
    /// joins as a freeform member.
    ///
    /// # Errors
    /// - `EmptyPartyName` for a blank name
    /// - `DuplicateParty` if the remembered party is already in the ledger
    /// - any directory write error; the ledger is left unchanged
    pub fn add_new_party(&mut self, name: &str, role: Role, remember: bool) -> Result<MemberId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GangSplitError::EmptyPartyName);
        }

        if !remember {
            return self.ledger.add_member(MemberIdentity::freeform(name), role);
        }

        if let Some(existing) = self.directory.find_by_name(name)? {
            return self.add_saved_party(existing.id, Some(role));
        }

        let mut party = SavedParty::new(name, role.clone());
        let member_id = self.ledger.add_member(party.identity(), role)?;
        party.touch();
        let party_id = party.id;
        self.store_or_undo(member_id, party)?;

        tracing::info!(party = %party_id, member = %member_id, "New party saved and added");
        Ok(member_id)
    }

    /// Write `party` to the directory. If the write fails, the member just
    /// added for it is taken out of the ledger again.
    fn store_or_undo(&mut self, member_id: MemberId, party: SavedParty) -> Result<()> {
        if let Err(err) = self.directory.upsert(party) {
            tracing::warn!(
                member = %member_id,
                error = %err,
                "Directory write failed; member dropped"
            );
            self.ledger.remove_member_by_id(member_id)?;
            return Err(err);
        }
        Ok(())
    }

    /// Remove the member at `index` and drop any draft it had.
    pub fn remove_member(&mut self, index: usize) -> Result<GangMember> {
        let removed = self.ledger.remove_member(index)?;
        self.edits.prune(&self.ledger);
        Ok(removed)
    }

    /// Delete a party from the directory. Members already in the ledger
    /// are unaffected.
    pub fn forget_party(&mut self, id: PartyId) -> Result<bool> {
        self.directory.remove(id)
    }

    // -----------------------------------------------------------------
    // Amounts
    // -----------------------------------------------------------------

    /// Apply an exact amount (clamped).
    pub fn set_amount(&mut self, index: usize, amount: Money) -> Result<Money> {
        self.ledger.set_amount(index, amount)
    }

    /// Apply a slider position (normalized, then clamped).
    pub fn slide_amount(&mut self, index: usize, position: f64) -> Result<Money> {
        self.ledger
            .set_amount(index, input::normalize_slider(position))
    }

    /// Start typing into a member's amount field, seeded with its current
    /// amount.
    pub fn begin_edit(&mut self, id: MemberId) -> Result<()> {
        let index = self
            .ledger
            .position_of(id)
            .ok_or(GangSplitError::MemberNotFound(id))?;
        let current = self.ledger.members()[index].amount;
        self.edits.begin(id, current.to_string());
        Ok(())
    }

    /// Replace the typed draft for a member.
    ///
    /// # Errors
    /// Returns `MemberNotFound` if `id` is not in the ledger.
    pub fn type_amount(&mut self, id: MemberId, text: &str) -> Result<()> {
        if self.ledger.position_of(id).is_none() {
            return Err(GangSplitError::MemberNotFound(id));
        }
        self.edits.update_draft(id, text);
        Ok(())
    }

    /// Finish typing: the draft is normalized and clamped into the ledger.
    pub fn commit_edit(&mut self, id: MemberId) -> Result<Money> {
        self.edits.commit(&mut self.ledger, id)
    }

    /// Give the pair at `index`, `index + 1` equal halves of their amounts
    /// plus whatever is unallocated.
    pub fn split_with_next(&mut self, index: usize) -> Result<Money> {
        self.ledger.split_adjacent_pair(index)
    }

    /// Change the invoice total; members are re-clamped if it shrinks.
    pub fn set_total(&mut self, total: Money) {
        self.ledger.set_total(total);
    }

    // -----------------------------------------------------------------
    // Submit
    // -----------------------------------------------------------------

    /// Whether the submit action should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.ledger.ready_to_finalize()
    }

    /// Seal the ledger for the persistence layer.
    ///
    /// # Errors
    /// Returns `NotReadyToFinalize`; for a partial split its message asks
    /// the user to allocate the full amount.
    pub fn submit(&self) -> Result<AllocationBreakdown> {
        self.ledger.finalize().inspect_err(|err| {
            tracing::warn!(error = %err, "Submit blocked");
        })
    }
}
