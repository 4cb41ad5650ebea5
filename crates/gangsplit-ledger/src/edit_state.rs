//! Per-member typing state, kept beside the ledger rather than inside it.
//!
//! While a member's amount is being typed the raw text lives here as a
//! draft and the ledger is untouched. Committing the draft (the "editing"
//! flag going from true to false) normalizes the text and pushes it through
//! the ledger's clamp.

use std::collections::HashMap;

use gangsplit_types::{GangSplitError, MemberId, Money, Result};

use crate::{AllocationLedger, input};

/// Drafts keyed by member id. A member with a draft is "being edited".
#[derive(Debug, Default, Clone)]
pub struct EditState {
    drafts: HashMap<MemberId, String>,
}

impl EditState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `id`, seeding the draft (usually the current amount).
    pub fn begin(&mut self, id: MemberId, seed: impl Into<String>) {
        self.drafts.insert(id, seed.into());
    }

    /// Replace the draft text. Starts editing if it had not started.
    pub fn update_draft(&mut self, id: MemberId, text: impl Into<String>) {
        self.drafts.insert(id, text.into());
    }

    #[must_use]
    pub fn is_editing(&self, id: MemberId) -> bool {
        self.drafts.contains_key(&id)
    }

    #[must_use]
    pub fn draft(&self, id: MemberId) -> Option<&str> {
        self.drafts.get(&id).map(String::as_str)
    }

    /// What `remaining` would be if the draft were applied unclamped.
    ///
    /// May be negative, which is the cue to flag the field while typing.
    /// `None` if `id` is not being edited or is not in the ledger.
    #[must_use]
    pub fn preview_remaining(&self, ledger: &AllocationLedger, id: MemberId) -> Option<Money> {
        let draft = self.drafts.get(&id)?;
        let member = ledger.member(ledger.position_of(id)?)?;
        Some(ledger.remaining() + member.amount - input::normalize_typed(draft))
    }

    /// Stop editing `id` and apply the draft through the ledger clamp.
    ///
    /// Returns the amount the member now holds. Committing a member that
    /// is not being edited applies nothing and returns its current amount.
    ///
    /// # Errors
    /// Returns `MemberNotFound` if the member has left the ledger; the
    /// stale draft is discarded.
    pub fn commit(&mut self, ledger: &mut AllocationLedger, id: MemberId) -> Result<Money> {
        let draft = self.drafts.remove(&id);
        let index = ledger
            .position_of(id)
            .ok_or(GangSplitError::MemberNotFound(id))?;

        match draft {
            Some(text) => {
                let requested = input::normalize_typed(&text);
                let applied = ledger.set_amount(index, requested)?;
                tracing::debug!(
                    member = %id,
                    draft = %text,
                    applied = %applied,
                    "Committed typed amount"
                );
                Ok(applied)
            }
            None => Ok(ledger.members()[index].amount),
        }
    }

    /// Abandon the draft without touching the ledger. Returns whether
    /// `id` was being edited.
    pub fn cancel(&mut self, id: MemberId) -> bool {
        self.drafts.remove(&id).is_some()
    }

    /// Drop drafts of members no longer in the ledger.
    pub fn prune(&mut self, ledger: &AllocationLedger) {
        self.drafts.retain(|id, _| ledger.position_of(*id).is_some());
    }

    /// Number of members being edited.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}
