//! Ledger invariant checker.
//!
//! ```text
//! total >= 0
//! ∀ member: amount >= 0
//! Σ(amount) <= total
//! ∀ saved party: at most one member
//! ```
//!
//! The ledger asserts these after every mutation in debug builds; tests and
//! callers that rebuild state by hand can check them explicitly.

use std::collections::HashSet;

use gangsplit_types::{GangSplitError, Result};

use crate::AllocationLedger;

/// Verify every ledger invariant.
///
/// # Errors
/// Returns [`GangSplitError::InvariantViolation`] naming the first broken rule.
pub fn verify(ledger: &AllocationLedger) -> Result<()> {
    if ledger.total().is_negative() {
        return Err(violation(format!("total {} is negative", ledger.total())));
    }

    if let Some((index, member)) = ledger
        .members()
        .iter()
        .enumerate()
        .find(|(_, m)| m.amount.is_negative())
    {
        return Err(violation(format!(
            "member {index} ({}) holds negative amount {}",
            member.identity, member.amount
        )));
    }

    let allocated = ledger.total_allocated();
    if allocated > ledger.total() {
        return Err(violation(format!(
            "allocated {allocated} exceeds total {}",
            ledger.total()
        )));
    }

    let mut seen = HashSet::new();
    for party_id in ledger.members().iter().filter_map(|m| m.party_id()) {
        if !seen.insert(party_id) {
            return Err(violation(format!("{party_id} appears more than once")));
        }
    }

    Ok(())
}

fn violation(reason: String) -> GangSplitError {
    GangSplitError::InvariantViolation { reason }
}
