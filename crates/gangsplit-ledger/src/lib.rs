//! # gangsplit-ledger
//!
//! **Allocation engine**: splits a fixed invoice total across a dynamic set
//! of gang members, to the penny, without ever letting the members claim
//! more than the total.
//!
//! ## Architecture
//!
//! 1. **input**: normalizes typed text and slider positions into [`Money`](gangsplit_types::Money)
//! 2. **AllocationLedger**: owns the total and the ordered members; every
//!    edit is clamped so `sum(amounts) <= total` always holds
//! 3. **EditState**: per-member "being typed" drafts, kept outside the
//!    ledger; committing a draft is the clamp point
//! 4. **invariants**: checks the ledger rules after every mutation
//!
//! ## Edit Flow
//!
//! ```text
//! keystroke → EditState.update_draft() → (blur) EditState.commit()
//!     → input::normalize_typed() → AllocationLedger.set_amount() (clamped)
//! slider    → input::normalize_slider() → AllocationLedger.set_amount()
//! submit    → AllocationLedger.ready_to_finalize() → finalize() → AllocationBreakdown
//! ```
//!
//! The ledger is a synchronous in-memory reducer. Callers sharing it across
//! threads must wrap it in their own lock.

pub mod edit_state;
pub mod input;
pub mod invariants;
pub mod ledger;

pub use edit_state::EditState;
pub use ledger::AllocationLedger;
