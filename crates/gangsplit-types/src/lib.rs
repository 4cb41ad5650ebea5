//! # gangsplit-types
//!
//! Shared types, errors, and configuration for the **GangSplit** allocation
//! engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Money**: [`Money`], fixed-point minor units (pence)
//! - **Identifiers**: [`PartyId`], [`MemberId`]
//! - **Member model**: [`GangMember`], [`MemberIdentity`], [`Role`]
//! - **Saved parties**: [`SavedParty`]
//! - **Finalize handoff**: [`Allocation`], [`AllocationBreakdown`], [`FinalizeBlocker`]
//! - **Configuration**: [`LedgerConfig`]
//! - **Errors**: [`GangSplitError`] with `GS_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod allocation;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod member;
pub mod money;
pub mod party;

// Re-export all primary types at crate root for ergonomic imports:
//   use gangsplit_types::{Money, GangMember, Role, ...};

pub use allocation::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use member::*;
pub use money::*;
pub use party::*;

// Constants are accessed via `gangsplit_types::constants::FOO`
// (not re-exported to avoid name collisions).
