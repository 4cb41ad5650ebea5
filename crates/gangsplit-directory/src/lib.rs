//! # gangsplit-directory
//!
//! The saved-party directory and the editor flow that drives a ledger.
//!
//! ## Architecture
//!
//! 1. **SavedPartyDirectory**: injected read/write collaborator holding
//!    previously used gang members for quick re-add
//! 2. **InMemoryDirectory** / **JsonFileDirectory**: the two stores
//! 3. **GangDivisionFlow**: owns one ledger and its edit state for the life
//!    of an open invoice editor, and is the only thing that talks to both the
//!    ledger and the directory
//!
//! The ledger never sees the directory; the flow resolves parties and hands
//! the ledger plain identities.

pub mod directory;
pub mod flow;
pub mod json_file;

pub use directory::{InMemoryDirectory, SavedPartyDirectory};
pub use flow::GangDivisionFlow;
pub use json_file::JsonFileDirectory;
