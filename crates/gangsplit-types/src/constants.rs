//! System-wide constants for the GangSplit allocation engine.

/// Decimal places carried by [`crate::Money`] (pence).
pub const MONEY_SCALE: u32 = 2;

/// Minor units in one major currency unit (100 pence to the pound).
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Currency assumed when a config does not name one.
pub const DEFAULT_CURRENCY: &str = "GBP";

/// Maximum members a single ledger accepts by default.
pub const DEFAULT_MAX_MEMBERS: usize = 64;

/// Schema version written into the saved-party cache file.
pub const DIRECTORY_FILE_VERSION: u32 = 1;

/// Domain separator for allocation breakdown digests.
pub const BREAKDOWN_DIGEST_DOMAIN: &[u8] = b"gangsplit:breakdown:v1:";
