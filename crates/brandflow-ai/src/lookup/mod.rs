//! External availability lookups.
//!
//! Domain and trademark checks sit behind traits with two implementations
//! each: an HTTP backend and a deterministic stub. Which one runs is decided
//! at construction time by configuration. Backends convert their own
//! failures into conservative defaults (domain available, trademark risk
//! unknown) so callers never see a lookup error.

mod domain;
mod trademark;

pub use domain::{
    DomainLookup, PREMIUM_EXTENSIONS, RdapDomainLookup, StubDomainLookup, normalize_name,
    premium_fqdns,
};
pub use trademark::{StubTrademarkSearch, TrademarkSearch, UsptoTrademarkSearch};

/// Stable FNV-1a hash used by the deterministic stubs.
///
/// `std` hashers are randomly seeded per process; the stubs need the same
/// verdict for the same name on every run.
pub(crate) fn stable_hash(input: &str) -> u64 {
    input
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
        })
}
