//! Query to LEGO set resolution.
//!
//! A query is hashed into an identifier key, the key is looked up in the
//! catalog, and when nothing lives there the key is narrowed (divided by ten)
//! until a set turns up or the candidate runs out. Every catalog answer is
//! memoized for the lifetime of the process.

mod cache;
mod key;
mod set_resolver;

pub use cache::{CacheStats, SetCache};
pub use key::{
    hash_code, identifier_key, narrow, narrowing_candidates, reduce_key, NarrowingCandidates,
    KEY_MODULUS, NARROWING_DIVISOR,
};
pub use set_resolver::{Resolution, SetResolver, DEFAULT_SET_ID};

use thiserror::Error;

use crate::external_catalog::CatalogError;

/// Errors surfaced by the resolver.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// A catalog lookup failed at the transport or protocol level.
    #[error("Catalog lookup for set {id} failed: {source}")]
    Catalog {
        id: i32,
        #[source]
        source: CatalogError,
    },

    /// The default set could not be found while priming.
    #[error("Default set {0} is not available in the catalog")]
    DefaultUnavailable(i32),

    /// A default substitution was needed before the resolver was primed.
    #[error("Resolver has not been primed with the default set")]
    NotPrimed,
}
