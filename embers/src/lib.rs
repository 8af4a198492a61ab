//! Embers — a minimal metadata-driven ORM for Firebird.
//!
//! This facade crate re-exports the Embers sub-crates through a single
//! dependency. Import everything you need with:
//!
//! ```ignore
//! use embers::prelude::*;
//! ```
//!
//! # Feature flags
//!
//! | Feature    | Default | Crate             |
//! |------------|---------|-------------------|
//! | `firebird` | **yes** | `embers-firebird` |
//!
//! # Overview
//!
//! Entity types declare their table/column mapping once, statically, via
//! [`Entity::descriptor`]; a shared [`DescriptorRegistry`] caches the
//! resolved metadata per type. [`SqlRepository`] composes the clause
//! builder and the row mapper around an injected connection provider and
//! exposes the five repository operations (`find_by_id`, `find`, `save`,
//! `update`, `delete`) plus `count`. SQL text is produced through a
//! pluggable [`Dialect`]; `embers-firebird` supplies the Firebird one.

pub use embers_data::*;

#[cfg(feature = "firebird")]
pub use embers_firebird;

pub mod prelude {
    //! Re-exports of the most commonly used Embers types.
    pub use embers_data::prelude::*;

    #[cfg(feature = "firebird")]
    pub use embers_firebird::{ConnectionConfig, FirebirdDialect};
}
