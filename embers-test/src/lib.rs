//! Test utilities for Embers.
//!
//! The [`MockProvider`] stands in for a real Firebird pool: tests script
//! the responses each round trip should see, drive a repository, then
//! assert on the recorded statements and the acquire/release counts.

mod executor;

pub use executor::{MockConn, MockDriverError, MockProvider, Statement};
