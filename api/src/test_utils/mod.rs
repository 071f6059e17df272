//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! A single in-memory store implements every repository port, so services that
//! touch several tables see one consistent state. Seeding through the `with_*`
//! builders does not count as a write.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
