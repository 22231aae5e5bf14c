//! Database layer - connection pool and storage access
//!
//! # Design Principles
//!
//! - Bounded connection pool (max 5 by default), injected rather than global
//! - One parameterized statement per operation, no transactions
//! - Existence inferred from affected rows, no check-then-write
//! - Connections go back to the pool on every path

pub mod directory;
pub mod pool;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use directory::{DbError, Directory, MutationOutcome, MySqlDirectory, PoolStatus};
pub use pool::{create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryDirectory;
