//! Persistence module split across logical submodules. `connection` owns the
//! [`Store`] handle and schema; `plans` and `details` add the per-table
//! operations to it.

mod connection;
mod details;
mod plans;

/// Owned handle to the SQLite database and the operations on both tables.
pub use connection::Store;
