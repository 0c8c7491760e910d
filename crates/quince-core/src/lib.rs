//! The quince package store.
//!
//! A [`PackageStore`](store::PackageStore) maps package names to their
//! on-disk representation -- one file per (name, kind) pair -- and
//! derives metadata from the stored bytes through a
//! [`PackageParser`](quince_package::PackageParser) collaborator on
//! every operation. Saves parse before they write, writes replace
//! atomically, and a full listing fans out bounded concurrent
//! read-then-parse tasks and joins them before returning.

use error::StoreError;

pub mod error;
mod lock;
pub mod store;

pub use store::{ListFailure, Listing, PackageStore, DEFAULT_PARALLEL_READS};

pub type StoreResult<T> = std::result::Result<T, StoreError>;
