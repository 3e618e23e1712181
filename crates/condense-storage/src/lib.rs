//! Condense storage backends.
//!
//! The [`Storage`] trait is the contract the upload stage delegates to;
//! [`LocalStorage`] is the filesystem backend and [`create_storage`] selects
//! a backend from configuration. Keys are `uploads/{uuid}.{ext}`.

pub mod factory;
pub mod keys;
pub mod local;
pub mod traits;

pub use factory::create_storage;
pub use local::LocalStorage;
pub use traits::{ProgressCallback, Storage, StorageError, StorageResult};
