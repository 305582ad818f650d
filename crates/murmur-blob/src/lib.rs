//! Blob access for transcription inputs and outputs
//!
//! The executor only sees the [`Loader`] and [`Persister`] traits. The
//! [`BlobStore`] implementation is backed by `object_store` for URL
//! references and configured stores, and by the local filesystem for bare
//! paths when no store is configured.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod reference;
mod store;

use std::path::Path;

use async_trait::async_trait;

pub use error::BlobError;
pub use reference::FileReference;
pub use store::BlobStore;

/// Fetches a referenced blob into a local file
#[async_trait]
pub trait Loader: Send + Sync {
    /// Copy the blob behind `reference` into `dst`, replacing its content
    async fn load(&self, reference: &FileReference, dst: &Path) -> Result<(), BlobError>;
}

/// Writes a blob to a referenced location
#[async_trait]
pub trait Persister: Send + Sync {
    /// Store `src` at `reference`, replacing any previous content
    async fn persist(&self, reference: &FileReference, src: Vec<u8>) -> Result<(), BlobError>;
}
