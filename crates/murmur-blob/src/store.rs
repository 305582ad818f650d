use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use futures::StreamExt;
use murmur_config::StoreConfig;
use object_store::{ObjectStore, ObjectStoreScheme, PutPayload, path::Path as StorePath};
use secrecy::ExposeSecret;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::{BlobError, FileReference, Loader, Persister};

/// Loader and persister over object stores and the local filesystem
pub struct BlobStore {
    base: Option<BaseStore>,
    client_options: Vec<(String, String)>,
}

/// The configured store that path references resolve against
struct BaseStore {
    store: Arc<dyn ObjectStore>,
    prefix: StorePath,
    url: Url,
}

/// Where a reference points once resolved
enum Location {
    Object { store: Arc<dyn ObjectStore>, path: StorePath },
    Local(PathBuf),
}

impl BlobStore {
    /// Build the blob store from configuration
    ///
    /// Opens the base store eagerly so that bad credentials or an unknown
    /// scheme fail at startup rather than on the first request.
    pub fn from_config(config: &StoreConfig) -> Result<Self, BlobError> {
        let client_options: Vec<(String, String)> = config
            .client_options
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let base = match config.url {
            Some(ref url) => {
                let options = config
                    .options
                    .iter()
                    .map(|(key, value)| (key.clone(), value.expose_secret().to_string()))
                    .chain(client_options.iter().cloned());

                let (store, prefix) = open_url(url, options)?;

                tracing::debug!(url = %url, "opened base object store");

                Some(BaseStore {
                    store,
                    prefix,
                    url: url.clone(),
                })
            }
            None => None,
        };

        Ok(Self { base, client_options })
    }

    /// Store used for filesystem-only setups and tests
    pub fn local() -> Self {
        Self {
            base: None,
            client_options: Vec::new(),
        }
    }

    fn locate(&self, reference: &FileReference) -> Result<Location, BlobError> {
        match reference {
            FileReference::Url(url) => {
                let (store, path) = open_url(url, self.client_options.iter().cloned())?;
                Ok(Location::Object { store, path })
            }
            FileReference::Path(path) => match self.base {
                Some(ref base) => {
                    let relative = StorePath::parse(path.trim_start_matches('/')).map_err(|e| BlobError::InvalidPath {
                        path: path.clone(),
                        message: e.to_string(),
                    })?;

                    tracing::trace!(base = %base.url, path = %relative, "resolved path against base store");

                    Ok(Location::Object {
                        store: Arc::clone(&base.store),
                        path: base.prefix.parts().chain(relative.parts()).collect(),
                    })
                }
                None => Ok(Location::Local(PathBuf::from(path))),
            },
        }
    }
}

fn open_url(
    url: &Url,
    options: impl IntoIterator<Item = (String, String)>,
) -> Result<(Arc<dyn ObjectStore>, StorePath), BlobError> {
    if ObjectStoreScheme::parse(url).is_err() {
        return Err(BlobError::UnsupportedReference(url.to_string()));
    }

    let (store, path) = object_store::parse_url_opts(url, options)?;

    Ok((Arc::from(store), path))
}

#[async_trait]
impl Loader for BlobStore {
    async fn load(&self, reference: &FileReference, dst: &std::path::Path) -> Result<(), BlobError> {
        tracing::debug!(reference = %reference, "loading blob");

        match self.locate(reference)? {
            Location::Object { store, path } => {
                let mut stream = store.get(&path).await?.into_stream();
                let mut file = tokio::fs::File::create(dst).await?;
                let mut written: u64 = 0;

                while let Some(chunk) = stream.next().await {
                    let chunk = chunk?;
                    file.write_all(&chunk).await?;
                    written += chunk.len() as u64;
                }

                file.flush().await?;

                tracing::debug!(reference = %reference, bytes = written, "blob loaded");
            }
            Location::Local(path) => {
                let written = tokio::fs::copy(&path, dst).await?;

                tracing::debug!(reference = %reference, bytes = written, "local file loaded");
            }
        }

        Ok(())
    }
}

#[async_trait]
impl Persister for BlobStore {
    async fn persist(&self, reference: &FileReference, src: Vec<u8>) -> Result<(), BlobError> {
        let size = src.len();

        match self.locate(reference)? {
            Location::Object { store, path } => {
                store.put(&path, PutPayload::from(src)).await?;
            }
            Location::Local(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&path, src).await?;
            }
        }

        tracing::debug!(reference = %reference, bytes = size, "blob persisted");

        Ok(())
    }
}
