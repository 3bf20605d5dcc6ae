//! Flat-file store for the product catalog and the message inbox.
//!
//! # Layout
//!
//! Two independent JSON documents live under the data directory:
//!
//! - `products.json` - `{"products": [Product, ...]}`
//! - `messages.json` - `{"messages": [Message, ...]}`
//!
//! Each document is a full snapshot of the corresponding in-memory
//! collection and is rewritten in its entirety on every mutation. There is
//! no delta log; the last writer wins.
//!
//! # Ownership
//!
//! The [`Store`] is the sole writer of both documents. Each collection
//! lives behind its own async mutex, held across the mutate-and-persist
//! pair so every mutation is atomic with respect to its own file.
//!
//! # Corruption recovery
//!
//! A missing or malformed document is logged and treated as an empty
//! collection. Corrupt data must never prevent the server from starting.

pub mod messages;
pub mod products;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use messages::{Message, NewMessage};
pub use products::{NewProduct, Product, ProductFilter};

use messages::Messages;
use products::Products;
use volga_core::ProductId;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field is missing or invalid.
    #[error("{0}")]
    Validation(String),

    /// No record with the given id exists.
    #[error("{0} not found")]
    NotFound(String),

    /// Reading or writing a document failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding a snapshot document failed.
    #[error("store serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The persistence layer: in-memory collections mirrored to JSON documents.
pub struct Store {
    products: Products,
    messages: Messages,
}

impl Store {
    /// Open the store, loading both documents from the data directory.
    ///
    /// Missing or malformed documents start as empty collections; only a
    /// failure to create the data directory itself is fatal.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the data directory cannot be created.
    pub async fn open(data_dir: &Path) -> Result<Self, StoreError> {
        tokio::fs::create_dir_all(data_dir).await?;

        let products = Products::load(data_dir.join("products.json")).await;
        let messages = Messages::load(data_dir.join("messages.json")).await;

        Ok(Self { products, messages })
    }

    /// Current product snapshot, insertion order preserved, with optional
    /// category and substring filtering applied.
    pub async fn list_products(&self, filter: &ProductFilter) -> Vec<Product> {
        self.products.list(filter).await
    }

    /// Validate a draft, assign a fresh id, append, and persist the
    /// products document before returning.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` when `name` or `desc` is empty,
    /// or `StoreError::Io`/`StoreError::Serialize` when persisting fails.
    pub async fn add_product(&self, draft: NewProduct) -> Result<Product, StoreError> {
        self.products.add(draft).await
    }

    /// Remove a product by id and persist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` when no product matches,
    /// or `StoreError::Io`/`StoreError::Serialize` when persisting fails.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), StoreError> {
        self.products.delete(id).await
    }

    /// Validate a draft, stamp the current time, append, and persist the
    /// messages document before returning.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` when a field is empty or the email
    /// is malformed, or `StoreError::Io`/`StoreError::Serialize` when
    /// persisting fails.
    pub async fn add_message(&self, draft: NewMessage) -> Result<Message, StoreError> {
        self.messages.add(draft).await
    }

    /// Current message snapshot, insertion order preserved.
    pub async fn list_messages(&self) -> Vec<Message> {
        self.messages.list().await
    }

    /// Path of the products document (for diagnostics and tests).
    #[must_use]
    pub fn products_path(&self) -> &PathBuf {
        self.products.path()
    }

    /// Path of the messages document (for diagnostics and tests).
    #[must_use]
    pub fn messages_path(&self) -> &PathBuf {
        self.messages.path()
    }
}
