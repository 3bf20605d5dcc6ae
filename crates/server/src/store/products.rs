//! Product collection and its snapshot document.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use volga_core::{Category, Price, ProductId};

use super::StoreError;

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Server-generated, immutable once assigned.
    pub id: ProductId,
    pub name: String,
    pub desc: String,
    pub price: Price,
    /// Relative storage paths, in upload order. May be empty.
    pub photos: Vec<String>,
    pub category: Category,
    /// Free-text availability label.
    pub status: String,
}

/// Fields for a product about to be created.
///
/// `price` and `category` arrive already parsed; unparseable input is a
/// request-level validation failure and never reaches the store.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub desc: String,
    pub price: Price,
    pub photos: Vec<String>,
    pub category: Category,
    pub status: String,
}

/// Optional catalog filters for listing.
///
/// Matching is deliberately simple: category equality and a
/// case-insensitive substring scan over name and description.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub query: Option<String>,
}

impl ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category {
            if product.category != category {
                return false;
            }
        }
        if let Some(query) = &self.query {
            let needle = query.to_lowercase();
            if !needle.is_empty()
                && !product.name.to_lowercase().contains(&needle)
                && !product.desc.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// On-disk document shape: a single object with one array field.
#[derive(Debug, Deserialize)]
struct ProductsDocument {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Serialize)]
struct ProductsDocumentRef<'a> {
    products: &'a [Product],
}

/// The product collection, mirrored to `products.json`.
pub(super) struct Products {
    path: PathBuf,
    inner: Mutex<Vec<Product>>,
}

impl Products {
    /// Load the collection from disk; malformed or missing data starts empty.
    pub(super) async fn load(path: PathBuf) -> Self {
        let products = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<ProductsDocument>(&bytes) {
                Ok(doc) => doc.products,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err,
                        "Malformed products document, starting with an empty catalog");
                    Vec::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(),
                    "No products document found, starting with an empty catalog");
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err,
                    "Failed to read products document, starting with an empty catalog");
                Vec::new()
            }
        };

        tracing::info!(count = products.len(), "Products loaded");
        Self {
            path,
            inner: Mutex::new(products),
        }
    }

    pub(super) async fn list(&self, filter: &ProductFilter) -> Vec<Product> {
        let items = self.inner.lock().await;
        items.iter().filter(|p| filter.matches(p)).cloned().collect()
    }

    pub(super) async fn add(&self, draft: NewProduct) -> Result<Product, StoreError> {
        if draft.name.trim().is_empty() {
            return Err(StoreError::Validation("name is required".to_string()));
        }
        if draft.desc.trim().is_empty() {
            return Err(StoreError::Validation("desc is required".to_string()));
        }

        let product = Product {
            id: ProductId::generate(),
            name: draft.name,
            desc: draft.desc,
            price: draft.price,
            photos: draft.photos,
            category: draft.category,
            status: draft.status,
        };

        // Lock held across mutate + persist: the mutation is atomic with
        // respect to the products document.
        let mut items = self.inner.lock().await;
        debug_assert!(items.iter().all(|p| p.id != product.id));
        items.push(product.clone());
        self.persist(&items).await?;

        tracing::info!(id = %product.id, name = %product.name, "Product added");
        Ok(product)
    }

    pub(super) async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let mut items = self.inner.lock().await;
        let Some(index) = items.iter().position(|p| p.id == id) else {
            return Err(StoreError::NotFound("product".to_string()));
        };
        items.remove(index);
        self.persist(&items).await?;

        tracing::info!(id = %id, "Product deleted");
        Ok(())
    }

    /// Rewrite the full snapshot document.
    async fn persist(&self, items: &[Product]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(&ProductsDocumentRef { products: items })?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    pub(super) fn path(&self) -> &PathBuf {
        &self.path
    }
}
