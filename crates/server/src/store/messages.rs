//! Contact message collection and its snapshot document.
//!
//! Messages are append-only from the application's perspective: there is
//! no update or delete operation.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use volga_core::{Email, MessageId};

use super::StoreError;

/// A cooperation/contact inquiry record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub name: String,
    pub email: Email,
    pub message: String,
    /// Creation time, server-stamped, serialized as ISO-8601.
    pub timestamp: DateTime<Utc>,
}

/// Fields for a message about to be recorded.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// On-disk document shape: a single object with one array field.
#[derive(Debug, Deserialize)]
struct MessagesDocument {
    #[serde(default)]
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct MessagesDocumentRef<'a> {
    messages: &'a [Message],
}

/// The message collection, mirrored to `messages.json`.
pub(super) struct Messages {
    path: PathBuf,
    inner: Mutex<Vec<Message>>,
}

impl Messages {
    /// Load the collection from disk; malformed or missing data starts empty.
    pub(super) async fn load(path: PathBuf) -> Self {
        let messages = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<MessagesDocument>(&bytes) {
                Ok(doc) => doc.messages,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err,
                        "Malformed messages document, starting with an empty inbox");
                    Vec::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(),
                    "No messages document found, starting with an empty inbox");
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err,
                    "Failed to read messages document, starting with an empty inbox");
                Vec::new()
            }
        };

        tracing::info!(count = messages.len(), "Messages loaded");
        Self {
            path,
            inner: Mutex::new(messages),
        }
    }

    pub(super) async fn add(&self, draft: NewMessage) -> Result<Message, StoreError> {
        if draft.name.trim().is_empty() {
            return Err(StoreError::Validation("name is required".to_string()));
        }
        if draft.message.trim().is_empty() {
            return Err(StoreError::Validation("message is required".to_string()));
        }
        let email = Email::parse(draft.email.trim())
            .map_err(|e| StoreError::Validation(e.to_string()))?;

        let message = Message {
            id: MessageId::generate(),
            name: draft.name,
            email,
            message: draft.message,
            timestamp: Utc::now(),
        };

        // Lock held across mutate + persist, same as the product collection.
        let mut items = self.inner.lock().await;
        items.push(message.clone());
        self.persist(&items).await?;

        tracing::info!(id = %message.id, "Message recorded");
        Ok(message)
    }

    pub(super) async fn list(&self) -> Vec<Message> {
        self.inner.lock().await.clone()
    }

    /// Rewrite the full snapshot document.
    async fn persist(&self, items: &[Message]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(&MessagesDocumentRef { messages: items })?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    pub(super) fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::Store;
    use super::*;
    use tempfile::TempDir;

    fn inquiry() -> NewMessage {
        NewMessage {
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            message: "hi".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_message_stamps_timestamp_and_persists() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path()).await.unwrap();

        let before = Utc::now();
        let recorded = store.add_message(inquiry()).await.unwrap();
        assert!(recorded.timestamp >= before);

        let raw = std::fs::read_to_string(store.messages_path()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let on_disk = doc.get("messages").unwrap().as_array().unwrap();
        assert_eq!(on_disk.len(), 1);
        let entry = on_disk.first().unwrap();
        assert_eq!(entry.get("email").unwrap().as_str().unwrap(), "a@b.com");
        // ISO-8601 timestamp, non-empty
        assert!(!entry.get("timestamp").unwrap().as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_message_rejects_missing_fields() {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path()).await.unwrap();

        let mut draft = inquiry();
        draft.name = String::new();
        assert!(matches!(
            store.add_message(draft).await,
            Err(StoreError::Validation(_))
        ));

        let mut draft = inquiry();
        draft.email = "not-an-email".to_string();
        assert!(matches!(
            store.add_message(draft).await,
            Err(StoreError::Validation(_))
        ));

        let mut draft = inquiry();
        draft.message = "  ".to_string();
        assert!(matches!(
            store.add_message(draft).await,
            Err(StoreError::Validation(_))
        ));

        assert!(store.list_messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_messages_survive_restart() {
        let dir = TempDir::new().unwrap();
        {
            let store = Store::open(dir.path()).await.unwrap();
            store.add_message(inquiry()).await.unwrap();
        }

        let store = Store::open(dir.path()).await.unwrap();
        let messages = store.list_messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages.first().unwrap().name, "A");
    }

    #[tokio::test]
    async fn test_corrupt_messages_do_not_affect_products() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("messages.json"), "[oops").unwrap();
        {
            let store = Store::open(dir.path()).await.unwrap();
            store
                .add_product(crate::store::NewProduct {
                    name: "Chair".to_string(),
                    desc: "Oak chair".to_string(),
                    price: volga_core::Price::new(1500),
                    photos: Vec::new(),
                    category: volga_core::Category::Furniture,
                    status: "available".to_string(),
                })
                .await
                .unwrap();
        }

        let store = Store::open(dir.path()).await.unwrap();
        assert!(store.list_messages().await.is_empty());
        assert_eq!(
            store
                .list_products(&crate::store::ProductFilter::default())
                .await
                .len(),
            1
        );
    }
}
