//! Business logic services.

pub mod upload;

pub use upload::{UploadError, UploadStore, UploadedFile};
