//! Catalog listing and admin product mutation route handlers.

use axum::{
    Json,
    extract::{Multipart, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use volga_core::{Category, Price, ProductId};

use crate::error::{ApiResponse, AppError, Result};
use crate::middleware::RequireAdmin;
use crate::services::upload::UploadedFile;
use crate::state::AppState;
use crate::store::{NewProduct, Product, ProductFilter};

/// Optional catalog filters.
#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

/// List the catalog.
///
/// GET /products
///
/// Returns the full snapshot in insertion order; `?category=` narrows to
/// one canonical category and `?q=` does a case-insensitive substring
/// match over name and description.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>> {
    let category = query
        .category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let filter = ProductFilter {
        category,
        query: query.q,
    };
    Ok(Json(state.store().list_products(&filter).await))
}

/// Fields collected from the add-product multipart form.
#[derive(Debug, Default)]
struct ProductForm {
    name: String,
    desc: String,
    price: Option<String>,
    category: Option<String>,
    status: String,
    files: Vec<UploadedFile>,
}

impl ProductForm {
    /// Read the whole multipart body into memory.
    async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("invalid multipart form: {e}")))?
        {
            let field_name = field.name().unwrap_or_default().to_string();
            match field_name.as_str() {
                "name" => form.name = read_text(field).await?,
                "desc" => form.desc = read_text(field).await?,
                "price" => form.price = Some(read_text(field).await?),
                "category" => form.category = Some(read_text(field).await?),
                "status" => form.status = read_text(field).await?,
                "images" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::Validation(format!("failed to read uploaded file: {e}"))
                    })?;
                    // Browsers submit an empty part for an untouched file input
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.files.push(UploadedFile {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// Check required fields and parse the typed ones.
    fn validate(&self) -> Result<(Price, Category)> {
        if self.name.trim().is_empty() || self.desc.trim().is_empty() {
            return Err(AppError::Validation("all fields are required".to_string()));
        }
        let price = self
            .price
            .as_deref()
            .ok_or_else(|| AppError::Validation("all fields are required".to_string()))?
            .parse::<Price>()
            .map_err(|_| {
                AppError::Validation("price must be a non-negative integer".to_string())
            })?;
        let category = self
            .category
            .as_deref()
            .ok_or_else(|| AppError::Validation("category is required".to_string()))?
            .parse::<Category>()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        Ok((price, category))
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("invalid form field: {e}")))
}

/// Create a product from a multipart form.
///
/// POST /add-product (admin only)
///
/// Field validation happens before any file is written; uploads are
/// all-or-nothing; the store mutation only runs once every accepted file
/// is on disk.
#[instrument(skip_all)]
pub async fn add(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ApiResponse>> {
    let form = ProductForm::from_multipart(multipart).await?;
    let (price, category) = form.validate()?;

    let photos = state.uploads().store_files(form.files).await?;

    state
        .store()
        .add_product(NewProduct {
            name: form.name,
            desc: form.desc,
            price,
            photos,
            category,
            status: form.status,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// Delete request body.
///
/// An absent id deserializes as empty and is reported as not found.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteRequest {
    pub id: String,
}

/// Delete a product by id.
///
/// POST /delete-product (admin only)
///
/// An id that is not even a valid UUID is reported the same way as an
/// unknown one: 404.
#[instrument(skip_all, fields(id = %request.id))]
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(request): Json<DeleteRequest>,
) -> Result<Json<ApiResponse>> {
    let id = request
        .id
        .parse::<ProductId>()
        .map_err(|_| AppError::NotFound("product".to_string()))?;

    state.store().delete_product(id).await?;
    Ok(Json(ApiResponse::ok()))
}
