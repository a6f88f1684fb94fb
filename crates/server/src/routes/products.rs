//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use dripden_core::{ProductId, ShopId};

use crate::db::ProductRepository;
use crate::db::products::{NewProduct, ProductFilter};
use crate::error::{AppError, FieldIssue, Result};
use crate::middleware::RequireAuth;
use crate::models::Product;
use crate::state::AppState;

/// Query parameters for listing products.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub shop_id: Option<ShopId>,
    pub search: Option<String>,
    pub category: Option<String>,
}

/// Request body for creating a product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub shop_id: ShopId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    #[serde(default)]
    pub stock: i32,
    pub category: Option<String>,
}

impl CreateProductRequest {
    /// Validate the request, collecting every field problem.
    fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();

        if self.name.trim().is_empty() {
            issues.push(FieldIssue::new("name", "must not be empty"));
        }
        if self.price < Decimal::ZERO {
            issues.push(FieldIssue::new("price", "must not be negative"));
        }
        if self.stock < 0 {
            issues.push(FieldIssue::new("stock", "must not be negative"));
        }

        issues
    }
}

/// List products, optionally scoped and filtered.
///
/// # Errors
///
/// Returns 500 if the database query fails.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.pool());
    let products = repo
        .list(&ProductFilter {
            shop_id: query.shop_id,
            search: query.search,
            category: query.category,
        })
        .await?;

    Ok(Json(products))
}

/// Get a product by ID.
///
/// # Errors
///
/// Returns 404 if the product doesn't exist.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let repo = ProductRepository::new(state.pool());
    let product = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_owned()))?;

    Ok(Json(product))
}

/// Create a product.
///
/// # Errors
///
/// Returns 400 on validation failure, 409 if the shop doesn't exist.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(body): Json<CreateProductRequest>,
) -> Result<Json<Product>> {
    let issues = body.validate();
    if !issues.is_empty() {
        return Err(AppError::Validation(issues));
    }

    let repo = ProductRepository::new(state.pool());
    let product = repo
        .create(&NewProduct {
            shop_id: body.shop_id,
            name: body.name,
            description: body.description,
            price: body.price,
            image: body.image,
            images: body.images,
            sizes: body.sizes,
            colors: body.colors,
            stock: body.stock,
            category: body.category,
        })
        .await?;

    Ok(Json(product))
}
