//! Product API handlers.
//!
//! ```text
//! GET    /products?offset&limit&order&category
//! GET    /products/{id}
//! POST   /products
//! PATCH  /products/{id}
//! DELETE /products/{id}
//! ```
//!
//! The by-id read and patch return a JSON `null` body with 200 when the id
//! is unknown instead of failing; delete returns 404. Both behaviours are
//! part of the public contract.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, NewProduct, Product, ProductPatch, ProductValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::query::ProductListQuery;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /products`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateProductRequest {
    pub name: String,
    pub category: String,
    pub price: f64,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = ProductValidationError;

    fn try_from(value: CreateProductRequest) -> Result<Self, Self::Error> {
        NewProduct::try_new(value.name, value.category, value.price)
    }
}

/// Request body for `PATCH /products/{id}`; absent fields are unchanged.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatchProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl TryFrom<PatchProductRequest> for ProductPatch {
    type Error = ProductValidationError;

    fn try_from(value: PatchProductRequest) -> Result<Self, Self::Error> {
        ProductPatch::try_new(value.name, value.category, value.price)
    }
}

/// Product representation returned by every product read.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            category: product.category,
            price: product.price,
            created_at: product.created_at,
        }
    }
}

fn map_product_validation_error(err: ProductValidationError) -> Error {
    Error::validation(err.to_string())
}

/// List products, newest first unless overridden, optionally filtered by
/// category.
#[utoipa::path(
    get,
    path = "/products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "Products inside the requested window", body = [ProductResponse]),
        (status = 400, description = "Invalid query parameters", body = Error)
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    query: web::Query<ProductListQuery>,
) -> ApiResult<web::Json<Vec<ProductResponse>>> {
    let products = state
        .products
        .list(query.page(), query.sort_order(), query.category.as_deref())
        .await?;

    Ok(web::Json(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

/// Fetch a single product; an unknown id yields a `null` body, not 404.
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = Uuid, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "The product, or null when absent", body = ProductResponse),
        (status = 400, description = "Invalid identifier", body = Error)
    ),
    tags = ["products"],
    operation_id = "getProduct"
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let product = state.products.find_by_id(path.into_inner()).await?;

    Ok(match product {
        Some(product) => HttpResponse::Ok().json(ProductResponse::from(product)),
        None => HttpResponse::Ok().json(serde_json::Value::Null),
    })
}

/// Create a product. Responds 200, unlike the other create endpoints; the
/// asymmetry is part of the public contract.
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Created product", body = ProductResponse),
        (status = 400, description = "Invalid payload or duplicate name", body = Error)
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    payload: web::Json<CreateProductRequest>,
) -> ApiResult<web::Json<ProductResponse>> {
    let input =
        NewProduct::try_from(payload.into_inner()).map_err(map_product_validation_error)?;
    let created = state.products.create(&input).await?;

    Ok(web::Json(created.into()))
}

/// Apply a partial update; an unknown id yields a `null` body, not 404.
#[utoipa::path(
    patch,
    path = "/products/{id}",
    params(("id" = Uuid, Path, description = "Product identifier")),
    request_body = PatchProductRequest,
    responses(
        (status = 200, description = "Updated product, or null when absent", body = ProductResponse),
        (status = 400, description = "Invalid payload", body = Error)
    ),
    tags = ["products"],
    operation_id = "updateProduct"
)]
#[patch("/products/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<PatchProductRequest>,
) -> ApiResult<HttpResponse> {
    let patch =
        ProductPatch::try_from(payload.into_inner()).map_err(map_product_validation_error)?;
    let updated = state.products.update(path.into_inner(), &patch).await?;

    Ok(match updated {
        Some(product) => HttpResponse::Ok().json(ProductResponse::from(product)),
        None => HttpResponse::Ok().json(serde_json::Value::Null),
    })
}

/// Delete a product.
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = Uuid, Path, description = "Product identifier")),
    responses(
        (status = 204, description = "Product removed"),
        (status = 404, description = "Unknown product", body = Error)
    ),
    tags = ["products"],
    operation_id = "deleteProduct"
)]
#[delete("/products/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let removed = state.products.delete(path.into_inner()).await?;
    if !removed {
        return Err(Error::not_found("product not found"));
    }

    Ok(HttpResponse::NoContent().finish())
}
