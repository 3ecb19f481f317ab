//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint and the request/response schemas
//! from the inbound layer. The generated specification backs Swagger UI in
//! debug builds.

use utoipa::OpenApi;

use crate::domain::Error;
use crate::inbound::http::orders::{
    CreateOrderRequest, OrderDetailResponse, OrderItemBody, OrderItemResponse, OrderResponse,
};
use crate::inbound::http::products::{
    CreateProductRequest, PatchProductRequest, ProductResponse,
};
use crate::inbound::http::query::{ProductOrderParam, UserOrderParam};
use crate::inbound::http::users::{
    CreateUserRequest, PatchUserPreferenceBody, PatchUserRequest, UserDetailResponse,
    UserPreferenceBody, UserResponse,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront backend API",
        description = "CRUD over users, products, and orders backed by PostgreSQL."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::list_saved_products,
        crate::inbound::http::users::list_user_orders,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::orders::create_order,
        crate::inbound::http::orders::get_order,
        crate::inbound::http::orders::delete_order,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        CreateUserRequest,
        PatchUserRequest,
        PatchUserPreferenceBody,
        UserPreferenceBody,
        UserResponse,
        UserDetailResponse,
        CreateProductRequest,
        PatchProductRequest,
        ProductResponse,
        CreateOrderRequest,
        OrderItemBody,
        OrderResponse,
        OrderItemResponse,
        OrderDetailResponse,
        UserOrderParam,
        ProductOrderParam,
    )),
    tags(
        (name = "users", description = "Operations related to users"),
        (name = "products", description = "Operations related to the product catalogue"),
        (name = "orders", description = "Operations related to orders"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_registers_all_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/users",
            "/users/{id}",
            "/users/{id}/saved-products",
            "/users/{id}/orders",
            "/products",
            "/products/{id}",
            "/orders",
            "/orders/{id}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn openapi_error_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert!(schemas.keys().any(|name| name.ends_with("Error")));
    }
}
