//! Order API handlers.
//!
//! ```text
//! POST   /orders
//! GET    /orders/{id}
//! DELETE /orders/{id}
//! ```
//!
//! Creation persists the order and its line items atomically. The detail
//! read attaches the derived `total`, the one computed field in the API.

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Error, NewOrder, NewOrderItem, Order, OrderItem, OrderValidationError, OrderWithItems,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Line item body accepted on order creation.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderItemBody {
    pub unit_price: f64,
    pub quantity: i32,
}

/// Request body for `POST /orders`.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateOrderRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub order_items: Vec<OrderItemBody>,
}

impl TryFrom<CreateOrderRequest> for NewOrder {
    type Error = OrderValidationError;

    fn try_from(value: CreateOrderRequest) -> Result<Self, Self::Error> {
        let items = value
            .order_items
            .into_iter()
            .map(|item| NewOrderItem::try_new(item.unit_price, item.quantity))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NewOrder::new(value.user_id, items))
    }
}

/// Order representation without items, as returned by the user sub-resource.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            created_at: order.created_at,
        }
    }
}

/// Line item representation.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub unit_price: f64,
    pub quantity: i32,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            id: item.id,
            unit_price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

/// Order with its items and the computed total.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub order_items: Vec<OrderItemResponse>,
    /// Sum of `unitPrice * quantity` over all items; never persisted.
    pub total: f64,
}

impl From<OrderWithItems> for OrderDetailResponse {
    fn from(value: OrderWithItems) -> Self {
        let total = value.total();
        Self {
            id: value.order.id,
            user_id: value.order.user_id,
            created_at: value.order.created_at,
            order_items: value.items.into_iter().map(OrderItemResponse::from).collect(),
            total,
        }
    }
}

fn map_order_validation_error(err: OrderValidationError) -> Error {
    Error::validation(err.to_string())
}

/// Create an order with its line items.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Created order with its items", body = OrderDetailResponse),
        (status = 400, description = "Invalid payload", body = Error)
    ),
    tags = ["orders"],
    operation_id = "createOrder"
)]
#[post("/orders")]
pub async fn create_order(
    state: web::Data<HttpState>,
    payload: web::Json<CreateOrderRequest>,
) -> ApiResult<HttpResponse> {
    let input = NewOrder::try_from(payload.into_inner()).map_err(map_order_validation_error)?;
    let created = state.orders.create(&input).await?;

    Ok(HttpResponse::Created().json(OrderDetailResponse::from(created)))
}

/// Fetch an order with its items and computed total.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = Uuid, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "The order", body = OrderDetailResponse),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "Unknown order", body = Error)
    ),
    tags = ["orders"],
    operation_id = "getOrder"
)]
#[get("/orders/{id}")]
pub async fn get_order(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<OrderDetailResponse>> {
    let order = state
        .orders
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| Error::not_found("order not found"))?;

    Ok(web::Json(order.into()))
}

/// Delete an order and its items.
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(("id" = Uuid, Path, description = "Order identifier")),
    responses(
        (status = 204, description = "Order removed"),
        (status = 404, description = "Unknown order", body = Error)
    ),
    tags = ["orders"],
    operation_id = "deleteOrder"
)]
#[delete("/orders/{id}")]
pub async fn delete_order(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let removed = state.orders.delete(path.into_inner()).await?;
    if !removed {
        return Err(Error::not_found("order not found"));
    }

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test as actix_test, web};
    use serde_json::{Value, json};

    use super::*;
    use crate::inbound::http::error::{json_config, path_config, query_config};
    use crate::inbound::http::test_support::{
        InMemoryOrderRepository, InMemoryProductRepository, InMemoryUserRepository, state_with,
    };

    fn test_app(
        orders: InMemoryOrderRepository,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = state_with(
            InMemoryUserRepository::default(),
            InMemoryProductRepository::default(),
            orders,
        );
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .app_data(query_config())
            .app_data(path_config())
            .service(create_order)
            .service(get_order)
            .service(delete_order)
    }

    fn seeded_order(items: Vec<(f64, i32)>) -> OrderWithItems {
        OrderWithItems {
            order: Order {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                created_at: Utc::now(),
            },
            items: items
                .into_iter()
                .map(|(unit_price, quantity)| OrderItem {
                    id: Uuid::new_v4(),
                    unit_price,
                    quantity,
                })
                .collect(),
        }
    }

    #[actix_web::test]
    async fn create_order_returns_201_with_items_and_total() {
        let app = actix_test::init_service(test_app(InMemoryOrderRepository::default())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/orders")
                .set_json(json!({
                    "userId": Uuid::new_v4(),
                    "orderItems": [
                        { "unitPrice": 10.0, "quantity": 2 },
                        { "unitPrice": 5.0, "quantity": 3 }
                    ]
                }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("orderItems").and_then(Value::as_array).map(Vec::len),
            Some(2)
        );
        assert_eq!(body.get("total").and_then(Value::as_f64), Some(35.0));
    }

    #[actix_web::test]
    async fn create_order_with_no_items_is_allowed() {
        let app = actix_test::init_service(test_app(InMemoryOrderRepository::default())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/orders")
                .set_json(json!({ "userId": Uuid::new_v4(), "orderItems": [] }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("total").and_then(Value::as_f64), Some(0.0));
    }

    #[actix_web::test]
    async fn create_order_rejects_zero_quantity() {
        let app = actix_test::init_service(test_app(InMemoryOrderRepository::default())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/orders")
                .set_json(json!({
                    "userId": Uuid::new_v4(),
                    "orderItems": [{ "unitPrice": 10.0, "quantity": 0 }]
                }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("quantity must be at least 1")
        );
    }

    #[actix_web::test]
    async fn get_order_attaches_computed_total() {
        let order = seeded_order(vec![(10.0, 2), (5.0, 3)]);
        let id = order.order.id;
        let repo = InMemoryOrderRepository::with_orders(vec![order]);
        let app = actix_test::init_service(test_app(repo)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(&format!("/orders/{id}")).to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("total").and_then(Value::as_f64), Some(35.0));
        assert_eq!(
            body.pointer("/orderItems/0/unitPrice").and_then(Value::as_f64),
            Some(10.0)
        );
    }

    #[actix_web::test]
    async fn get_missing_order_returns_404() {
        let app = actix_test::init_service(test_app(InMemoryOrderRepository::default())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/orders/{}", Uuid::new_v4()))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("order not found")
        );
    }

    #[actix_web::test]
    async fn delete_missing_order_returns_404() {
        let app = actix_test::init_service(test_app(InMemoryOrderRepository::default())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/orders/{}", Uuid::new_v4()))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_order_returns_204() {
        let order = seeded_order(vec![(10.0, 2)]);
        let id = order.order.id;
        let repo = InMemoryOrderRepository::with_orders(vec![order]);
        let app = actix_test::init_service(test_app(repo)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete().uri(&format!("/orders/{id}")).to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn create_order_rejects_unknown_fields() {
        let app = actix_test::init_service(test_app(InMemoryOrderRepository::default())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/orders")
                .set_json(json!({
                    "userId": Uuid::new_v4(),
                    "orderItems": [],
                    "discountCode": "SAVE10"
                }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
