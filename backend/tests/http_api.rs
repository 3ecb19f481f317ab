//! End-to-end coverage of the HTTP surface against in-memory repositories.
//!
//! Assembles the full routing table the way the server does, with the
//! extractor error handlers installed, and checks the cross-cutting
//! behaviours the per-handler unit tests do not: the uniform error body, the
//! preserved status asymmetries between entities, and the list-window
//! property.

use actix_web::{App, http::StatusCode, test as actix_test, web};
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use backend::inbound::http::error::{json_config, path_config, query_config};
use backend::inbound::http::orders::{create_order, delete_order, get_order};
use backend::inbound::http::products::{
    create_product, delete_product, get_product, list_products, update_product,
};
use backend::inbound::http::test_support::{
    InMemoryOrderRepository, InMemoryProductRepository, InMemoryUserRepository, state_with,
};
use backend::inbound::http::users::{
    create_user, delete_user, get_user, list_saved_products, list_user_orders, list_users,
    update_user,
};

fn full_app(
    users: InMemoryUserRepository,
    products: InMemoryProductRepository,
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
    App::new()
        .app_data(web::Data::new(state_with(users, products, orders)))
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .service(list_users)
        .service(get_user)
        .service(create_user)
        .service(update_user)
        .service(delete_user)
        .service(list_saved_products)
        .service(list_user_orders)
        .service(list_products)
        .service(get_product)
        .service(create_product)
        .service(update_product)
        .service(delete_product)
        .service(create_order)
        .service(get_order)
        .service(delete_order)
}

fn default_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    full_app(
        InMemoryUserRepository::default(),
        InMemoryProductRepository::default(),
        InMemoryOrderRepository::default(),
    )
}

#[actix_web::test]
async fn malformed_json_body_yields_uniform_error_shape() {
    let app = actix_test::init_service(default_app()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/users")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    let object = body.as_object().expect("object body");
    assert!(object.contains_key("message"));
    assert_eq!(object.len(), 1, "error body carries only the message");
}

#[actix_web::test]
async fn non_numeric_pagination_input_is_rejected() {
    let app = actix_test::init_service(default_app()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/products?offset=three")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert!(body.get("message").is_some());
}

#[actix_web::test]
async fn create_status_asymmetry_is_preserved() {
    let app = actix_test::init_service(default_app()).await;

    let user_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "name": "Ada" }))
            .to_request(),
    )
    .await;
    assert_eq!(user_res.status(), StatusCode::CREATED);

    let product_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/products")
            .set_json(json!({ "name": "Kettle", "category": "kitchen", "price": 24.99 }))
            .to_request(),
    )
    .await;
    assert_eq!(product_res.status(), StatusCode::OK);

    let order_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/orders")
            .set_json(json!({ "userId": Uuid::new_v4(), "orderItems": [] }))
            .to_request(),
    )
    .await;
    assert_eq!(order_res.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn missing_record_asymmetry_is_preserved() {
    let app = actix_test::init_service(default_app()).await;
    let missing = Uuid::new_v4();

    // Product reads report absence as a 200 with a null body.
    let product_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/products/{missing}"))
            .to_request(),
    )
    .await;
    assert_eq!(product_res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(product_res).await;
    assert_eq!(body, Value::Null);

    // User and order reads fail with 404.
    for uri in [format!("/users/{missing}"), format!("/orders/{missing}")] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(&uri).to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }

    // Deletes agree on 404 across all three entities.
    for uri in [
        format!("/users/{missing}"),
        format!("/products/{missing}"),
        format!("/orders/{missing}"),
    ] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete().uri(&uri).to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[actix_web::test]
async fn created_user_round_trips_with_its_preference() {
    let app = actix_test::init_service(default_app()).await;

    let create = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(json!({
                "name": "A",
                "userPreference": { "receiveEmail": true }
            }))
            .to_request(),
    )
    .await;
    assert_eq!(create.status(), StatusCode::CREATED);
    let created: Value = actix_test::read_body_json(create).await;
    let id = created.get("id").and_then(Value::as_str).expect("id");

    let fetched = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/users/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(fetched).await;
    assert_eq!(
        body.pointer("/userPreference/receiveEmail").and_then(Value::as_bool),
        Some(true)
    );
}

#[actix_web::test]
async fn order_total_is_attached_to_detail_reads() {
    let app = actix_test::init_service(default_app()).await;

    let create = actix_test::call_service(
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
    let created: Value = actix_test::read_body_json(create).await;
    let id = created.get("id").and_then(Value::as_str).expect("id");

    let fetched = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/orders/{id}"))
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(fetched).await;
    assert_eq!(body.get("total").and_then(Value::as_f64), Some(35.0));
}

#[actix_web::test]
async fn list_window_matches_positions_of_the_full_sort_order() {
    use backend::domain::{User, UserPreference, UserWithPreference};

    let seeded: Vec<UserWithPreference> = (0..7)
        .map(|i| {
            let created_at = Utc
                .timestamp_opt(1_700_000_000 + i64::from(i) * 60, 0)
                .single()
                .expect("valid timestamp");
            UserWithPreference {
                user: User {
                    id: Uuid::new_v4(),
                    name: format!("user-{i}"),
                    email: None,
                    created_at,
                    updated_at: created_at,
                },
                preference: Some(UserPreference {
                    receive_email: false,
                }),
            }
        })
        .collect();
    let app = actix_test::init_service(full_app(
        InMemoryUserRepository::with_users(seeded),
        InMemoryProductRepository::default(),
        InMemoryOrderRepository::default(),
    ))
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/users?order=oldest&offset=2&limit=3")
            .to_request(),
    )
    .await;

    let body: Value = actix_test::read_body_json(response).await;
    let names: Vec<&str> = body
        .as_array()
        .expect("array body")
        .iter()
        .filter_map(|u| u.get("name").and_then(Value::as_str))
        .collect();
    assert_eq!(names, vec!["user-2", "user-3", "user-4"]);
}

#[actix_web::test]
async fn patch_missing_fields_leave_stored_values_unchanged() {
    let app = actix_test::init_service(default_app()).await;

    let create = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/products")
            .set_json(json!({ "name": "Kettle", "category": "kitchen", "price": 24.99 }))
            .to_request(),
    )
    .await;
    let created: Value = actix_test::read_body_json(create).await;
    let id = created.get("id").and_then(Value::as_str).expect("id");

    let patch = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/products/{id}"))
            .set_json(json!({ "category": "homeware" }))
            .to_request(),
    )
    .await;
    assert_eq!(patch.status(), StatusCode::OK);

    let fetched = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/products/{id}"))
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(fetched).await;
    assert_eq!(body.get("name").and_then(Value::as_str), Some("Kettle"));
    assert_eq!(body.get("category").and_then(Value::as_str), Some("homeware"));
    assert_eq!(body.get("price").and_then(Value::as_f64), Some(24.99));
}
