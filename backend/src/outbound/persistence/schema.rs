//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation. Regenerate
//! with `diesel print-schema` after changing the migrations.

diesel::table! {
    /// Registered users.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        /// Optional contact address, unique when present.
        email -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Notification preference, one row per user.
    user_preferences (id) {
        id -> Uuid,
        user_id -> Uuid,
        receive_email -> Bool,
    }
}

diesel::table! {
    /// Product catalogue. Names are unique.
    products (id) {
        id -> Uuid,
        name -> Varchar,
        category -> Varchar,
        price -> Float8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Join rows linking users to the products they saved.
    saved_products (id) {
        id -> Uuid,
        user_id -> Uuid,
        product_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Orders; line items live in `order_items`.
    orders (id) {
        id -> Uuid,
        user_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Order line items, removed together with their order.
    order_items (id) {
        id -> Uuid,
        order_id -> Uuid,
        unit_price -> Float8,
        quantity -> Int4,
    }
}

diesel::joinable!(user_preferences -> users (user_id));
diesel::joinable!(saved_products -> users (user_id));
diesel::joinable!(saved_products -> products (product_id));
diesel::joinable!(orders -> users (user_id));
diesel::joinable!(order_items -> orders (order_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    user_preferences,
    products,
    saved_products,
    orders,
    order_items,
);
