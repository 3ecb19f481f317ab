//! In-memory repository doubles shared by the handler test modules.
//!
//! The in-memory implementations mimic the database contract closely enough
//! for handler tests: windowing, sort orders, unique product names, and the
//! nested preference update error path.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::ports::{
    OrderRepository, Page, ProductRepository, ProductSortOrder, RepositoryError, UserRepository,
    UserSortOrder,
};
use crate::domain::{
    NewOrder, NewProduct, NewUser, Order, OrderItem, OrderWithItems, Product, ProductPatch, User,
    UserPatch, UserPreference, UserWithPreference,
};

use super::state::HttpState;

fn window<T>(items: Vec<T>, page: Page) -> Vec<T> {
    items
        .into_iter()
        .skip(usize::try_from(page.offset).expect("non-negative offset"))
        .take(usize::try_from(page.limit).expect("non-negative limit"))
        .collect()
}

#[derive(Default)]
struct UserStore {
    users: Vec<UserWithPreference>,
    saved_products: HashMap<Uuid, Vec<Product>>,
    orders: HashMap<Uuid, Vec<Order>>,
}

/// In-memory `UserRepository` double.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: Mutex<UserStore>,
}

impl InMemoryUserRepository {
    pub fn with_users(users: Vec<UserWithPreference>) -> Self {
        Self {
            state: Mutex::new(UserStore {
                users,
                ..UserStore::default()
            }),
        }
    }

    pub fn set_saved_products(&self, user_id: Uuid, products: Vec<Product>) {
        self.state
            .lock()
            .expect("user store lock")
            .saved_products
            .insert(user_id, products);
    }

    pub fn set_orders(&self, user_id: Uuid, orders: Vec<Order>) {
        self.state
            .lock()
            .expect("user store lock")
            .orders
            .insert(user_id, orders);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(
        &self,
        page: Page,
        order: UserSortOrder,
    ) -> Result<Vec<User>, RepositoryError> {
        let mut users: Vec<User> = self
            .state
            .lock()
            .expect("user store lock")
            .users
            .iter()
            .map(|entry| entry.user.clone())
            .collect();

        match order {
            UserSortOrder::Oldest => users.sort_by_key(|u| u.created_at),
            UserSortOrder::Newest => users.sort_by_key(|u| std::cmp::Reverse(u.created_at)),
        }

        Ok(window(users, page))
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<UserWithPreference>, RepositoryError> {
        Ok(self
            .state
            .lock()
            .expect("user store lock")
            .users
            .iter()
            .find(|entry| entry.user.id == id)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<UserWithPreference, RepositoryError> {
        let now = Utc::now();
        let created = UserWithPreference {
            user: User {
                id: Uuid::new_v4(),
                name: user.name().to_owned(),
                email: user.email().map(ToOwned::to_owned),
                created_at: now,
                updated_at: now,
            },
            preference: Some(UserPreference {
                receive_email: user.receive_email(),
            }),
        };

        self.state
            .lock()
            .expect("user store lock")
            .users
            .push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &UserPatch,
    ) -> Result<Option<UserWithPreference>, RepositoryError> {
        let mut state = self.state.lock().expect("user store lock");
        let Some(entry) = state.users.iter_mut().find(|entry| entry.user.id == id) else {
            return Ok(None);
        };

        if let Some(name) = patch.name() {
            entry.user.name = name.to_owned();
        }
        if let Some(email) = patch.email() {
            entry.user.email = Some(email.to_owned());
        }
        if let Some(receive_email) = patch.receive_email() {
            match entry.preference.as_mut() {
                Some(preference) => preference.receive_email = receive_email,
                None => {
                    return Err(RepositoryError::not_found("user preference not found"));
                }
            }
        }
        entry.user.updated_at = Utc::now();
        Ok(Some(entry.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut state = self.state.lock().expect("user store lock");
        let before = state.users.len();
        state.users.retain(|entry| entry.user.id != id);
        Ok(state.users.len() < before)
    }

    async fn saved_products(
        &self,
        id: Uuid,
    ) -> Result<Option<Vec<Product>>, RepositoryError> {
        let state = self.state.lock().expect("user store lock");
        if !state.users.iter().any(|entry| entry.user.id == id) {
            return Ok(None);
        }
        Ok(Some(state.saved_products.get(&id).cloned().unwrap_or_default()))
    }

    async fn orders(&self, id: Uuid) -> Result<Option<Vec<Order>>, RepositoryError> {
        let state = self.state.lock().expect("user store lock");
        if !state.users.iter().any(|entry| entry.user.id == id) {
            return Ok(None);
        }
        Ok(Some(state.orders.get(&id).cloned().unwrap_or_default()))
    }
}

/// In-memory `ProductRepository` double enforcing unique names.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: Mutex<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(
        &self,
        page: Page,
        order: ProductSortOrder,
        category: Option<&str>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let mut products: Vec<Product> = self
            .products
            .lock()
            .expect("products lock")
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .cloned()
            .collect();

        match order {
            ProductSortOrder::PriceLowest => {
                products.sort_by(|a, b| a.price.total_cmp(&b.price));
            }
            ProductSortOrder::PriceHighest => {
                products.sort_by(|a, b| b.price.total_cmp(&a.price));
            }
            ProductSortOrder::Oldest => products.sort_by_key(|p| p.created_at),
            ProductSortOrder::Newest => {
                products.sort_by_key(|p| std::cmp::Reverse(p.created_at));
            }
        }

        Ok(window(products, page))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        Ok(self
            .products
            .lock()
            .expect("products lock")
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let mut products = self.products.lock().expect("products lock");
        if products.iter().any(|p| p.name == product.name()) {
            return Err(RepositoryError::unique_violation(
                "duplicate key value violates unique constraint \"products_name_key\"",
            ));
        }

        let now = Utc::now();
        let created = Product {
            id: Uuid::new_v4(),
            name: product.name().to_owned(),
            category: product.category().to_owned(),
            price: product.price(),
            created_at: now,
            updated_at: now,
        };
        products.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut products = self.products.lock().expect("products lock");
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        if let Some(name) = patch.name() {
            product.name = name.to_owned();
        }
        if let Some(category) = patch.category() {
            product.category = category.to_owned();
        }
        if let Some(price) = patch.price() {
            product.price = price;
        }
        product.updated_at = Utc::now();
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut products = self.products.lock().expect("products lock");
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() < before)
    }
}

/// In-memory `OrderRepository` double.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: Mutex<Vec<OrderWithItems>>,
}

impl InMemoryOrderRepository {
    pub fn with_orders(orders: Vec<OrderWithItems>) -> Self {
        Self {
            orders: Mutex::new(orders),
        }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: &NewOrder) -> Result<OrderWithItems, RepositoryError> {
        let created = OrderWithItems {
            order: Order {
                id: Uuid::new_v4(),
                user_id: order.user_id(),
                created_at: Utc::now(),
            },
            items: order
                .items()
                .iter()
                .map(|item| OrderItem {
                    id: Uuid::new_v4(),
                    unit_price: item.unit_price(),
                    quantity: item.quantity(),
                })
                .collect(),
        };

        self.orders
            .lock()
            .expect("orders lock")
            .push(created.clone());
        Ok(created)
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<OrderWithItems>, RepositoryError> {
        Ok(self
            .orders
            .lock()
            .expect("orders lock")
            .iter()
            .find(|o| o.order.id == id)
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut orders = self.orders.lock().expect("orders lock");
        let before = orders.len();
        orders.retain(|o| o.order.id != id);
        Ok(orders.len() < before)
    }
}

/// Build an [`HttpState`] from the given doubles.
pub fn state_with(
    users: InMemoryUserRepository,
    products: InMemoryProductRepository,
    orders: InMemoryOrderRepository,
) -> HttpState {
    HttpState::new(Arc::new(users), Arc::new(products), Arc::new(orders))
}
