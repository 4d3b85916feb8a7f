//! In-memory data store. There is no durable backend: the seed dataset is
//! cloned at startup and mutated behind a single lock, with fixed artificial
//! delays on the operations that stand in for network calls.

pub mod seed;

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{CartRecord, Product, StoreSettings, User};

// Fixed delays standing in for network calls, in milliseconds.
const LIST_MS: u64 = 500;
const GET_MS: u64 = 300;
const WRITE_MS: u64 = 800;
const DELETE_MS: u64 = 600;
const LOGIN_MS: u64 = 700;
const SETTINGS_GET_MS: u64 = 400;

pub(crate) struct Database {
    pub(crate) products: Vec<Product>,
    pub(crate) users: Vec<User>,
    pub(crate) settings: StoreSettings,
    pub(crate) carts: HashMap<Uuid, Vec<CartRecord>>,
}

pub struct MockStore {
    db: RwLock<Database>,
    latency: bool,
}

impl MockStore {
    /// A fresh store holding a copy of the seed dataset. Latency is only
    /// wanted when serving requests; tests pass `false`.
    pub fn seeded(latency: bool) -> Self {
        Self {
            db: RwLock::new(seed::database()),
            latency,
        }
    }

    async fn simulate(&self, ms: u64) {
        if self.latency {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }

    pub async fn list_products(&self) -> Vec<Product> {
        self.simulate(LIST_MS).await;
        self.db.read().await.products.clone()
    }

    pub async fn get_product(&self, id: Uuid) -> Option<Product> {
        self.simulate(GET_MS).await;
        self.db
            .read()
            .await
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Newest products go to the head of the list.
    pub async fn insert_product(&self, product: Product) {
        self.simulate(WRITE_MS).await;
        self.db.write().await.products.insert(0, product);
    }

    /// Replaces the stored product with the same id. Returns `false` when it
    /// no longer exists.
    pub async fn replace_product(&self, product: Product) -> bool {
        self.simulate(WRITE_MS).await;
        let mut db = self.db.write().await;
        match db.products.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => {
                *slot = product;
                true
            }
            None => false,
        }
    }

    pub async fn remove_product(&self, id: Uuid) -> bool {
        self.simulate(DELETE_MS).await;
        let mut db = self.db.write().await;
        let before = db.products.len();
        db.products.retain(|p| p.id != id);
        db.products.len() < before
    }

    pub async fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.simulate(LOGIN_MS).await;
        self.db
            .read()
            .await
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    pub async fn settings(&self) -> StoreSettings {
        self.simulate(SETTINGS_GET_MS).await;
        self.db.read().await.settings.clone()
    }

    pub async fn update_settings(&self, settings: StoreSettings) -> StoreSettings {
        self.simulate(WRITE_MS).await;
        let mut db = self.db.write().await;
        db.settings = settings;
        db.settings.clone()
    }

    // Cart records behave like client-local state,
    // so none of the operations below carry simulated latency.

    /// Cart read model: each record joined with its current product, in
    /// insertion order. Records whose product no longer exists are dropped
    /// from the view (stale data is discarded, not surfaced).
    pub async fn cart_with_products(&self, user_id: Uuid) -> Vec<(Product, i32)> {
        let db = self.db.read().await;
        let Some(cart) = db.carts.get(&user_id) else {
            return Vec::new();
        };
        cart.iter()
            .filter_map(|r| {
                db.products
                    .iter()
                    .find(|p| p.id == r.product_id)
                    .map(|p| (p.clone(), r.quantity))
            })
            .collect()
    }

    pub async fn cart_record(&self, user_id: Uuid, product_id: Uuid) -> Option<CartRecord> {
        self.db
            .read()
            .await
            .carts
            .get(&user_id)
            .and_then(|cart| cart.iter().find(|r| r.product_id == product_id).cloned())
    }

    /// Replaces the record for the product, or appends a new one.
    pub async fn put_cart_record(&self, user_id: Uuid, record: CartRecord) {
        let mut db = self.db.write().await;
        let cart = db.carts.entry(user_id).or_default();
        match cart.iter_mut().find(|r| r.product_id == record.product_id) {
            Some(slot) => *slot = record,
            None => cart.push(record),
        }
    }

    pub async fn remove_cart_record(&self, user_id: Uuid, product_id: Uuid) -> bool {
        let mut db = self.db.write().await;
        let Some(cart) = db.carts.get_mut(&user_id) else {
            return false;
        };
        let before = cart.len();
        cart.retain(|r| r.product_id != product_id);
        cart.len() < before
    }

    pub async fn clear_cart(&self, user_id: Uuid) {
        self.db.write().await.carts.remove(&user_id);
    }
}
