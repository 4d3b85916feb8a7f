//! Seed dataset the store is initialized with: the demo catalog, the fixed
//! user list, and the default store settings.

use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use chrono::{Datelike, TimeZone, Utc};
use password_hash::rand_core::OsRng;
use std::collections::HashMap;
use uuid::Uuid;

use super::Database;
use crate::models::{Product, StoreColors, StoreFooter, StoreSettings, User};

pub const ADMIN_EMAIL: &str = "admin@cartiva.com";
pub const CUSTOMER_EMAIL: &str = "cliente@cartiva.com";

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    price_cents: i64,
    promotional_price_cents: Option<i64>,
    image_url: &'static str,
    category: &'static str,
    stock: i32,
    listed: (i32, u32, u32),
}

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Fone de Ouvido Minimalista",
        description: "Fone de ouvido com design elegante e minimalista, qualidade sonora excepcional e máximo conforto.",
        price_cents: 24999,
        promotional_price_cents: Some(19999),
        image_url: "https://images.unsplash.com/photo-1505740420928-5e560c06d30e",
        category: "Áudio",
        stock: 15,
        listed: (2023, 1, 15),
    },
    SeedProduct {
        name: "Relógio Inteligente",
        description: "Relógio inteligente com design premium, monitoramento de saúde e notificações.",
        price_cents: 59999,
        promotional_price_cents: None,
        image_url: "https://images.unsplash.com/photo-1542496658-e33a6d0d50f6",
        category: "Acessórios",
        stock: 8,
        listed: (2023, 2, 20),
    },
    SeedProduct {
        name: "Luminária de Mesa Moderna",
        description: "Luminária de mesa com design contemporâneo e iluminação ajustável.",
        price_cents: 18999,
        promotional_price_cents: Some(14999),
        image_url: "https://images.unsplash.com/photo-1507473885765-e6ed057f782c",
        category: "Casa",
        stock: 12,
        listed: (2023, 3, 10),
    },
    SeedProduct {
        name: "Mochila Minimalista",
        description: "Mochila com design limpo e funcional, compartimentos organizados e materiais duráveis.",
        price_cents: 17999,
        promotional_price_cents: None,
        image_url: "https://images.unsplash.com/photo-1622560480605-d83c66147e55",
        category: "Acessórios",
        stock: 20,
        listed: (2023, 4, 5),
    },
    SeedProduct {
        name: "Cadeira de Design",
        description: "Cadeira ergonômica com design escandinavo e conforto excepcional.",
        price_cents: 79999,
        promotional_price_cents: Some(64999),
        image_url: "https://images.unsplash.com/photo-1567538096630-e0c55bd6374c",
        category: "Casa",
        stock: 5,
        listed: (2023, 5, 15),
    },
    SeedProduct {
        name: "Garrafa Térmica",
        description: "Garrafa térmica com isolamento de alta eficiência, mantém bebidas na temperatura ideal por horas.",
        price_cents: 12999,
        promotional_price_cents: None,
        image_url: "https://images.unsplash.com/photo-1602143407151-7111542de6e8",
        category: "Acessórios",
        stock: 25,
        listed: (2023, 6, 10),
    },
    SeedProduct {
        name: "Organizador de Mesa",
        description: "Organizador de mesa com compartimentos inteligentes e design minimalista.",
        price_cents: 8999,
        promotional_price_cents: Some(6999),
        image_url: "https://images.unsplash.com/photo-1513116476489-7635e79feb27",
        category: "Escritório",
        stock: 18,
        listed: (2023, 7, 5),
    },
    SeedProduct {
        name: "Carteira Slim",
        description: "Carteira com perfil fino, couro de alta qualidade e design elegante.",
        price_cents: 11999,
        promotional_price_cents: None,
        image_url: "https://images.unsplash.com/photo-1627123424574-724758594e93",
        category: "Acessórios",
        stock: 0,
        listed: (2023, 8, 15),
    },
];

// Runs once at startup on fixed inputs; a failure here means the seed data
// is unusable, so abort instead of seeding an unverifiable hash.
fn hash_password(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .expect("hashing the seed password cannot fail")
}

fn seed_users() -> Vec<User> {
    vec![
        User {
            id: Uuid::new_v4(),
            email: ADMIN_EMAIL.to_string(),
            name: "Administrador".to_string(),
            role: "admin".to_string(),
            password_hash: hash_password("admin123"),
        },
        User {
            id: Uuid::new_v4(),
            email: CUSTOMER_EMAIL.to_string(),
            name: "Cliente Demo".to_string(),
            role: "customer".to_string(),
            password_hash: hash_password("cliente123"),
        },
    ]
}

pub fn default_settings() -> StoreSettings {
    StoreSettings {
        store_name: "Cartiva".to_string(),
        store_whatsapp: "5511999999999".to_string(),
        store_colors: StoreColors {
            primary: "#3b82f6".to_string(),
            secondary: "#f3f4f6".to_string(),
            accent: "#8b5cf6".to_string(),
        },
        store_logo: None,
        store_footer: Some(StoreFooter {
            description: "Produtos de qualidade com design minimalista e funcional.".to_string(),
            contact_email: "contato@cartiva.com".to_string(),
            contact_phone: "+55 (11) 9999-9999".to_string(),
            copyright_year: Utc::now().year().to_string(),
        }),
    }
}

pub(super) fn database() -> Database {
    let products = PRODUCTS
        .iter()
        .map(|p| {
            let (y, m, d) = p.listed;
            let listed_at = Utc
                .with_ymd_and_hms(y, m, d, 0, 0, 0)
                .single()
                .unwrap_or_else(Utc::now);
            Product {
                id: Uuid::new_v4(),
                name: p.name.to_string(),
                description: p.description.to_string(),
                price_cents: p.price_cents,
                promotional_price_cents: p.promotional_price_cents,
                is_on_sale: p.promotional_price_cents.is_some(),
                image_url: p.image_url.to_string(),
                category: p.category.to_string(),
                stock: p.stock,
                created_at: listed_at,
                updated_at: listed_at,
            }
        })
        .collect();

    Database {
        products,
        users: seed_users(),
        settings: default_settings(),
        carts: HashMap::new(),
    }
}
