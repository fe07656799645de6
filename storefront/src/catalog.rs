//! Sample catalog the store is seeded with.

use crate::types::{Category, Product, ProductId};
use chrono::{DateTime, NaiveDate, Utc};

/// The five sample products, in catalog order
#[must_use]
pub fn seed_products() -> Vec<Product> {
    vec![
        product(
            SeedProduct {
                id: "1",
                name: "Premium Wireless Headphones",
                price: 299.99,
                original_price: Some(399.99),
                description: "High-quality noise-cancelling wireless headphones with 30-hour battery life",
                category: Category::Electronics,
                stock: 15,
                rating: 4.5,
                reviews_count: 234,
                weight: 0.3,
                popularity: 89,
            },
            &["headphones1.jpg", "headphones2.jpg"],
            &["wireless", "noise-cancelling", "premium"],
            (2024, 1, 15),
        ),
        product(
            SeedProduct {
                id: "2",
                name: "Smart Watch Pro",
                price: 399.99,
                original_price: None,
                description: "Advanced fitness tracking and health monitoring smartwatch",
                category: Category::Electronics,
                stock: 8,
                rating: 4.7,
                reviews_count: 156,
                weight: 0.1,
                popularity: 76,
            },
            &["watch1.jpg", "watch2.jpg"],
            &["fitness", "health", "smart"],
            (2024, 2, 1),
        ),
        product(
            SeedProduct {
                id: "3",
                name: "Eco-Friendly Yoga Mat",
                price: 49.99,
                original_price: Some(69.99),
                description: "Sustainable, non-slip yoga mat made from natural materials",
                category: Category::Sports,
                stock: 25,
                rating: 4.8,
                reviews_count: 89,
                weight: 1.2,
                popularity: 65,
            },
            &["yogamat1.jpg"],
            &["eco-friendly", "yoga", "fitness"],
            (2024, 1, 20),
        ),
        product(
            SeedProduct {
                id: "4",
                name: "Bestselling Novel Collection",
                price: 79.99,
                original_price: None,
                description: "Collection of top 10 bestselling novels of the year",
                category: Category::Books,
                stock: 3,
                rating: 4.6,
                reviews_count: 312,
                weight: 2.5,
                popularity: 92,
            },
            &["books1.jpg"],
            &["bestseller", "fiction", "collection"],
            (2024, 1, 10),
        ),
        product(
            SeedProduct {
                id: "5",
                name: "Designer Winter Jacket",
                price: 199.99,
                original_price: Some(299.99),
                description: "Stylish and warm winter jacket with premium materials",
                category: Category::Clothing,
                stock: 0,
                rating: 4.4,
                reviews_count: 67,
                weight: 0.8,
                popularity: 58,
            },
            &["jacket1.jpg", "jacket2.jpg"],
            &["winter", "designer", "premium"],
            (2024, 2, 10),
        ),
    ]
}

struct SeedProduct {
    id: &'static str,
    name: &'static str,
    price: f64,
    original_price: Option<f64>,
    description: &'static str,
    category: Category,
    stock: u32,
    rating: f64,
    reviews_count: u32,
    weight: f64,
    popularity: u32,
}

fn product(
    seed: SeedProduct,
    images: &[&str],
    tags: &[&str],
    (year, month, day): (i32, u32, u32),
) -> Product {
    Product {
        id: ProductId::new(seed.id),
        name: seed.name.to_string(),
        price: seed.price,
        original_price: seed.original_price,
        description: seed.description.to_string(),
        category: seed.category,
        stock: seed.stock,
        rating: seed.rating,
        reviews_count: seed.reviews_count,
        images: images.iter().map(|s| (*s).to_string()).collect(),
        weight: seed.weight,
        tags: tags.iter().map(|s| (*s).to_string()).collect(),
        created_at: midnight_utc(year, month, day),
        popularity: seed.popularity,
    }
}

fn midnight_utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}
