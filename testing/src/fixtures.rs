//! Product fixtures for tests and demos.

use shopfront_core::domain::{Money, Product, ProductId};

/// A priced product with the given id and price
#[must_use]
pub fn priced(id: &str, title: &str, price: u64) -> Product {
    Product {
        id: ProductId::from(id),
        title: title.to_owned(),
        category: "other".to_owned(),
        image: None,
        description: None,
        price: Some(Money(price)),
    }
}

/// A priceless product: listed, previewable, but unpurchasable
#[must_use]
pub fn priceless(id: &str, title: &str) -> Product {
    Product {
        id: ProductId::from(id),
        title: title.to_owned(),
        category: "other".to_owned(),
        image: None,
        description: None,
        price: None,
    }
}

/// A small catalog: two priced products and one priceless
#[must_use]
pub fn sample_catalog() -> Vec<Product> {
    vec![
        priced("p1", "Widget", 100),
        priced("p2", "Gadget", 50),
        priceless("p3", "Heirloom"),
    ]
}
