//! In-memory product catalog.
//!
//! The catalog is ephemeral: nothing here is persisted beyond the value
//! itself. Ordering is insertion order and every operation keeps it stable.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub category: String,
    pub stock: u32,
    pub image_url: String,
}

/// The mutable fields of a [`Product`], as submitted by the product form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub price: Price,
    pub category: String,
    pub stock: u32,
    pub image_url: String,
}

impl Product {
    fn from_fields(id: ProductId, fields: ProductFields) -> Self {
        Self {
            id,
            name: fields.name,
            price: fields.price,
            category: fields.category,
            stock: fields.stock,
            image_url: fields.image_url,
        }
    }

    /// The product's current fields, e.g. to prefill an edit form.
    #[must_use]
    pub fn fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            price: self.price,
            category: self.category.clone(),
            stock: self.stock,
            image_url: self.image_url.clone(),
        }
    }

    /// Case-insensitive substring match on name or category.
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }
}

/// An ordered list of products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// An empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// The four-item catalog every new visitor starts with.
    #[must_use]
    pub fn seeded() -> Self {
        let seed = [
            (
                "1",
                "قميص أبيض",
                120,
                "ملابس",
                25,
                "https://images.pexels.com/photos/297933/pexels-photo-297933.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1",
            ),
            (
                "2",
                "حذاء رياضي",
                250,
                "أحذية",
                18,
                "https://images.pexels.com/photos/2421374/pexels-photo-2421374.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1",
            ),
            (
                "3",
                "ساعة ذكية",
                500,
                "إلكترونيات",
                10,
                "https://images.pexels.com/photos/437037/pexels-photo-437037.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1",
            ),
            (
                "4",
                "سماعات لاسلكية",
                300,
                "إلكترونيات",
                15,
                "https://images.pexels.com/photos/3394650/pexels-photo-3394650.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=1",
            ),
        ];

        let products = seed
            .into_iter()
            .map(|(id, name, price, category, stock, image_url)| Product {
                id: ProductId::new(id),
                name: name.to_owned(),
                price: Price::from_riyals(price),
                category: category.to_owned(),
                stock,
                image_url: image_url.to_owned(),
            })
            .collect();

        Self { products }
    }

    /// Products whose name or category contains `filter`, ignoring case.
    ///
    /// An empty filter returns every product.
    #[must_use]
    pub fn list(&self, filter: &str) -> Vec<&Product> {
        let needle = filter.to_lowercase();
        self.products.iter().filter(|p| p.matches(&needle)).collect()
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Append a product under a freshly generated ID.
    ///
    /// Names are not deduplicated.
    #[allow(clippy::indexing_slicing)] // index was pushed just above
    pub fn create(&mut self, fields: ProductFields) -> &Product {
        let id = self.fresh_id();
        let index = self.products.len();
        self.products.push(Product::from_fields(id, fields));
        &self.products[index]
    }

    /// Replace the mutable fields of product `id`.
    ///
    /// Returns `false` and changes nothing if `id` is absent.
    pub fn update(&mut self, id: &ProductId, fields: ProductFields) -> bool {
        match self.products.iter_mut().find(|p| &p.id == id) {
            Some(product) => {
                *product = Product::from_fields(product.id.clone(), fields);
                true
            }
            None => false,
        }
    }

    /// Remove product `id`, returning it. Absent IDs are a no-op.
    pub fn delete(&mut self, id: &ProductId) -> Option<Product> {
        let index = self.products.iter().position(|p| &p.id == id)?;
        Some(self.products.remove(index))
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    fn fresh_id(&self) -> ProductId {
        loop {
            let id = ProductId::generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}
