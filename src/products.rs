//! Products

use rusty_money::{Money, iso::Currency};

use crate::ids::ProductId;

/// Product
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Catalog id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product price
    pub price: Money<'a, Currency>,

    /// Menu category, e.g. "Burgers"
    pub category: Option<String>,

    /// Image URL
    pub image: Option<String>,
}

impl<'a> Product<'a> {
    /// Create a product without category or image.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money<'a, Currency>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category: None,
            image: None,
        }
    }

    /// Set the menu category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Distinct menu categories, in the order they first appear.
pub fn categories<'p>(products: &'p [Product<'_>]) -> Vec<&'p str> {
    let mut seen: Vec<&str> = Vec::new();

    for category in products.iter().filter_map(|product| product.category.as_deref()) {
        if !seen.contains(&category) {
            seen.push(category);
        }
    }

    seen
}

/// Products belonging to the given category.
pub fn in_category<'p, 'a>(
    products: &'p [Product<'a>],
    category: &'p str,
) -> impl Iterator<Item = &'p Product<'a>> {
    products
        .iter()
        .filter(move |product| product.category.as_deref() == Some(category))
}
