//! Storefront product filtering and sorting.

use crate::domain::Product;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Keep fetch order.
    #[default]
    Featured,
    NameAsc,
    NameDesc,
    PriceLowToHigh,
    PriceHighToLow,
}

/// Local UI state of a product listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub search: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub brand_id: Option<String>,
    pub category_id: Option<String>,
    pub sort: SortKey,
    /// Hide products flagged inactive.
    pub active_only: bool,
}

impl ProductQuery {
    pub fn matches(&self, product: &Product) -> bool {
        let search = self.search.trim().to_lowercase();
        if !search.is_empty() && !product.product_name.to_lowercase().contains(&search) {
            return false;
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        if self
            .brand_id
            .as_ref()
            .is_some_and(|brand| product.brand_id.as_ref() != Some(brand))
        {
            return false;
        }
        if self
            .category_id
            .as_ref()
            .is_some_and(|category| product.category_id.as_ref() != Some(category))
        {
            return false;
        }
        !(self.active_only && !product.is_active)
    }

    /// Filters then sorts. Sorting is stable, so ties keep fetch order.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut result: Vec<Product> = products
            .iter()
            .filter(|product| self.matches(product))
            .cloned()
            .collect();

        match self.sort {
            SortKey::Featured => {}
            SortKey::NameAsc => result.sort_by(|a, b| by_name(a, b)),
            SortKey::NameDesc => result.sort_by(|a, b| by_name(b, a)),
            SortKey::PriceLowToHigh => result.sort_by(|a, b| by_price(a, b)),
            SortKey::PriceHighToLow => result.sort_by(|a, b| by_price(b, a)),
        }
        result
    }
}

fn by_name(a: &Product, b: &Product) -> Ordering {
    a.product_name
        .to_lowercase()
        .cmp(&b.product_name.to_lowercase())
}

fn by_price(a: &Product, b: &Product) -> Ordering {
    a.price.total_cmp(&b.price)
}

/// Lowest and highest price in `products`, for seeding the price slider.
pub fn price_bounds(products: &[Product]) -> Option<(f64, f64)> {
    products.iter().fold(None, |bounds, product| match bounds {
        None => Some((product.price, product.price)),
        Some((min, max)) => Some((min.min(product.price), max.max(product.price))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, price: f64, brand: &str) -> Product {
        Product {
            product_id: id.into(),
            product_name: name.into(),
            brand_id: Some(brand.into()),
            category_id: None,
            showroom_id: None,
            price,
            stock: 1,
            description: None,
            image: None,
            is_active: true,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("p1", "Electric Kettle", 45.0, "b1"),
            product("p2", "Tea Mug", 5.0, "b2"),
            product("p3", "kettle descaler", 8.0, "b1"),
            product("p4", "Toaster", 60.0, "b2"),
        ]
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.product_id.as_str()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let query = ProductQuery {
            search: "  KETTLE ".into(),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&catalog())), vec!["p1", "p3"]);
    }

    #[test]
    fn test_price_range_and_sort() {
        let query = ProductQuery {
            min_price: Some(6.0),
            max_price: Some(60.0),
            sort: SortKey::PriceHighToLow,
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&catalog())), vec!["p4", "p1", "p3"]);
    }

    #[test]
    fn test_brand_filter_and_name_sort() {
        let query = ProductQuery {
            brand_id: Some("b1".into()),
            sort: SortKey::NameAsc,
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&catalog())), vec!["p1", "p3"]);
    }

    #[test]
    fn test_price_bounds() {
        assert_eq!(price_bounds(&catalog()), Some((5.0, 60.0)));
        assert_eq!(price_bounds(&[]), None);
    }
}
