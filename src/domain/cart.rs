use super::product::Product;
use resource_store::StoreEntity;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One product in the shopper's cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(rename = "productID")]
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub price: f64,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartPatch {
    pub quantity: u32,
}

impl StoreEntity for CartLine {
    type Id = String;
    type Patch = CartPatch;

    fn id(&self) -> String {
        self.product_id.clone()
    }

    fn apply_patch(&mut self, patch: &CartPatch) {
        self.quantity = patch.quantity;
    }
}

/// Body of `Cart-Post`.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CartAddition {
    #[validate(length(min = 1))]
    pub transaction_number: String,
    #[serde(rename = "productID")]
    #[validate(length(min = 1, message = "Product is required"))]
    pub product_id: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
}

impl CartAddition {
    pub fn new(transaction_number: impl Into<String>, product: &Product, quantity: u32) -> Self {
        Self {
            transaction_number: transaction_number.into(),
            product_id: product.product_id.clone(),
            quantity,
        }
    }
}

/// Sum of all line subtotals.
pub fn cart_total(lines: &[CartLine]) -> f64 {
    lines.iter().map(CartLine::subtotal).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_total() {
        let lines = vec![
            CartLine {
                product_id: "p-1".into(),
                product_name: "Kettle".into(),
                quantity: 2,
                price: 10.0,
            },
            CartLine {
                product_id: "p-2".into(),
                product_name: "Mug".into(),
                quantity: 1,
                price: 2.5,
            },
        ];
        assert_eq!(cart_total(&lines), 22.5);
        assert_eq!(cart_total(&[]), 0.0);
    }
}
