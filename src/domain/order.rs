//! Orders and the records hanging off them.

use crate::view::aggregate::Dated;
use chrono::{NaiveDate, NaiveDateTime};
use resource_store::StoreEntity;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

/// One row of the order list, keyed by its order code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: i64,
    pub order_code: String,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub order_date: NaiveDateTime,
    pub total_amount: f64,
    #[serde(default)]
    pub order_status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPatch {
    pub order_status: Option<String>,
}

impl StoreEntity for Order {
    type Id = String;
    type Patch = OrderPatch;

    fn id(&self) -> String {
        self.order_code.clone()
    }

    fn apply_patch(&mut self, patch: &OrderPatch) {
        if let Some(status) = &patch.order_status {
            self.order_status = Some(status.clone());
        }
    }
}

impl Dated for Order {
    fn date(&self) -> NaiveDate {
        self.order_date.date()
    }
}

/// One product line of a sales order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub order_id: i64,
    #[serde(rename = "productID")]
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl OrderLine {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

impl StoreEntity for OrderLine {
    type Id = String;
    type Patch = Infallible;

    fn id(&self) -> String {
        self.product_id.clone()
    }

    fn apply_patch(&mut self, patch: &Infallible) {
        match *patch {}
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    pub order_id: i64,
    pub recipient_name: String,
    pub contact: String,
    pub address_line: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub division: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl StoreEntity for DeliveryAddress {
    type Id = i64;
    type Patch = Infallible;

    fn id(&self) -> i64 {
        self.order_id
    }

    fn apply_patch(&mut self, patch: &Infallible) {
        match *patch {}
    }
}

/// A stage an order can be moved to (e.g. "Confirmed", "Shipped").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLifeCycle {
    pub life_cycle_id: i64,
    pub life_cycle_name: String,
}

impl StoreEntity for OrderLifeCycle {
    type Id = i64;
    type Patch = Infallible;

    fn id(&self) -> i64 {
        self.life_cycle_id
    }

    fn apply_patch(&mut self, patch: &Infallible) {
        match *patch {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_deserializes_and_dates() {
        let order: Order = serde_json::from_value(json!({
            "orderId": 7,
            "orderCode": "ORD-0007",
            "orderDate": "2020-01-01T10:15:00",
            "totalAmount": 1234.5
        }))
        .unwrap();

        assert_eq!(order.id(), "ORD-0007");
        assert_eq!(order.date(), NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(order.order_status, None);
    }

    #[test]
    fn test_line_total() {
        let line = OrderLine {
            order_id: 7,
            product_id: "p-1".into(),
            product_name: "Kettle".into(),
            quantity: 3,
            unit_price: 12.5,
        };
        assert_eq!(line.line_total(), 37.5);
    }
}
