use super::aggregate::{bucketize, Bucket, BucketUnit};
use crate::domain::Order;
use chrono::NaiveDate;

/// Headline numbers of the admin order dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub order_count: usize,
    pub revenue: f64,
    /// Mean order value, zero when there are no orders.
    pub average: f64,
    pub buckets: Vec<Bucket>,
}

/// Summarizes the orders dated inside `from..=to`.
pub fn summarize_orders(
    orders: &[Order],
    unit: BucketUnit,
    from: NaiveDate,
    to: NaiveDate,
) -> OrderSummary {
    let in_window: Vec<&Order> = orders
        .iter()
        .filter(|order| {
            let date = order.order_date.date();
            date >= from && date <= to
        })
        .collect();

    let order_count = in_window.len();
    let revenue: f64 = in_window.iter().map(|order| order.total_amount).sum();
    let average = if order_count == 0 {
        0.0
    } else {
        revenue / order_count as f64
    };

    OrderSummary {
        order_count,
        revenue,
        average,
        buckets: bucketize(orders, unit, from, to),
    }
}

/// Orders grouped by status, most frequent first.
pub fn count_by_status(orders: &[Order]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for order in orders {
        let status = order.order_status.as_deref().unwrap_or("Unknown");
        match counts.iter_mut().find(|(name, _)| name == status) {
            Some((_, count)) => *count += 1,
            None => counts.push((status.to_string(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
