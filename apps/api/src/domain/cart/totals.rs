use bson::Bson;
use serde::Serialize;

use super::line::CartLine;

/// Which path produced a cart total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalSource {
    /// The `$sum` from the aggregation pipeline was an integer
    Aggregated,
    /// The aggregation result was missing or not an integer
    ManualSum,
}

/// A cart total together with the path that computed it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotal {
    pub value: u64,
    pub source: TotalSource,
}

impl CartTotal {
    /// Resolves the cart total from an aggregation result
    ///
    /// Takes the aggregated `$sum` when it is a non-negative Int32 or
    /// Int64. Anything else (no group document because the cart is empty,
    /// a double, a decimal, a negative number) falls back to summing the
    /// decoded lines. Both paths sum the same `price` field, so they agree
    /// for every cart.
    ///
    /// # Example
    /// ```
    /// use bson::Bson;
    /// use storefront_api::domain::cart::{CartTotal, TotalSource};
    ///
    /// let total = CartTotal::resolve(Some(Bson::Int32(1250)), &[]);
    /// assert_eq!(total.value, 1250);
    /// assert_eq!(total.source, TotalSource::Aggregated);
    ///
    /// let empty = CartTotal::resolve(None, &[]);
    /// assert_eq!(empty.value, 0);
    /// assert_eq!(empty.source, TotalSource::ManualSum);
    /// ```
    pub fn resolve(aggregated: Option<Bson>, lines: &[CartLine]) -> Self {
        let fast = match &aggregated {
            Some(Bson::Int32(n)) => u64::try_from(*n).ok(),
            Some(Bson::Int64(n)) => u64::try_from(*n).ok(),
            _ => None,
        };

        match fast {
            Some(value) => Self {
                value,
                source: TotalSource::Aggregated,
            },
            None => {
                if let Some(other) = aggregated {
                    tracing::debug!(
                        element_type = ?other.element_type(),
                        "aggregated cart total is not an integer, summing lines"
                    );
                }
                Self {
                    value: manual_sum(lines),
                    source: TotalSource::ManualSum,
                }
            }
        }
    }
}

/// Sum of line prices, widened so it cannot overflow
pub fn manual_sum(lines: &[CartLine]) -> u64 {
    lines.iter().map(|line| u64::from(line.price)).sum()
}

/// Cart contents with their total and line count
#[derive(Debug, Clone, Serialize)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub total: u64,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;

    fn line(price: u32) -> CartLine {
        CartLine {
            product_id: ObjectId::new(),
            name: format!("item-{}", price),
            price,
            rating: 0,
            image: String::new(),
        }
    }

    #[test]
    fn integer_aggregate_is_used() {
        let lines = vec![line(500), line(750)];
        let total = CartTotal::resolve(Some(Bson::Int64(1250)), &lines);
        assert_eq!(total.value, 1250);
        assert_eq!(total.source, TotalSource::Aggregated);
    }

    #[test]
    fn double_aggregate_falls_back() {
        let lines = vec![line(500), line(750)];
        let total = CartTotal::resolve(Some(Bson::Double(1250.0)), &lines);
        assert_eq!(total.value, 1250);
        assert_eq!(total.source, TotalSource::ManualSum);
    }

    #[test]
    fn negative_aggregate_falls_back() {
        let lines = vec![line(3)];
        let total = CartTotal::resolve(Some(Bson::Int32(-7)), &lines);
        assert_eq!(total.value, 3);
        assert_eq!(total.source, TotalSource::ManualSum);
    }

    #[test]
    fn empty_cart_totals_zero() {
        let total = CartTotal::resolve(None, &[]);
        assert_eq!(total.value, 0);
    }

    #[test]
    fn both_paths_agree() {
        let carts: Vec<Vec<CartLine>> = vec![
            vec![],
            vec![line(0)],
            vec![line(1), line(1), line(1)],
            vec![line(u32::MAX), line(u32::MAX)],
        ];
        for lines in carts {
            let manual = manual_sum(&lines);
            let aggregated = i64::try_from(manual).map(Bson::Int64).ok();
            let fast = CartTotal::resolve(aggregated, &lines);
            let slow = CartTotal::resolve(Some(Bson::Null), &lines);
            assert_eq!(fast.value, slow.value);
        }
    }
}
