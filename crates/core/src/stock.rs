//! Stock movements derived from purchase and sale detail lines.

use crate::id::ProductoId;
use crate::increment::{Filter, IncrementOptions, IncrementRequest, TransactionId};
use crate::value_object::ValueObject;

/// Product column holding the on-hand quantity.
pub const STOCK_FIELD: &str = "stock";

/// Signed change of one product's stock.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StockMovement {
    pub producto_id: ProductoId,
    pub delta: f64,
}

impl ValueObject for StockMovement {}

impl StockMovement {
    /// Goods coming in (purchases).
    pub fn inbound(producto_id: ProductoId, quantity: f64) -> Self {
        Self {
            producto_id,
            delta: quantity,
        }
    }

    /// Goods going out (sales).
    pub fn outbound(producto_id: ProductoId, quantity: f64) -> Self {
        Self {
            producto_id,
            delta: -quantity,
        }
    }

    /// Build the increment of the product's stock column.
    pub fn into_request(self, transaction: Option<TransactionId>) -> IncrementRequest {
        let mut options = IncrementOptions::new(self.delta, Filter::by_id(self.producto_id));
        options.transaction = transaction;
        IncrementRequest::new(STOCK_FIELD, options)
    }
}

/// A detail line that moves stock.
pub trait StockSource: ValueObject {
    fn stock_movement(&self) -> StockMovement;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::increment::ID_ATTRIBUTE;
    use crate::increment::FilterValue;

    #[test]
    fn outbound_negates_quantity() {
        let p = ProductoId::new(1).unwrap();
        assert_eq!(StockMovement::outbound(p, 4.0).delta, -4.0);
        assert_eq!(StockMovement::inbound(p, 4.0).delta, 4.0);
    }

    #[test]
    fn request_targets_product_stock() {
        let p = ProductoId::new(12).unwrap();
        let tx = TransactionId::new(1);
        let request = StockMovement::inbound(p, 2.0).into_request(Some(tx));

        assert_eq!(request.field, STOCK_FIELD);
        assert_eq!(request.options.by, 2.0);
        assert_eq!(request.options.transaction, Some(tx));
        let predicates: Vec<_> = request.options.filter.predicates().collect();
        assert_eq!(predicates, vec![(ID_ATTRIBUTE, &FilterValue::Int(12))]);
    }
}
