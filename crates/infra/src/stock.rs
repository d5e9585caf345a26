//! Applies purchase and sale detail lines to product stock.

use thiserror::Error;

use tienda_core::{IncrementCallback, IncrementError, ProductoId, StockSource, TransactionId};
use tienda_purchasing::DetalleCompra;
use tienda_sales::DetalleVenta;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StockError {
    /// A detail line referenced a product the data layer does not hold.
    #[error("product not found: {0}")]
    ProductNotFound(ProductoId),

    #[error(transparent)]
    Increment(#[from] IncrementError),
}

/// Stock application service over any [`IncrementCallback`].
///
/// Lines are applied in order, one increment each. Pass a transaction to make
/// a batch all-or-nothing; without one, lines before a failing line stay applied.
#[derive(Debug, Clone)]
pub struct StockService<C> {
    counters: C,
}

impl<C> StockService<C>
where
    C: IncrementCallback,
{
    pub fn new(counters: C) -> Self {
        Self { counters }
    }

    pub fn counters(&self) -> &C {
        &self.counters
    }

    /// Apply the stock movement of every line; returns the total rows affected.
    pub async fn apply<S: StockSource>(
        &self,
        lines: &[S],
        transaction: Option<TransactionId>,
    ) -> Result<u64, StockError> {
        let mut affected = 0;

        for line in lines {
            let movement = line.stock_movement();
            let outcome = self
                .counters
                .execute(movement.into_request(transaction))
                .await?;

            if outcome.affected == 0 {
                tracing::warn!(producto_id = %movement.producto_id, "stock movement matched no product");
                return Err(StockError::ProductNotFound(movement.producto_id));
            }
            affected += outcome.affected;
        }

        tracing::info!(lines = lines.len(), affected, transaction = ?transaction, "stock movements applied");
        Ok(affected)
    }

    /// Received purchase lines add to stock.
    pub async fn apply_purchase(
        &self,
        lines: &[DetalleCompra],
        transaction: Option<TransactionId>,
    ) -> Result<u64, StockError> {
        self.apply(lines, transaction).await
    }

    /// Sold lines remove from stock.
    pub async fn apply_sale(
        &self,
        lines: &[DetalleVenta],
        transaction: Option<TransactionId>,
    ) -> Result<u64, StockError> {
        self.apply(lines, transaction).await
    }
}
