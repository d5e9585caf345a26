use serde::{Deserialize, Serialize};
use serde_json::Value;

use tienda_core::{
    Fields, ProductoId, Schema, StockMovement, StockSource, ValidationError, ValueObject,
    impl_schema_try_from,
};

/// Sale detail line: quantity of one product sold.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "serde_json::Value")]
pub struct DetalleVenta {
    pub producto_id: ProductoId,
    pub cantidad_venta: f64,
}

impl ValueObject for DetalleVenta {}

impl Schema for DetalleVenta {
    const NAME: &'static str = "DetalleVenta";

    fn parse(input: &Value) -> Result<Self, ValidationError> {
        let mut f = Fields::new(Self::NAME, input);
        let (Some(producto_id), Some(cantidad_venta)) =
            (f.id("productoId"), f.number("cantidadVenta"))
        else {
            return Err(f.into_error());
        };

        Ok(Self {
            producto_id,
            cantidad_venta,
        })
    }
}

impl StockSource for DetalleVenta {
    fn stock_movement(&self) -> StockMovement {
        StockMovement::outbound(self.producto_id, self.cantidad_venta)
    }
}

impl_schema_try_from!(DetalleVenta);
