use serde::{Deserialize, Serialize};
use serde_json::Value;

use tienda_core::{
    Fields, ProductoId, Schema, StockMovement, StockSource, ValidationError, ValueObject,
    impl_schema_try_from,
};

/// Purchase detail line: quantity of one product bought.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "serde_json::Value")]
pub struct DetalleCompra {
    pub producto_id: ProductoId,
    pub cantidad_compra: f64,
}

impl ValueObject for DetalleCompra {}

impl Schema for DetalleCompra {
    const NAME: &'static str = "DetalleCompra";

    fn parse(input: &Value) -> Result<Self, ValidationError> {
        let mut f = Fields::new(Self::NAME, input);
        let (Some(producto_id), Some(cantidad_compra)) =
            (f.id("productoId"), f.number("cantidadCompra"))
        else {
            return Err(f.into_error());
        };

        Ok(Self {
            producto_id,
            cantidad_compra,
        })
    }
}

impl StockSource for DetalleCompra {
    /// Purchased goods add to stock.
    fn stock_movement(&self) -> StockMovement {
        StockMovement::inbound(self.producto_id, self.cantidad_compra)
    }
}

impl_schema_try_from!(DetalleCompra);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tienda_core::ViolationKind;

    #[test]
    fn parses_detail_line() {
        let line = DetalleCompra::parse(&json!({"productoId": 3, "cantidadCompra": 12})).unwrap();
        assert_eq!(line.producto_id.get(), 3);
        assert_eq!(line.cantidad_compra, 12.0);
    }

    #[test]
    fn quantity_must_be_a_number() {
        let err = DetalleCompra::parse(&json!({"productoId": 3, "cantidadCompra": "12"}))
            .unwrap_err();
        assert!(err.has_violation("cantidadCompra", ViolationKind::WrongType { expected: "number" }));

        let err = DetalleCompra::parse(&json!({"productoId": 3})).unwrap_err();
        assert!(err.has_violation("cantidadCompra", ViolationKind::Missing));
    }

    #[test]
    fn product_must_be_positive() {
        let err = DetalleCompra::parse(&json!({"productoId": -3, "cantidadCompra": 1}))
            .unwrap_err();
        assert!(err.has_violation("productoId", ViolationKind::NotPositive));
    }

    #[test]
    fn purchase_adds_stock() {
        let line = DetalleCompra::parse(&json!({"productoId": 3, "cantidadCompra": 2.5})).unwrap();
        let movement = line.stock_movement();
        assert_eq!(movement.producto_id.get(), 3);
        assert_eq!(movement.delta, 2.5);
    }
}
