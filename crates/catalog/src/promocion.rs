use serde::{Deserialize, Serialize};
use serde_json::Value;

use tienda_core::{
    Fields, ProductoId, PromocionId, Schema, ValidationError, ValueObject, impl_schema_try_from,
};

/// Join record: a product taking part in a promotion.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "serde_json::Value")]
pub struct ProductoHasPromocion {
    pub producto_id: ProductoId,
    pub promocion_id: PromocionId,
}

impl ValueObject for ProductoHasPromocion {}

impl Schema for ProductoHasPromocion {
    const NAME: &'static str = "ProductoHasPromocion";

    fn parse(input: &Value) -> Result<Self, ValidationError> {
        let mut f = Fields::new(Self::NAME, input);
        let (Some(producto_id), Some(promocion_id)) = (f.id("productoId"), f.id("promocionId"))
        else {
            return Err(f.into_error());
        };

        Ok(Self {
            producto_id,
            promocion_id,
        })
    }
}

impl_schema_try_from!(ProductoHasPromocion);
