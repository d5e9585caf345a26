use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use tienda_core::{
    CompraId, Creatable, EstadoId, Fields, Schema, UsuarioId, ValidationError,
    impl_schema_try_from,
};

/// Join record: a purchase entering a status, recorded by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "serde_json::Value")]
pub struct CompraHasEstado {
    pub compra_id: CompraId,
    pub estado_id: EstadoId,
    pub usuario_id: UsuarioId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert-time attributes of a [`CompraHasEstado`] (timestamps are server-assigned).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "serde_json::Value")]
pub struct NewCompraHasEstado {
    pub compra_id: CompraId,
    pub estado_id: EstadoId,
    pub usuario_id: UsuarioId,
}

impl Schema for CompraHasEstado {
    const NAME: &'static str = "CompraHasEstado";

    fn parse(input: &Value) -> Result<Self, ValidationError> {
        let mut f = Fields::new(Self::NAME, input);
        let (
            Some(compra_id),
            Some(estado_id),
            Some(usuario_id),
            Some(created_at),
            Some(updated_at),
        ) = (
            f.id("compraId"),
            f.id("estadoId"),
            f.id("usuarioId"),
            f.optional_timestamp("createdAt"),
            f.optional_timestamp("updatedAt"),
        )
        else {
            return Err(f.into_error());
        };

        Ok(Self {
            compra_id,
            estado_id,
            usuario_id,
            created_at,
            updated_at,
        })
    }
}

impl Schema for NewCompraHasEstado {
    const NAME: &'static str = "NewCompraHasEstado";

    fn parse(input: &Value) -> Result<Self, ValidationError> {
        let mut f = Fields::new(Self::NAME, input);
        let (Some(compra_id), Some(estado_id), Some(usuario_id)) =
            (f.id("compraId"), f.id("estadoId"), f.id("usuarioId"))
        else {
            return Err(f.into_error());
        };

        Ok(Self {
            compra_id,
            estado_id,
            usuario_id,
        })
    }
}

impl Creatable for CompraHasEstado {
    type New = NewCompraHasEstado;

    fn creation_attributes(&self) -> NewCompraHasEstado {
        NewCompraHasEstado {
            compra_id: self.compra_id,
            estado_id: self.estado_id,
            usuario_id: self.usuario_id,
        }
    }
}

impl_schema_try_from!(CompraHasEstado, NewCompraHasEstado);
