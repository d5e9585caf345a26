use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use tienda_core::{Creatable, EstadoId, Fields, Schema, ValidationError, impl_schema_try_from};

/// Status record (estado) referenced by brands, permissions and purchases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "serde_json::Value")]
pub struct Estado {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EstadoId>,
    pub descripcion_estado: String,
    pub activo_estado: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert-time attributes of an [`Estado`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "serde_json::Value")]
pub struct NewEstado {
    pub descripcion_estado: String,
    pub activo_estado: bool,
}

impl Schema for Estado {
    const NAME: &'static str = "Estado";

    fn parse(input: &Value) -> Result<Self, ValidationError> {
        let mut f = Fields::new(Self::NAME, input);
        let (
            Some(id),
            Some(descripcion_estado),
            Some(activo_estado),
            Some(created_at),
            Some(updated_at),
        ) = (
            f.optional_id("id"),
            f.description("descripcionEstado"),
            f.boolean("activoEstado"),
            f.optional_timestamp("createdAt"),
            f.optional_timestamp("updatedAt"),
        )
        else {
            return Err(f.into_error());
        };

        Ok(Self {
            id,
            descripcion_estado,
            activo_estado,
            created_at,
            updated_at,
        })
    }
}

impl Schema for NewEstado {
    const NAME: &'static str = "NewEstado";

    fn parse(input: &Value) -> Result<Self, ValidationError> {
        let mut f = Fields::new(Self::NAME, input);
        let (Some(descripcion_estado), Some(activo_estado)) = (
            f.description("descripcionEstado"),
            f.boolean("activoEstado"),
        ) else {
            return Err(f.into_error());
        };

        Ok(Self {
            descripcion_estado,
            activo_estado,
        })
    }
}

impl Creatable for Estado {
    type New = NewEstado;

    fn creation_attributes(&self) -> NewEstado {
        NewEstado {
            descripcion_estado: self.descripcion_estado.clone(),
            activo_estado: self.activo_estado,
        }
    }
}

impl_schema_try_from!(Estado, NewEstado);
