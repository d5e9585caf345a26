use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use tienda_core::{
    Creatable, EstadoId, Fields, PermisoId, Schema, ValidationError, impl_schema_try_from,
};

/// Permission (permiso).
///
/// Permissions are described by free text (e.g. "ventas.registrar") and
/// carry the status they are in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "serde_json::Value")]
pub struct Permiso {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PermisoId>,
    pub descripcion_permiso: String,
    pub estado_id: EstadoId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert-time attributes of a [`Permiso`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "serde_json::Value")]
pub struct NewPermiso {
    pub descripcion_permiso: String,
    pub estado_id: EstadoId,
}

impl Schema for Permiso {
    const NAME: &'static str = "Permiso";

    fn parse(input: &Value) -> Result<Self, ValidationError> {
        let mut f = Fields::new(Self::NAME, input);
        let (
            Some(id),
            Some(descripcion_permiso),
            Some(estado_id),
            Some(created_at),
            Some(updated_at),
        ) = (
            f.optional_id("id"),
            f.description("descripcionPermiso"),
            f.id("estadoId"),
            f.optional_timestamp("createdAt"),
            f.optional_timestamp("updatedAt"),
        )
        else {
            return Err(f.into_error());
        };

        Ok(Self {
            id,
            descripcion_permiso,
            estado_id,
            created_at,
            updated_at,
        })
    }
}

impl Schema for NewPermiso {
    const NAME: &'static str = "NewPermiso";

    fn parse(input: &Value) -> Result<Self, ValidationError> {
        let mut f = Fields::new(Self::NAME, input);
        let (Some(descripcion_permiso), Some(estado_id)) =
            (f.description("descripcionPermiso"), f.id("estadoId"))
        else {
            return Err(f.into_error());
        };

        Ok(Self {
            descripcion_permiso,
            estado_id,
        })
    }
}

impl Creatable for Permiso {
    type New = NewPermiso;

    fn creation_attributes(&self) -> NewPermiso {
        NewPermiso {
            descripcion_permiso: self.descripcion_permiso.clone(),
            estado_id: self.estado_id,
        }
    }
}

impl_schema_try_from!(Permiso, NewPermiso);
