use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use tienda_core::{
    Creatable, EstadoId, Fields, MarcaId, Schema, ValidationError, impl_schema_try_from,
};

/// Brand (marca) of catalog products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "serde_json::Value")]
pub struct Marca {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<MarcaId>,
    pub descripcion_marca: String,
    pub estado_id: EstadoId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert-time attributes of a [`Marca`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "serde_json::Value")]
pub struct NewMarca {
    pub descripcion_marca: String,
    pub estado_id: EstadoId,
}

impl Schema for Marca {
    const NAME: &'static str = "Marca";

    fn parse(input: &Value) -> Result<Self, ValidationError> {
        let mut f = Fields::new(Self::NAME, input);
        let (
            Some(id),
            Some(descripcion_marca),
            Some(estado_id),
            Some(created_at),
            Some(updated_at),
        ) = (
            f.optional_id("id"),
            f.description("descripcionMarca"),
            f.id("estadoId"),
            f.optional_timestamp("createdAt"),
            f.optional_timestamp("updatedAt"),
        )
        else {
            return Err(f.into_error());
        };

        Ok(Self {
            id,
            descripcion_marca,
            estado_id,
            created_at,
            updated_at,
        })
    }
}

impl Schema for NewMarca {
    const NAME: &'static str = "NewMarca";

    fn parse(input: &Value) -> Result<Self, ValidationError> {
        let mut f = Fields::new(Self::NAME, input);
        let (Some(descripcion_marca), Some(estado_id)) =
            (f.description("descripcionMarca"), f.id("estadoId"))
        else {
            return Err(f.into_error());
        };

        Ok(Self {
            descripcion_marca,
            estado_id,
        })
    }
}

impl Creatable for Marca {
    type New = NewMarca;

    fn creation_attributes(&self) -> NewMarca {
        NewMarca {
            descripcion_marca: self.descripcion_marca.clone(),
            estado_id: self.estado_id,
        }
    }
}

impl_schema_try_from!(Marca, NewMarca);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tienda_core::ViolationKind;

    fn full() -> Value {
        json!({
            "id": 10,
            "descripcionMarca": "Acme",
            "estadoId": 1,
            "createdAt": "2024-01-15T08:30:00Z",
            "updatedAt": "2024-01-15T08:30:00Z",
        })
    }

    #[test]
    fn parses_full_record() {
        let marca = Marca::parse(&full()).unwrap();
        assert_eq!(marca.id, Some(MarcaId::new(10).unwrap()));
        assert_eq!(marca.descripcion_marca, "Acme");
        assert_eq!(marca.estado_id.get(), 1);
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        for field in ["descripcionMarca", "estadoId"] {
            let mut input = full();
            input.as_object_mut().unwrap().remove(field);
            let err = Marca::parse(&input).unwrap_err();
            assert!(err.has_violation(field, ViolationKind::Missing), "{field}");
        }
    }

    #[test]
    fn estado_id_must_be_positive() {
        for bad in [json!(0), json!(-2)] {
            let mut input = full();
            input["estadoId"] = bad;
            let err = Marca::parse(&input).unwrap_err();
            assert!(err.has_violation("estadoId", ViolationKind::NotPositive));
        }

        let mut input = full();
        input["estadoId"] = json!("1");
        let err = Marca::parse(&input).unwrap_err();
        assert!(err.has_violation("estadoId", ViolationKind::WrongType { expected: "integer" }));
    }

    #[test]
    fn non_positive_id_is_rejected() {
        for bad in [0, -1, -1000] {
            let mut input = full();
            input["id"] = json!(bad);
            let err = Marca::parse(&input).unwrap_err();
            assert!(err.has_violation("id", ViolationKind::NotPositive), "id = {bad}");
        }
    }

    #[test]
    fn empty_description_is_rejected() {
        let mut input = full();
        input["descripcionMarca"] = json!("");
        let err = Marca::parse(&input).unwrap_err();
        assert!(err.has_violation("descripcionMarca", ViolationKind::Empty));

        let err = NewMarca::parse(&json!({"descripcionMarca": "", "estadoId": 1})).unwrap_err();
        assert_eq!(err.schema, "NewMarca");
        assert!(err.has_violation("descripcionMarca", ViolationKind::Empty));
    }

    #[test]
    fn full_record_without_server_fields_is_a_creation_payload() {
        let mut input = full();
        let map = input.as_object_mut().unwrap();
        for field in ["id", "createdAt", "updatedAt"] {
            map.remove(field);
        }

        let new = NewMarca::parse(&input).unwrap();
        assert_eq!(new, Marca::parse(&full()).unwrap().creation_attributes());
    }
}
