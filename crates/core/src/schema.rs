//! Record schemas: turning untyped JSON input into typed domain records.
//!
//! A schema reads every declared field, collects *all* constraint violations
//! (not just the first one), and only produces a record when none were found.
//! Keys the schema does not declare are ignored.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{DomainResult, FieldViolation, ValidationError, ViolationKind};
use crate::id::PositiveId;

/// Field name used for record-level violations (e.g. input is not an object).
pub const RECORD_FIELD: &str = "$";

/// A validated record shape.
pub trait Schema: Sized {
    /// Name reported in validation errors.
    const NAME: &'static str;

    /// Accept or reject an untyped input record.
    fn parse(input: &Value) -> Result<Self, ValidationError>;
}

/// A record shape with a distinct insert-time shape.
///
/// The creation shape omits server-assigned fields (`id`, `createdAt`,
/// `updatedAt`).
pub trait Creatable: Schema {
    type New: Schema;

    /// The attributes of this record a client may supply at insert time.
    fn creation_attributes(&self) -> Self::New;
}

/// Validation entry point: parse `input` as `S`, reporting failures as domain errors.
pub fn validate<S: Schema>(input: &Value) -> DomainResult<S> {
    S::parse(input).map_err(|err| {
        tracing::debug!(schema = S::NAME, violations = err.violations.len(), error = %err, "record rejected");
        err.into()
    })
}

/// Implements `TryFrom<serde_json::Value>` through [`Schema::parse`], so a
/// record can use `#[serde(try_from = "serde_json::Value")]`.
#[macro_export]
macro_rules! impl_schema_try_from {
    ($($t:ty),+ $(,)?) => {
        $(
            impl TryFrom<serde_json::Value> for $t {
                type Error = $crate::ValidationError;

                fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
                    <$t as $crate::Schema>::parse(&value)
                }
            }
        )+
    };
}

/// Field reader over one input record.
///
/// Every accessor returns `None` exactly when it recorded a violation, so a
/// schema can destructure all results and fall back to [`Fields::into_error`].
#[derive(Debug)]
pub struct Fields<'a> {
    schema: &'static str,
    map: Option<&'a Map<String, Value>>,
    violations: Vec<FieldViolation>,
}

impl<'a> Fields<'a> {
    pub fn new(schema: &'static str, input: &'a Value) -> Self {
        let mut violations = Vec::new();
        let map = match input {
            Value::Object(map) => Some(map),
            _ => {
                violations.push(FieldViolation::new(RECORD_FIELD, ViolationKind::NotAnObject));
                None
            }
        };

        Self {
            schema,
            map,
            violations,
        }
    }

    /// Required positive integer identifier.
    pub fn id<I: PositiveId>(&mut self, name: &str) -> Option<I> {
        self.required(name, positive_id)
    }

    /// Optional positive integer identifier.
    pub fn optional_id<I: PositiveId>(&mut self, name: &str) -> Option<Option<I>> {
        self.optional(name, positive_id)
    }

    /// Required non-empty string.
    pub fn description(&mut self, name: &str) -> Option<String> {
        self.required(name, non_empty_string)
    }

    pub fn boolean(&mut self, name: &str) -> Option<bool> {
        self.required(name, |value| {
            value
                .as_bool()
                .ok_or(ViolationKind::WrongType { expected: "boolean" })
        })
    }

    /// Required finite number.
    pub fn number(&mut self, name: &str) -> Option<f64> {
        self.required(name, finite_number)
    }

    pub fn optional_timestamp(&mut self, name: &str) -> Option<Option<DateTime<Utc>>> {
        self.optional(name, timestamp)
    }

    pub fn into_error(self) -> ValidationError {
        ValidationError::new(self.schema, self.violations)
    }

    fn required<T>(
        &mut self,
        name: &str,
        read: impl FnOnce(&Value) -> Result<T, ViolationKind>,
    ) -> Option<T> {
        match self.optional(name, read)? {
            Some(value) => Some(value),
            None => {
                // A non-object input already reported itself; don't pile on.
                if self.map.is_some() {
                    self.violations
                        .push(FieldViolation::new(name, ViolationKind::Missing));
                }
                None
            }
        }
    }

    fn optional<T>(
        &mut self,
        name: &str,
        read: impl FnOnce(&Value) -> Result<T, ViolationKind>,
    ) -> Option<Option<T>> {
        let map = self.map?;
        let Some(value) = map.get(name) else {
            return Some(None);
        };

        match read(value) {
            Ok(v) => Some(Some(v)),
            Err(kind) => {
                self.violations.push(FieldViolation::new(name, kind));
                None
            }
        }
    }
}

fn positive_id<I: PositiveId>(value: &Value) -> Result<I, ViolationKind> {
    let Value::Number(n) = value else {
        return Err(ViolationKind::WrongType { expected: "integer" });
    };

    let raw = if let Some(i) = n.as_i64() {
        u64::try_from(i).map_err(|_| ViolationKind::NotPositive)?
    } else if let Some(u) = n.as_u64() {
        u
    } else {
        let f = n.as_f64().ok_or(ViolationKind::WrongType { expected: "integer" })?;
        if f.fract() != 0.0 {
            return Err(ViolationKind::NotInteger);
        }
        if f <= 0.0 {
            return Err(ViolationKind::NotPositive);
        }
        if f >= u64::MAX as f64 {
            return Err(ViolationKind::OutOfRange);
        }
        f as u64
    };

    core::num::NonZeroU64::new(raw)
        .map(I::from_non_zero)
        .ok_or(ViolationKind::NotPositive)
}

fn non_empty_string(value: &Value) -> Result<String, ViolationKind> {
    match value.as_str() {
        Some("") => Err(ViolationKind::Empty),
        Some(s) => Ok(s.to_string()),
        None => Err(ViolationKind::WrongType { expected: "string" }),
    }
}

fn finite_number(value: &Value) -> Result<f64, ViolationKind> {
    let n = value
        .as_f64()
        .ok_or(ViolationKind::WrongType { expected: "number" })?;
    if n.is_finite() {
        Ok(n)
    } else {
        Err(ViolationKind::NotFinite)
    }
}

fn timestamp(value: &Value) -> Result<DateTime<Utc>, ViolationKind> {
    let s = value
        .as_str()
        .ok_or(ViolationKind::WrongType { expected: "timestamp" })?;
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ViolationKind::InvalidTimestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use crate::id::{EstadoId, ProductoId};
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    struct Sample {
        id: Option<EstadoId>,
        producto_id: ProductoId,
        nombre: String,
        activo: bool,
        cantidad: f64,
        created_at: Option<DateTime<Utc>>,
    }

    impl Schema for Sample {
        const NAME: &'static str = "Sample";

        fn parse(input: &Value) -> Result<Self, ValidationError> {
            let mut f = Fields::new(Self::NAME, input);
            let (
                Some(id),
                Some(producto_id),
                Some(nombre),
                Some(activo),
                Some(cantidad),
                Some(created_at),
            ) = (
                f.optional_id("id"),
                f.id("productoId"),
                f.description("nombre"),
                f.boolean("activo"),
                f.number("cantidad"),
                f.optional_timestamp("createdAt"),
            )
            else {
                return Err(f.into_error());
            };

            Ok(Self {
                id,
                producto_id,
                nombre,
                activo,
                cantidad,
                created_at,
            })
        }
    }

    fn valid() -> Value {
        json!({
            "productoId": 3,
            "nombre": "Caja",
            "activo": true,
            "cantidad": 2.5,
        })
    }

    #[test]
    fn accepts_valid_record_and_ignores_unknown_keys() {
        let mut input = valid();
        input["otro"] = json!("ignorado");
        input["createdAt"] = json!("2024-03-01T10:00:00Z");

        let sample = Sample::parse(&input).unwrap();
        assert_eq!(sample.id, None);
        assert_eq!(sample.producto_id.get(), 3);
        assert_eq!(sample.nombre, "Caja");
        assert!(sample.activo);
        assert_eq!(sample.cantidad, 2.5);
        assert_eq!(
            sample.created_at.unwrap().to_rfc3339(),
            "2024-03-01T10:00:00+00:00"
        );
    }

    #[test]
    fn reports_every_violation() {
        let input = json!({
            "id": 0,
            "productoId": 1.5,
            "nombre": "",
            "activo": "yes",
            "createdAt": "yesterday",
        });

        let err = Sample::parse(&input).unwrap_err();
        assert_eq!(err.schema, "Sample");
        assert!(err.has_violation("id", ViolationKind::NotPositive));
        assert!(err.has_violation("productoId", ViolationKind::NotInteger));
        assert!(err.has_violation("nombre", ViolationKind::Empty));
        assert!(err.has_violation("activo", ViolationKind::WrongType { expected: "boolean" }));
        assert!(err.has_violation("cantidad", ViolationKind::Missing));
        assert!(err.has_violation("createdAt", ViolationKind::InvalidTimestamp));
        assert_eq!(err.violations.len(), 6);
    }

    #[test]
    fn integral_floats_are_identifiers() {
        let mut input = valid();
        input["productoId"] = json!(4.0);
        assert_eq!(Sample::parse(&input).unwrap().producto_id.get(), 4);

        input["productoId"] = json!(-4.0);
        let err = Sample::parse(&input).unwrap_err();
        assert!(err.has_violation("productoId", ViolationKind::NotPositive));
    }

    #[test]
    fn huge_identifiers_are_out_of_range() {
        let mut input = valid();
        input["productoId"] = json!(1e20);
        let err = Sample::parse(&input).unwrap_err();
        assert!(err.has_violation("productoId", ViolationKind::OutOfRange));
        assert!(err.to_string().contains("`productoId` is out of range"));
    }

    #[test]
    fn null_is_not_absent() {
        let mut input = valid();
        input["id"] = Value::Null;
        let err = Sample::parse(&input).unwrap_err();
        assert!(err.has_violation("id", ViolationKind::WrongType { expected: "integer" }));
    }

    #[test]
    fn non_object_input_reports_only_the_record() {
        let err = Sample::parse(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(
            err.violations,
            vec![FieldViolation::new(RECORD_FIELD, ViolationKind::NotAnObject)]
        );
    }

    #[test]
    fn validate_maps_into_domain_error() {
        let ok: Sample = validate(&valid()).unwrap();
        assert_eq!(ok.nombre, "Caja");

        let err = validate::<Sample>(&json!({})).unwrap_err();
        match err {
            DomainError::Validation(e) => {
                assert!(e.has_violation("productoId", ViolationKind::Missing));
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }
}
