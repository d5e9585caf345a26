//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// malformed identifiers). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An input record failed schema validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// An identifier was invalid (non-positive or not a number).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// The input was not a JSON object.
    NotAnObject,
    /// A required field was absent.
    Missing,
    /// The field held a value of the wrong JSON type.
    WrongType { expected: &'static str },
    /// An identifier was zero or negative.
    NotPositive,
    /// An identifier had a fractional part.
    NotInteger,
    /// An identifier was too large to represent.
    OutOfRange,
    /// A description was the empty string.
    Empty,
    /// A number was NaN or infinite.
    NotFinite,
    /// A timestamp string was not RFC 3339.
    InvalidTimestamp,
}

impl core::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ViolationKind::NotAnObject => f.write_str("expected an object"),
            ViolationKind::Missing => f.write_str("is required"),
            ViolationKind::WrongType { expected } => write!(f, "expected {expected}"),
            ViolationKind::NotPositive => f.write_str("must be a positive integer"),
            ViolationKind::NotInteger => f.write_str("must be an integer"),
            ViolationKind::OutOfRange => f.write_str("is out of range"),
            ViolationKind::Empty => f.write_str("must not be empty"),
            ViolationKind::NotFinite => f.write_str("must be a finite number"),
            ViolationKind::InvalidTimestamp => f.write_str("expected an RFC 3339 timestamp"),
        }
    }
}

/// A constraint violation on one field (or on the record itself, field `$`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub kind: ViolationKind,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl core::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "`{}` {}", self.field, self.kind)
    }
}

/// Schema rejection: every violation found in one input record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{schema}: {}", render(.violations))]
pub struct ValidationError {
    pub schema: &'static str,
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(schema: &'static str, violations: Vec<FieldViolation>) -> Self {
        Self { schema, violations }
    }

    /// Returns the violation reported for `field`, if any.
    pub fn violation(&self, field: &str) -> Option<&FieldViolation> {
        self.violations.iter().find(|v| v.field == field)
    }

    pub fn has_violation(&self, field: &str, kind: ViolationKind) -> bool {
        self.violations
            .iter()
            .any(|v| v.field == field && v.kind == kind)
    }
}

fn render(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_every_violation() {
        let err = ValidationError::new(
            "Marca",
            vec![
                FieldViolation::new("descripcionMarca", ViolationKind::Empty),
                FieldViolation::new("estadoId", ViolationKind::Missing),
            ],
        );

        assert_eq!(
            err.to_string(),
            "Marca: `descripcionMarca` must not be empty; `estadoId` is required"
        );
        assert!(err.has_violation("estadoId", ViolationKind::Missing));
        assert!(err.violation("id").is_none());
    }

    #[test]
    fn validation_error_converts_into_domain_error() {
        let err: DomainError = ValidationError::new(
            "Estado",
            vec![FieldViolation::new("$", ViolationKind::NotAnObject)],
        )
        .into();

        assert_eq!(
            err.to_string(),
            "validation failed: Estado: `$` expected an object"
        );
    }
}
