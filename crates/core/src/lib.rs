//! `tienda-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives: identifiers, the error
//! model, record schemas and the increment contract implemented by the data
//! layer.

pub mod error;
pub mod id;
pub mod increment;
pub mod schema;
pub mod stock;
pub mod value_object;

pub use error::{DomainError, DomainResult, FieldViolation, ValidationError, ViolationKind};
pub use id::{
    CompraId, EstadoId, MarcaId, PermisoId, PositiveId, ProductoId, PromocionId, UsuarioId,
};
pub use increment::{
    Filter, FilterValue, IncrementCallback, IncrementError, IncrementOptions, IncrementOutcome,
    IncrementRequest, TransactionId,
};
pub use schema::{Creatable, Fields, Schema, validate};
pub use stock::{STOCK_FIELD, StockMovement, StockSource};
pub use value_object::ValueObject;
