//! Catalog records: statuses, brands and product promotions.
//!
//! Pure record shapes with their validation (no IO, no HTTP, no storage).

pub mod estado;
pub mod marca;
pub mod promocion;

pub use estado::{Estado, NewEstado};
pub use marca::{Marca, NewMarca};
pub use promocion::ProductoHasPromocion;
