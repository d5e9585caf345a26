//! Purchasing records (compras).
//!
//! Status history of purchases and purchase detail lines, implemented purely
//! as validated record shapes (no IO, no HTTP, no storage).

pub mod compra_estado;
pub mod detalle;

pub use compra_estado::{CompraHasEstado, NewCompraHasEstado};
pub use detalle::DetalleCompra;
