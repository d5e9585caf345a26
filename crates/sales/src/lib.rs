//! Sales records (ventas).

pub mod detalle;

pub use detalle::DetalleVenta;
