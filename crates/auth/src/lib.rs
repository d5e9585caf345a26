//! `tienda-auth` — permission records.
//!
//! This crate is intentionally decoupled from HTTP and storage; it only
//! declares and validates the permission shapes.

pub mod permiso;

pub use permiso::{NewPermiso, Permiso};
