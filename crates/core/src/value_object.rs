//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Join records (`ProductoHasPromocion`), detail lines (`DetalleCompra`,
/// `DetalleVenta`) and stock movements carry no identity of their own: two
/// of them holding the same values are the same thing.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
