//! Strongly-typed identifiers used across the domain.
//!
//! Every identifier is a positive integer assigned by the persistence layer.
//! The newtypes wrap `NonZeroU64`, so a constructed value is always positive.

use core::num::NonZeroU64;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a purchase (compra).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompraId(NonZeroU64);

/// Identifier of a status (estado).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstadoId(NonZeroU64);

/// Identifier of a user (usuario).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsuarioId(NonZeroU64);

/// Identifier of a brand (marca).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarcaId(NonZeroU64);

/// Identifier of a permission (permiso).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermisoId(NonZeroU64);

/// Identifier of a product (producto).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductoId(NonZeroU64);

/// Identifier of a promotion (promocion).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromocionId(NonZeroU64);

/// Common surface of the positive integer identifiers.
///
/// The schema layer is generic over this so one reader handles every id field.
pub trait PositiveId: Copy + Sized {
    /// Wrap an already-positive value.
    fn from_non_zero(value: NonZeroU64) -> Self;

    /// The raw positive value.
    fn get(&self) -> u64;
}

macro_rules! impl_positive_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Create an identifier, rejecting zero and negative values.
            pub fn new(value: i64) -> Result<Self, DomainError> {
                u64::try_from(value)
                    .ok()
                    .and_then(NonZeroU64::new)
                    .map(Self)
                    .ok_or_else(|| {
                        DomainError::invalid_id(format!("{}: {} is not positive", $name, value))
                    })
            }

            pub fn get(&self) -> u64 {
                self.0.get()
            }
        }

        impl PositiveId for $t {
            fn from_non_zero(value: NonZeroU64) -> Self {
                Self(value)
            }

            fn get(&self) -> u64 {
                self.0.get()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<NonZeroU64> for $t {
            fn from(value: NonZeroU64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u64 {
            fn from(value: $t) -> Self {
                value.0.get()
            }
        }

        impl TryFrom<i64> for $t {
            type Error = DomainError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = i64::from_str(s.trim())
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Self::new(value)
            }
        }
    };
}

impl_positive_id!(CompraId, "CompraId");
impl_positive_id!(EstadoId, "EstadoId");
impl_positive_id!(UsuarioId, "UsuarioId");
impl_positive_id!(MarcaId, "MarcaId");
impl_positive_id!(PermisoId, "PermisoId");
impl_positive_id!(ProductoId, "ProductoId");
impl_positive_id!(PromocionId, "PromocionId");
