//! Scoped numeric increment capability.
//!
//! The data layer owns the rows; domain code only describes *which* rows
//! (a [`Filter`]), *how much* (`by`) and *in which transaction*.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use crate::id::PositiveId;

/// Attribute name matched by [`Filter::by_id`].
pub const ID_ATTRIBUTE: &str = "id";

/// A value a filter predicate compares against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterValue {
    Int(i128),
    Text(String),
    Bool(bool),
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Int(value.into())
    }
}

impl From<u64> for FilterValue {
    fn from(value: u64) -> Self {
        Self::Int(value.into())
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Row selector: a conjunction of attribute equality predicates.
///
/// An empty filter matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    predicates: BTreeMap<String, FilterValue>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the row whose `id` attribute equals `id`.
    pub fn by_id(id: impl PositiveId) -> Self {
        Self::new().eq(ID_ATTRIBUTE, id.get())
    }

    /// Add an equality predicate (replaces an earlier one on the same attribute).
    pub fn eq(mut self, attribute: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.predicates.insert(attribute.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn predicates(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.predicates.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether a row with these attributes satisfies every predicate.
    pub fn matches(&self, attributes: &BTreeMap<String, FilterValue>) -> bool {
        self.predicates
            .iter()
            .all(|(name, expected)| attributes.get(name) == Some(expected))
    }
}

/// Handle to a transaction scope issued by the data layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionId(u64);

impl TransactionId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "tx-{}", self.0)
    }
}

/// Options of one increment: amount, row filter and optional transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct IncrementOptions {
    pub by: f64,
    pub filter: Filter,
    pub transaction: Option<TransactionId>,
}

impl IncrementOptions {
    pub fn new(by: f64, filter: Filter) -> Self {
        Self {
            by,
            filter,
            transaction: None,
        }
    }

    pub fn in_transaction(mut self, transaction: TransactionId) -> Self {
        self.transaction = Some(transaction);
        self
    }
}

/// A complete increment call: target field plus options.
#[derive(Debug, Clone, PartialEq)]
pub struct IncrementRequest {
    pub field: String,
    pub options: IncrementOptions,
}

impl IncrementRequest {
    pub fn new(field: impl Into<String>, options: IncrementOptions) -> Self {
        Self {
            field: field.into(),
            options,
        }
    }
}

/// Result of an increment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct IncrementOutcome {
    /// Number of rows the filter selected.
    pub affected: u64,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IncrementError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("unknown transaction: {0}")]
    UnknownTransaction(TransactionId),

    #[error("increment would make `{field}` negative on row {row}")]
    NegativeBalance { field: String, row: u64 },

    #[error("invalid increment amount: {0}")]
    InvalidAmount(f64),

    #[error("store error: {0}")]
    Store(String),
}

/// Increment a numeric field on every row selected by `options.filter`.
#[async_trait::async_trait]
pub trait IncrementCallback: Send + Sync {
    async fn increment(
        &self,
        field: &str,
        options: IncrementOptions,
    ) -> Result<IncrementOutcome, IncrementError>;

    /// Execute a prepared [`IncrementRequest`].
    async fn execute(&self, request: IncrementRequest) -> Result<IncrementOutcome, IncrementError> {
        self.increment(&request.field, request.options).await
    }
}

#[async_trait::async_trait]
impl<C> IncrementCallback for Arc<C>
where
    C: IncrementCallback + ?Sized,
{
    async fn increment(
        &self,
        field: &str,
        options: IncrementOptions,
    ) -> Result<IncrementOutcome, IncrementError> {
        (**self).increment(field, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ProductoId;

    #[test]
    fn filter_by_id_matches_only_that_row() {
        let filter = Filter::by_id(ProductoId::new(5).unwrap());

        let mut row = BTreeMap::new();
        row.insert(ID_ATTRIBUTE.to_string(), FilterValue::from(5u64));
        assert!(filter.matches(&row));

        row.insert(ID_ATTRIBUTE.to_string(), FilterValue::from(6u64));
        assert!(!filter.matches(&row));
    }

    #[test]
    fn filter_is_a_conjunction() {
        let filter = Filter::new().eq("marcaId", 2i64).eq("activo", true);

        let mut row = BTreeMap::new();
        row.insert("marcaId".to_string(), FilterValue::from(2i64));
        assert!(!filter.matches(&row));

        row.insert("activo".to_string(), FilterValue::from(true));
        assert!(filter.matches(&row));
        assert_eq!(filter.predicates().count(), 2);
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = Filter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&BTreeMap::new()));
    }

    #[test]
    fn options_carry_transaction() {
        let tx = TransactionId::new(9);
        let options = IncrementOptions::new(3.0, Filter::new()).in_transaction(tx);
        assert_eq!(options.transaction, Some(tx));
        assert_eq!(tx.to_string(), "tx-9");
    }
}
