//! In-memory rows with numeric counters, implementing [`IncrementCallback`].
//!
//! Intended for tests/dev. Counters are exact decimals, so fractional
//! quantities add and subtract without drift. Increments issued inside a
//! transaction are staged and only become visible on
//! [`InMemoryCounterStore::commit`].

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use rust_decimal::Decimal;

use tienda_core::increment::ID_ATTRIBUTE;
use tienda_core::{
    FilterValue, IncrementCallback, IncrementError, IncrementOptions, IncrementOutcome,
    PositiveId, TransactionId,
};

use crate::config::InfraConfig;

/// A row to seed into the store: identity, filterable attributes and counters.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterRow {
    id: u64,
    attributes: BTreeMap<String, FilterValue>,
    counters: BTreeMap<String, Decimal>,
}

impl CounterRow {
    /// New row; its id is also filterable as the `id` attribute.
    pub fn new(id: impl PositiveId) -> Self {
        let id = id.get();
        let mut attributes = BTreeMap::new();
        attributes.insert(ID_ATTRIBUTE.to_string(), FilterValue::from(id));
        Self {
            id,
            attributes,
            counters: BTreeMap::new(),
        }
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn counter(mut self, name: impl Into<String>, value: Decimal) -> Self {
        self.counters.insert(name.into(), value);
        self
    }
}

#[derive(Debug, Clone)]
struct StagedIncrement {
    field: String,
    options: IncrementOptions,
}

/// Pending counter values keyed by (row id, field).
type Overlay = BTreeMap<(u64, String), Decimal>;

#[derive(Debug, Default)]
struct PendingTransaction {
    steps: Vec<StagedIncrement>,
    /// Values of the counters this transaction touched, as it sees them.
    overlay: Overlay,
}

#[derive(Debug, Default)]
struct State {
    rows: BTreeMap<u64, CounterRow>,
    pending: HashMap<TransactionId, PendingTransaction>,
    next_transaction: u64,
}

/// In-memory counter store.
#[derive(Debug, Default)]
pub struct InMemoryCounterStore {
    state: RwLock<State>,
    allow_negative: bool,
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &InfraConfig) -> Self {
        Self {
            state: RwLock::new(State::default()),
            allow_negative: config.allow_negative_stock,
        }
    }

    /// Insert or replace a row.
    pub fn insert(&self, row: CounterRow) -> Result<(), IncrementError> {
        let mut state = self.write()?;
        state.rows.insert(row.id, row);
        Ok(())
    }

    /// Committed value of `field` on row `id` (`None` if the row or field is absent).
    pub fn counter(&self, id: impl PositiveId, field: &str) -> Result<Option<Decimal>, IncrementError> {
        let state = self
            .state
            .read()
            .map_err(|_| IncrementError::Store("lock poisoned".to_string()))?;
        Ok(state
            .rows
            .get(&id.get())
            .and_then(|row| row.counters.get(field))
            .copied())
    }

    /// Open a transaction scope.
    pub fn begin(&self) -> Result<TransactionId, IncrementError> {
        let mut state = self.write()?;
        state.next_transaction += 1;
        let tx = TransactionId::new(state.next_transaction);
        state.pending.insert(tx, PendingTransaction::default());
        tracing::debug!(transaction = %tx, "transaction opened");
        Ok(tx)
    }

    /// Apply every staged increment of `tx` atomically.
    ///
    /// Staged steps are re-checked against the current committed rows. On
    /// failure nothing is applied and the transaction is discarded.
    pub fn commit(&self, tx: TransactionId) -> Result<(), IncrementError> {
        let mut state = self.write()?;
        let pending = state
            .pending
            .remove(&tx)
            .ok_or(IncrementError::UnknownTransaction(tx))?;

        let mut overlay = Overlay::new();
        for step in &pending.steps {
            let updates = plan(&state.rows, &overlay, &step.field, &step.options, self.allow_negative)?;
            for (id, value) in updates {
                overlay.insert((id, step.field.clone()), value);
            }
        }

        for ((id, field), value) in overlay {
            if let Some(counter) = state.rows.get_mut(&id).and_then(|row| row.counters.get_mut(&field)) {
                *counter = value;
            }
        }

        tracing::info!(transaction = %tx, increments = pending.steps.len(), "transaction committed");
        Ok(())
    }

    /// Discard every staged increment of `tx`.
    pub fn rollback(&self, tx: TransactionId) -> Result<(), IncrementError> {
        let mut state = self.write()?;
        let pending = state
            .pending
            .remove(&tx)
            .ok_or(IncrementError::UnknownTransaction(tx))?;
        tracing::info!(transaction = %tx, increments = pending.steps.len(), "transaction rolled back");
        Ok(())
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, State>, IncrementError> {
        self.state
            .write()
            .map_err(|_| IncrementError::Store("lock poisoned".to_string()))
    }
}

#[async_trait::async_trait]
impl IncrementCallback for InMemoryCounterStore {
    async fn increment(
        &self,
        field: &str,
        options: IncrementOptions,
    ) -> Result<IncrementOutcome, IncrementError> {
        let mut state = self.write()?;

        let affected = match options.transaction {
            None => {
                let updates = plan(&state.rows, &Overlay::new(), field, &options, self.allow_negative)?;
                let affected = updates.len() as u64;
                for (id, value) in updates {
                    if let Some(counter) = state.rows.get_mut(&id).and_then(|row| row.counters.get_mut(field)) {
                        *counter = value;
                    }
                }
                affected
            }
            Some(tx) => {
                let pending = state
                    .pending
                    .get(&tx)
                    .ok_or(IncrementError::UnknownTransaction(tx))?;
                let updates = plan(&state.rows, &pending.overlay, field, &options, self.allow_negative)?;
                let affected = updates.len() as u64;

                if let Some(pending) = state.pending.get_mut(&tx) {
                    for (id, value) in updates {
                        pending.overlay.insert((id, field.to_string()), value);
                    }
                    pending.steps.push(StagedIncrement {
                        field: field.to_string(),
                        options: options.clone(),
                    });
                }
                affected
            }
        };

        tracing::debug!(
            field,
            by = options.by,
            affected,
            transaction = ?options.transaction,
            "increment"
        );
        Ok(IncrementOutcome { affected })
    }
}

/// New value of `field` for every row the filter selects, checked before
/// anything is written. Values in `overlay` take precedence over `rows`.
fn plan(
    rows: &BTreeMap<u64, CounterRow>,
    overlay: &Overlay,
    field: &str,
    options: &IncrementOptions,
    allow_negative: bool,
) -> Result<Vec<(u64, Decimal)>, IncrementError> {
    if !options.by.is_finite() {
        return Err(IncrementError::InvalidAmount(options.by));
    }
    let by = Decimal::try_from(options.by).map_err(|_| IncrementError::InvalidAmount(options.by))?;

    let mut updates = Vec::new();
    for row in rows.values().filter(|row| options.filter.matches(&row.attributes)) {
        let current = overlay
            .get(&(row.id, field.to_string()))
            .or_else(|| row.counters.get(field))
            .copied()
            .ok_or_else(|| IncrementError::UnknownField(field.to_string()))?;

        let next = current
            .checked_add(by)
            .ok_or(IncrementError::InvalidAmount(options.by))?;
        if !allow_negative && next < Decimal::ZERO {
            return Err(IncrementError::NegativeBalance {
                field: field.to_string(),
                row: row.id,
            });
        }
        updates.push((row.id, next));
    }

    Ok(updates)
}
