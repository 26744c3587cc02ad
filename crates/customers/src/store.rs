use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use clientes_core::{CustomerId, Entity};

use crate::customer::{Customer, CustomerDraft};

/// Customer storage abstraction.
///
/// Every operation is atomic with respect to the others.
pub trait CustomerStore: Send + Sync {
    /// Snapshot of all customers, in insertion order.
    fn list_all(&self) -> Vec<Customer>;
    fn get(&self, id: CustomerId) -> Option<Customer>;
    /// Store a new customer (names trimmed) under the next sequential id.
    fn add(&self, first_name: &str, last_name: &str) -> Customer;
    /// Replace the names of an existing customer. Returns `false` (and changes
    /// nothing) when `id` is unknown.
    fn update(&self, id: CustomerId, first_name: &str, last_name: &str) -> bool;
    /// Remove a customer. Returns `false` when `id` was not present; unknown
    /// ids are otherwise a no-op.
    fn delete(&self, id: CustomerId) -> bool;
}

impl<S> CustomerStore for Arc<S>
where
    S: CustomerStore + ?Sized,
{
    fn list_all(&self) -> Vec<Customer> {
        (**self).list_all()
    }

    fn get(&self, id: CustomerId) -> Option<Customer> {
        (**self).get(id)
    }

    fn add(&self, first_name: &str, last_name: &str) -> Customer {
        (**self).add(first_name, last_name)
    }

    fn update(&self, id: CustomerId, first_name: &str, last_name: &str) -> bool {
        (**self).update(id, first_name, last_name)
    }

    fn delete(&self, id: CustomerId) -> bool {
        (**self).delete(id)
    }
}

#[derive(Debug)]
struct StoreState {
    // Ids are allocated in increasing order, so key order == insertion order.
    records: BTreeMap<CustomerId, Customer>,
    next_id: CustomerId,
}

/// In-memory customer store guarded by a single mutex.
#[derive(Debug)]
pub struct InMemoryCustomerStore {
    inner: Mutex<StoreState>,
}

impl InMemoryCustomerStore {
    /// Empty store; the first customer gets id 1.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreState {
                records: BTreeMap::new(),
                next_id: CustomerId::new(1),
            }),
        }
    }

    /// Store preloaded with the two demo customers (ids 1 and 2).
    pub fn with_seed_data() -> Self {
        let store = Self::new();
        store.add("Ana", "Silva");
        store.add("Bruno", "Souza");
        store
    }

    pub fn len(&self) -> usize {
        self.state().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        // Every operation leaves the state consistent, so a poisoned lock is safe to reuse.
        self.inner.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("customer store lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

impl Default for InMemoryCustomerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerStore for InMemoryCustomerStore {
    fn list_all(&self) -> Vec<Customer> {
        self.state().records.values().cloned().collect()
    }

    fn get(&self, id: CustomerId) -> Option<Customer> {
        self.state().records.get(&id).cloned()
    }

    fn add(&self, first_name: &str, last_name: &str) -> Customer {
        let mut state = self.state();
        let id = state.next_id;
        state.next_id = id.next();

        let customer = Customer::new(id, CustomerDraft::new(first_name, last_name));
        state.records.insert(id, customer.clone());
        customer
    }

    fn update(&self, id: CustomerId, first_name: &str, last_name: &str) -> bool {
        let mut state = self.state();
        match state.records.get_mut(&id) {
            Some(existing) => {
                let replacement = Customer::new(id, CustomerDraft::new(first_name, last_name));
                debug_assert!(replacement.same_identity(existing));
                *existing = replacement;
                true
            }
            None => false,
        }
    }

    fn delete(&self, id: CustomerId) -> bool {
        self.state().records.remove(&id).is_some()
    }
}
