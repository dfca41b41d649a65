//! # Customer Registry
//!
//! Customers keyed by tax id. The registry is what the point of sale
//! consults through [`CustomerLookup`] when opening a sale.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use depot_core::{Customer, CustomerLookup};
use tracing::{debug, info, warn};

/// Shared, lock-protected customer registry.
#[derive(Debug, Clone, Default)]
pub struct CustomerRegistry {
    customers: Arc<RwLock<BTreeMap<String, Customer>>>,
}

impl CustomerRegistry {
    pub fn new() -> Self {
        CustomerRegistry::default()
    }

    /// Adds a customer. Returns `false` if the tax id is already taken.
    pub fn register(&self, customer: Customer) -> bool {
        let mut customers = self.customers.write().expect("Customer lock poisoned");
        let tax_id = customer.tax_id().trim().to_string();

        if customers.contains_key(&tax_id) {
            warn!(tax_id = %tax_id, "Customer already registered");
            return false;
        }

        info!(tax_id = %tax_id, name = %customer.name(), "Customer registered");
        customers.insert(tax_id, customer);
        true
    }

    pub fn find(&self, tax_id: &str) -> Option<Customer> {
        self.customers
            .read()
            .expect("Customer lock poisoned")
            .get(tax_id.trim())
            .cloned()
    }

    /// All customers ordered by tax id.
    pub fn list(&self) -> Vec<Customer> {
        self.customers
            .read()
            .expect("Customer lock poisoned")
            .values()
            .cloned()
            .collect()
    }

    /// Removes and returns the customer under `tax_id`.
    pub fn remove(&self, tax_id: &str) -> Option<Customer> {
        let removed = self
            .customers
            .write()
            .expect("Customer lock poisoned")
            .remove(tax_id.trim());
        if removed.is_some() {
            info!(tax_id = %tax_id.trim(), "Customer removed");
        }
        removed
    }

    /// Replaces phone and address. Returns `false` for an unknown tax id.
    pub fn update_contact(&self, tax_id: &str, phone: &str, address: &str) -> bool {
        let mut customers = self.customers.write().expect("Customer lock poisoned");
        match customers.get_mut(tax_id.trim()) {
            Some(customer) => {
                customer.set_phone(phone);
                customer.set_address(address);
                debug!(tax_id = %tax_id.trim(), "Customer contact updated");
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.customers.read().expect("Customer lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CustomerLookup for CustomerRegistry {
    fn find_by_tax_id(&self, tax_id: &str) -> Option<Customer> {
        self.find(tax_id)
    }
}
