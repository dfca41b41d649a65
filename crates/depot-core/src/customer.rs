//! # Customers
//!
//! The customer registry lives outside the engine. A sale only needs to ask
//! "who is this tax id?" and remember the answer, so the engine defines the
//! record, a frozen reference for sales, and the lookup seam.

use serde::{Deserialize, Serialize};

/// A registered customer.
///
/// The tax id (RUT) is the registry key and never changes; phone and address
/// are editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    name: String,
    tax_id: String,
    phone: String,
    address: String,
}

impl Customer {
    pub fn new(
        name: impl Into<String>,
        tax_id: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Customer {
            name: name.into(),
            tax_id: tax_id.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
    }
}

/// Customer identity frozen onto a sale.
///
/// Snapshot of the registry entry at the moment the sale was opened; later
/// edits to the registry do not rewrite past sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRef {
    pub tax_id: String,
    pub name: String,
}

impl From<&Customer> for CustomerRef {
    fn from(customer: &Customer) -> Self {
        CustomerRef {
            tax_id: customer.tax_id.clone(),
            name: customer.name.clone(),
        }
    }
}

/// Read-only view of a customer registry.
pub trait CustomerLookup {
    /// Returns the customer registered under `tax_id`, if any.
    fn find_by_tax_id(&self, tax_id: &str) -> Option<Customer>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_ref_snapshot() {
        let mut customer = Customer::new("Ana Pérez", "12.345.678-9", "", "Los Aromos 12");
        let reference = CustomerRef::from(&customer);

        customer.set_address("Las Acacias 40");

        assert_eq!(reference.tax_id, "12.345.678-9");
        assert_eq!(reference.name, "Ana Pérez");
        assert_eq!(customer.address(), "Las Acacias 40");
    }
}
