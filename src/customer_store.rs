use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::Customer;
use crate::storage::{Storage, StorageError};

/// Owns the customer list. The list is read from storage once, when the store
/// is loaded, and written back in full after every change.
#[derive(Debug)]
pub struct CustomerStore<S: Storage> {
    storage: Arc<S>,
    key: String,
    customers: Mutex<Vec<Customer>>,
}

impl<S: Storage> CustomerStore<S> {
    /// A missing or unparsable entry yields an empty list. A storage that
    /// cannot be read is an error: starting empty would overwrite it on the
    /// next append.
    #[tracing::instrument(name = "Loading stored customers", skip(storage))]
    pub fn load(storage: S, key: &str) -> Result<Self, StorageError> {
        let customers = match storage.get_item(key)? {
            Some(raw) => serde_json::from_str::<Vec<Customer>>(&raw).unwrap_or_else(|e| {
                tracing::warn!(error.message = %e, "stored customers could not be parsed, starting empty");
                Vec::new()
            }),
            None => Vec::new(),
        };
        tracing::info!(count = customers.len(), "customers loaded");

        Ok(Self {
            storage: Arc::new(storage),
            key: key.to_owned(),
            customers: Mutex::new(customers),
        })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn customers(&self) -> Vec<Customer> {
        self.customers.lock().await.clone()
    }

    /// Replaces the whole list, in storage first and then in memory.
    pub async fn save(&self, customers: Vec<Customer>) -> Result<(), StorageError> {
        let mut current = self.customers.lock().await;
        self.write(&customers).await?;
        *current = customers;
        Ok(())
    }

    /// Appends to the end of the list. The lock is held across the write so
    /// concurrent appends are applied one after the other.
    #[tracing::instrument(name = "Saving a new customer", skip(self, customer), fields(customer_email = %customer.email))]
    pub async fn append(&self, customer: Customer) -> Result<(), StorageError> {
        let mut current = self.customers.lock().await;
        let mut customers = current.clone();
        customers.push(customer);
        self.write(&customers).await?;
        *current = customers;
        Ok(())
    }

    async fn write(&self, customers: &[Customer]) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(customers)?;
        let storage = self.storage.clone();
        let key = self.key.clone();
        tokio::task::spawn_blocking(move || storage.set_item(&key, &serialized))
            .await?
            .map_err(|e| {
                tracing::error!(error.cause_chain = ?e, "failed to write customers");
                e
            })
    }
}
