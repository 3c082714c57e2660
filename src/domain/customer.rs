use serde::{Deserialize, Serialize};

use crate::address_client::AddressLookupResult;
use crate::domain::NewCustomer;

/// A registered customer, as it is persisted under the `customers` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub postal_code: String,
    pub state_code: String,
    pub city: String,
}

impl Customer {
    pub fn new(new_customer: NewCustomer, address: AddressLookupResult) -> Self {
        Self {
            name: new_customer.name.as_ref().to_owned(),
            email: new_customer.email.as_ref().to_owned(),
            address: Address {
                postal_code: address.postal_code,
                state_code: address.state_code,
                city: address.city,
            },
        }
    }

    /// `"city, state"` as shown in the customer list.
    pub fn location(&self) -> String {
        format!("{}, {}", self.address.city, self.address.state_code)
    }
}
