use crate::domain::{CustomerEmail, CustomerName, PostalCode};

#[derive(Debug)]
pub struct NewCustomer {
    pub name: CustomerName,
    pub email: CustomerEmail,
    pub postal_code: PostalCode,
}
