mod customer;
mod customer_email;
mod customer_name;
mod new_customer;
mod postal_code;

pub use customer::{Address, Customer};
pub use customer_email::CustomerEmail;
pub use customer_name::CustomerName;
pub use new_customer::NewCustomer;
pub use postal_code::PostalCode;
