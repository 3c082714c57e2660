mod customers;
mod health_check;
mod home;

pub use customers::*;
pub use health_check::*;
pub use home::*;
