mod get;
mod page;
mod post;

pub use get::customers_page;
pub use page::render_customers_page;
pub use post::add_customer;
