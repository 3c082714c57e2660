use crate::domain::Customer;
use crate::form::CustomerForm;
use crate::utils::escape_html;
use crate::views::{render_customer_list, render_notification};

pub fn render_customers_page(form: &CustomerForm, customers: &[Customer]) -> String {
    include_str!("customers.html")
        .replace("{notification}", &render_notification(form.notification()))
        .replace("{name}", &escape_html(&form.name))
        .replace("{email}", &escape_html(&form.email))
        .replace("{postal_code}", &escape_html(&form.postal_code))
        .replace("{customer_list}", &render_customer_list(customers))
}
