use std::fmt::Write;

use crate::domain::Customer;
use crate::form::{Notification, NotificationKind};
use crate::utils::escape_html;

pub const EMPTY_LIST_MESSAGE: &str = "Ops, no customers registered :(";

/// One `<dl>` per customer, in list order.
pub fn render_customer_list(customers: &[Customer]) -> String {
    if customers.is_empty() {
        return format!(r#"<h1 class="info">{}</h1>"#, escape_html(EMPTY_LIST_MESSAGE));
    }

    let mut html = String::new();
    for customer in customers {
        writeln!(
            html,
            "<dl>\n  <dt>{}</dt>\n  <dd class=\"email\">{}</dd>\n  <dd class=\"location\">{}</dd>\n</dl>",
            escape_html(&customer.name),
            escape_html(&customer.email),
            escape_html(&customer.location()),
        )
        .unwrap();
    }
    html
}

pub fn render_notification(notification: Option<&Notification>) -> String {
    match notification {
        None => String::new(),
        Some(notification) => {
            let class = match notification.kind {
                NotificationKind::Success => "toast toast-success",
                NotificationKind::Error => "toast toast-error",
            };
            format!(
                r#"<div id="toast-{}" class="{}" role="alert">{}</div>"#,
                notification.id,
                class,
                escape_html(&notification.message)
            )
        },
    }
}
