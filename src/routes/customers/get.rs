use actix_web::http::header::ContentType;
use actix_web::web::Data;
use actix_web::HttpResponse;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};

use crate::customer_store::CustomerStore;
use crate::form::{CustomerForm, Notification, NotificationKind, NOTIFICATION_ID};
use crate::routes::customers::render_customers_page;
use crate::storage::Storage;

pub async fn customers_page<S: Storage>(
    flash_messages: IncomingFlashMessages,
    store: Data<CustomerStore<S>>,
) -> HttpResponse {
    let mut form = CustomerForm::default();
    // All notifications share one identifier, so only the newest is shown.
    if let Some(notification) = flash_messages.iter().filter_map(notification_from_flash).last() {
        form.notify(notification);
    }
    let customers = store.customers().await;

    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(render_customers_page(&form, &customers))
}

fn notification_from_flash(message: &FlashMessage) -> Option<Notification> {
    let kind = match message.level() {
        Level::Success => NotificationKind::Success,
        Level::Error => NotificationKind::Error,
        _ => return None,
    };
    Some(Notification {
        id: NOTIFICATION_ID,
        kind,
        message: message.content().to_owned(),
    })
}
