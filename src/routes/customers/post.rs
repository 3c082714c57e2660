use actix_web::http::header::ContentType;
use actix_web::web::{Data, Form};
use actix_web::{HttpResponse, ResponseError};
use actix_web_flash_messages::FlashMessage;

use crate::address_client::AddressClient;
use crate::customer_store::CustomerStore;
use crate::form::{CustomerForm, FormData, SUCCESS_MESSAGE};
use crate::routes::customers::render_customers_page;
use crate::storage::Storage;
use crate::utils::see_other;

/// On success the browser is redirected back to the page, which renders an
/// empty form. On failure the page is rendered right away with the entered
/// values and the error notification.
#[tracing::instrument(
    name = "Adding a new customer",
    skip(form, address_client, store),
    fields(
        customer_email = %form.email,
        customer_name = %form.name
    )
)]
pub async fn add_customer<S: Storage>(
    form: Form<FormData>,
    address_client: Data<AddressClient>,
    store: Data<CustomerStore<S>>,
) -> HttpResponse {
    let mut customer_form = CustomerForm::from(form.0);

    match customer_form.submit(&address_client, &store).await {
        Ok(_) => {
            FlashMessage::success(SUCCESS_MESSAGE).send();
            see_other("/customers")
        },
        Err(e) => {
            tracing::warn!(error.cause_chain = ?e, error.message = %e, "Failed to add a customer");
            let customers = store.customers().await;
            HttpResponse::build(e.status_code())
                .content_type(ContentType::html())
                .body(render_customers_page(&customer_form, &customers))
        },
    }
}
