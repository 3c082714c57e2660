use actix_web::http::StatusCode;
use actix_web::ResponseError;
use anyhow::Context;

use crate::address_client::{AddressClient, AddressClientError};
use crate::customer_store::CustomerStore;
use crate::domain::{Customer, CustomerEmail, CustomerName, NewCustomer, PostalCode};
use crate::storage::Storage;
use crate::utils::error_chain_fmt;

pub const NOTIFICATION_ID: &str = "customer";
pub const SUCCESS_MESSAGE: &str = "Customer successfully added.";
pub const ERROR_MESSAGE: &str = "Error registering customer, check data and try again.";

#[derive(serde::Deserialize, Debug, Clone, Default)]
pub struct FormData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub postal_code: String,
}

impl TryFrom<FormData> for NewCustomer {
    type Error = String;

    fn try_from(value: FormData) -> Result<Self, Self::Error> {
        let name = CustomerName::parse(value.name)?;
        let email = CustomerEmail::parse(value.email)?;
        let postal_code = PostalCode::parse(value.postal_code)?;
        Ok(Self {
            name,
            email,
            postal_code,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: &'static str,
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success() -> Self {
        Self {
            id: NOTIFICATION_ID,
            kind: NotificationKind::Success,
            message: SUCCESS_MESSAGE.to_owned(),
        }
    }

    pub fn error() -> Self {
        Self {
            id: NOTIFICATION_ID,
            kind: NotificationKind::Error,
            message: ERROR_MESSAGE.to_owned(),
        }
    }
}

#[derive(thiserror::Error)]
pub enum AddCustomerError {
    #[error("{0}")]
    ValidationError(String),
    #[error("no address was found for postal code {0}")]
    AddressNotFound(String),
    #[error("failed to look up the address")]
    LookupError(#[source] AddressClientError),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for AddCustomerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for AddCustomerError {
    fn status_code(&self) -> StatusCode {
        match self {
            AddCustomerError::ValidationError(_) | AddCustomerError::AddressNotFound(_) => StatusCode::BAD_REQUEST,
            AddCustomerError::LookupError(_) => StatusCode::BAD_GATEWAY,
            AddCustomerError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Input state of the customer form plus the outcome of the last submission.
#[derive(Debug, Clone)]
pub struct CustomerForm {
    pub name: String,
    pub email: String,
    pub postal_code: String,
    state: FormState,
    notification: Option<Notification>,
}

impl From<FormData> for CustomerForm {
    fn from(form: FormData) -> Self {
        Self {
            name: form.name,
            email: form.email,
            postal_code: form.postal_code,
            state: FormState::Idle,
            notification: None,
        }
    }
}

impl Default for CustomerForm {
    fn default() -> Self {
        FormData::default().into()
    }
}

impl CustomerForm {
    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Replaces any visible notification; only one is shown at a time.
    pub fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }

    fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.postal_code.clear();
    }

    fn form_data(&self) -> FormData {
        FormData {
            name: self.name.clone(),
            email: self.email.clone(),
            postal_code: self.postal_code.clone(),
        }
    }

    /// Validates the entered values, resolves the address and appends the
    /// customer to the store.
    ///
    /// On success the fields are cleared and the form goes back to `Idle`.
    /// On failure the fields keep their values, the form stays in `Failure`
    /// and nothing is written to the store.
    #[tracing::instrument(
        name = "Submitting the customer form",
        skip(self, address_client, store),
        fields(customer_email = %self.email, postal_code = %self.postal_code)
    )]
    pub async fn submit<S: Storage>(
        &mut self,
        address_client: &AddressClient,
        store: &CustomerStore<S>,
    ) -> Result<Customer, AddCustomerError> {
        self.state = FormState::Submitting;
        match self.register(address_client, store).await {
            Ok(customer) => {
                self.state = FormState::Success;
                self.notify(Notification::success());
                self.clear();
                self.state = FormState::Idle;
                Ok(customer)
            },
            Err(e) => {
                self.state = FormState::Failure;
                self.notify(Notification::error());
                Err(e)
            },
        }
    }

    async fn register<S: Storage>(
        &self,
        address_client: &AddressClient,
        store: &CustomerStore<S>,
    ) -> Result<Customer, AddCustomerError> {
        if self.name.trim().is_empty() {
            return Err(AddCustomerError::ValidationError("customer name is blank.".into()));
        }

        let new_customer: NewCustomer = self.form_data().try_into().map_err(AddCustomerError::ValidationError)?;

        let address = address_client
            .lookup(&new_customer.postal_code)
            .await
            .map_err(AddCustomerError::LookupError)?;
        if !address.found {
            return Err(AddCustomerError::AddressNotFound(
                new_customer.postal_code.as_ref().to_owned(),
            ));
        }

        let customer = Customer::new(new_customer, address);
        store
            .append(customer.clone())
            .await
            .context("Failed to store the new customer")?;
        Ok(customer)
    }
}
