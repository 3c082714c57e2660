use std::any::Any;
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::Arc;

use actix_web::cookie::Key;
use actix_web::dev::Server;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::FlashMessagesFramework;
use anyhow::{anyhow, Context};
use secrecy::{ExposeSecret, Secret};
use tracing_actix_web::TracingLogger;

use crate::address_client::AddressClient;
use crate::configuration::Settings;
use crate::customer_store::CustomerStore;
use crate::routes::{add_customer, customers_page, health_check, home};
use crate::storage::Storage;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build<S: Storage>(
        configuration: Settings,
        address_client: Arc<AddressClient>,
        store: Arc<CustomerStore<S>>,
    ) -> Result<Self, anyhow::Error> {
        let address = format!("{}:{}", configuration.application.host, configuration.application.port);
        let listener = TcpListener::bind(&address).with_context(|| format!("Failed to bind {}", address))?;
        let port = listener.local_addr()?.port();
        tracing::info!("listening on {}:{}", configuration.application.host, port);

        let server = run(listener, address_client, store, configuration.application.hmac_secret)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

#[derive(Eq, PartialEq, Hash, Debug)]
pub enum ApplicationData {
    AddressClient,
    CustomerStore,
}

/// Collects the shared state before the server is built, so tests can swap in
/// their own storage backend or lookup service.
pub struct ApplicationBuilder {
    configuration: Settings,
    items: HashMap<ApplicationData, Arc<dyn Any + Send + Sync>>,
}

impl ApplicationBuilder {
    pub fn new(configuration: Settings) -> Self {
        ApplicationBuilder {
            configuration,
            items: HashMap::new(),
        }
    }

    pub fn store<T: Any + Send + Sync + 'static>(mut self, key: ApplicationData, item: Arc<T>) -> Self {
        self.items.insert(key, item);
        self
    }

    pub fn set_address_client_from_configuration(self) -> Result<Self, anyhow::Error> {
        let address_client = self
            .configuration
            .address_lookup
            .client()
            .context("Failed to build the address lookup client")?;
        Ok(self.store(ApplicationData::AddressClient, Arc::new(address_client)))
    }

    pub fn set_customer_store_from_configuration(self) -> Result<Self, anyhow::Error> {
        let storage = self.configuration.storage.file_storage();
        let store = CustomerStore::load(storage, &self.configuration.storage.key)
            .context("Failed to load the stored customers")?;
        Ok(self.store(ApplicationData::CustomerStore, Arc::new(store)))
    }

    fn get_item<T: Send + Sync + 'static>(&mut self, key: ApplicationData) -> Result<Arc<T>, anyhow::Error> {
        let item = self
            .items
            .remove(&key)
            .ok_or_else(|| anyhow!("No {:?} was provided to the application builder", key))?;
        item.downcast::<T>()
            .map_err(|_| anyhow!("The {:?} provided to the application builder has the wrong type", key))
    }

    pub async fn build<S: Storage>(mut self) -> Result<Application, anyhow::Error> {
        let address_client = self.get_item::<AddressClient>(ApplicationData::AddressClient)?;
        let store = self.get_item::<CustomerStore<S>>(ApplicationData::CustomerStore)?;

        Application::build(self.configuration, address_client, store).await
    }
}

pub fn run<S: Storage>(
    listener: TcpListener,
    address_client: Arc<AddressClient>,
    store: Arc<CustomerStore<S>>,
    hmac_secret: Secret<String>,
) -> Result<Server, anyhow::Error> {
    let address_client = Data::from(address_client);
    let store = Data::from(store);
    let secret_key = Key::try_from(hmac_secret.expose_secret().as_bytes())
        .map_err(|e| anyhow!("The hmac secret cannot be used as a cookie key: {:?}", e))?;
    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(TracingLogger::default())
            .route("/", web::get().to(home))
            .route("/health_check", web::get().to(health_check))
            .route("/customers", web::get().to(customers_page::<S>))
            .route("/customers", web::post().to(add_customer::<S>))
            .app_data(address_client.clone())
            .app_data(store.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
