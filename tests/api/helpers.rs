use std::sync::Arc;

use httpmock::prelude::*;
use httpmock::Mock;
use once_cell::sync::Lazy;
use tempfile::TempDir;

use customer_registry::configuration::{get_configuration, Settings};
use customer_registry::customer_store::CustomerStore;
use customer_registry::domain::Customer;
use customer_registry::startup::{ApplicationBuilder, ApplicationData};
use customer_registry::storage::FileStorage;
use customer_registry::telemetry::{get_subscriber, init_subscriber};

static TRACING: Lazy<()> = Lazy::new(|| {
    let subscriber_name = "test".to_string();
    let default_log_level = "debug".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_log_level, std::io::stdout);
        init_subscriber(subscriber).expect("Failed to initialise tracing");
    } else {
        let subscriber = get_subscriber(subscriber_name, default_log_level, std::io::sink);
        init_subscriber(subscriber).expect("Failed to initialise tracing");
    };
});

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub lookup_server: MockServer,
    pub store: Arc<CustomerStore<FileStorage>>,
    pub storage_directory: TempDir,
    pub configuration: Settings,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_customer<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(&format!("{}/customers", &self.address))
            .form(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_customer_raw(&self, body: String) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/customers", &self.address))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_customers(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/customers", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_customers_html(&self) -> String {
        self.get_customers().await.text().await.unwrap()
    }

    /// Customers as they are currently written on disk.
    pub fn stored_customers(&self) -> Vec<Customer> {
        let path = self
            .configuration
            .storage
            .file_storage()
            .path_for(&self.configuration.storage.key);
        match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).expect("Stored customers are not valid JSON"),
            Err(_) => Vec::new(),
        }
    }

    pub async fn mock_address<'a>(&'a self, postal_code: &str, city: &str, state_code: &str) -> Mock<'a> {
        let path = format!("/{}/json/", postal_code);
        let body = serde_json::json!({
            "cep": postal_code,
            "uf": state_code,
            "localidade": city
        });
        self.lookup_server
            .mock_async(|when, then| {
                when.method(GET).path(path);
                then.status(200).json_body(body);
            })
            .await
    }

    pub async fn mock_unknown_address<'a>(&'a self, postal_code: &str) -> Mock<'a> {
        let path = format!("/{}/json/", postal_code);
        self.lookup_server
            .mock_async(|when, then| {
                when.method(GET).path(path);
                then.status(200).json_body(serde_json::json!({ "erro": true }));
            })
            .await
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_stored("[]").await
}

/// Starts the application with `raw` already written under the storage key.
pub async fn spawn_app_with_stored(raw: &str) -> TestApp {
    Lazy::force(&TRACING);

    let lookup_server = MockServer::start_async().await;
    let storage_directory = tempfile::tempdir().expect("Failed to create a storage directory");

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration");
        c.application.port = 0;
        c.address_lookup.base_url = lookup_server.base_url();
        c.address_lookup.timeout_milliseconds = 500;
        c.storage.directory = storage_directory.path().to_string_lossy().into_owned();
        c
    };

    let storage = configuration.storage.file_storage();
    std::fs::create_dir_all(storage_directory.path()).unwrap();
    std::fs::write(storage.path_for(&configuration.storage.key), raw).unwrap();
    let store = Arc::new(
        CustomerStore::load(storage, &configuration.storage.key).expect("Failed to load the stored customers."),
    );
    let address_client = configuration
        .address_lookup
        .client()
        .expect("Failed to build the address lookup client.");

    let application = ApplicationBuilder::new(configuration.clone())
        .store(ApplicationData::AddressClient, Arc::new(address_client))
        .store(ApplicationData::CustomerStore, store.clone())
        .build::<FileStorage>()
        .await
        .expect("Failed to build application.");

    let api_client = reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let application_port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address: format!("http://localhost:{}", application_port),
        port: application_port,
        lookup_server,
        store,
        storage_directory,
        configuration,
        api_client,
    }
}

pub fn assert_is_redirect_to(response: &reqwest::Response, location: &str) {
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers().get("Location").unwrap(), location);
}
