use std::time::Duration;

use secrecy::Secret;
use serde_aux::prelude::*;

use crate::address_client::{AddressClient, AddressClientError};
use crate::storage::FileStorage;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Settings {
    pub application: ApplicationSetting,
    pub address_lookup: AddressLookupSetting,
    pub storage: StorageSetting,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ApplicationSetting {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub hmac_secret: Secret<String>,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AddressLookupSetting {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl AddressLookupSetting {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn client(&self) -> Result<AddressClient, AddressClientError> {
        AddressClient::new(self.base_url.clone(), self.timeout())
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct StorageSetting {
    pub directory: String,
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl StorageSetting {
    pub fn file_storage(&self) -> FileStorage {
        FileStorage::new(&self.directory)
    }
}

fn default_storage_key() -> String {
    "customers".into()
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let mut settings = config::Config::default();
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("Failed to determine current directory: {}", e)))?;
    let configuration_directory = base_path.join("configuration");

    settings.merge(config::File::from(configuration_directory.join("base")).required(true))?;

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    settings.merge(config::File::from(configuration_directory.join(environment.as_str())).required(true))?;

    settings.merge(config::Environment::with_prefix("app").separator("__"))?;

    settings.try_into()
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}
