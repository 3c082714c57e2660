use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde_aux::prelude::*;

use crate::domain::PostalCode;

/// Address resolved for a postal code. `found == false` means the service
/// answered but has no address for the code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressLookupResult {
    pub postal_code: String,
    pub city: String,
    pub state_code: String,
    pub found: bool,
}

#[derive(serde::Deserialize)]
struct LookupResponse {
    #[serde(default)]
    cep: Option<String>,
    #[serde(default)]
    uf: String,
    #[serde(default)]
    localidade: String,
    #[serde(default, deserialize_with = "deserialize_bool_from_anything")]
    erro: bool,
}

#[derive(thiserror::Error, Debug)]
pub enum AddressClientError {
    #[error("failed to get an answer from the postal code lookup service")]
    Transport(#[from] reqwest::Error),
    #[error("the postal code lookup service answered with {0}")]
    UnexpectedStatus(StatusCode),
    #[error("{0} is not a valid base url for the postal code lookup service")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone)]
pub struct AddressClient {
    http_client: Client,
    base_url: Url,
}

impl AddressClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, AddressClientError> {
        let base_url = match Url::parse(&base_url) {
            Ok(url) if !url.cannot_be_a_base() => url,
            _ => return Err(AddressClientError::InvalidBaseUrl(base_url)),
        };
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self { http_client, base_url })
    }

    /// The postal code is pushed as a single path segment, so `/`, `?` and `#`
    /// are percent-encoded.
    fn endpoint(&self, postal_code: &PostalCode) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(postal_code.as_ref()).push("json").push("");
        }
        url
    }

    /// Issues `GET {base_url}/{postal_code}/json/`.
    ///
    /// A postal code unknown to the service is not an error: the result comes
    /// back with `found` set to `false`. Only transport level failures are
    /// returned as `Err`.
    #[tracing::instrument(
        name = "Looking up the address of a postal code",
        skip(self, postal_code),
        fields(postal_code = %postal_code.as_ref())
    )]
    pub async fn lookup(&self, postal_code: &PostalCode) -> Result<AddressLookupResult, AddressClientError> {
        let response = self.http_client.get(self.endpoint(postal_code)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AddressClientError::UnexpectedStatus(status));
        }

        let body: LookupResponse = response.json().await?;
        if body.erro {
            tracing::info!("postal code is unknown to the lookup service");
            return Ok(AddressLookupResult {
                postal_code: postal_code.as_ref().to_owned(),
                city: String::new(),
                state_code: String::new(),
                found: false,
            });
        }

        Ok(AddressLookupResult {
            postal_code: body.cep.unwrap_or_else(|| postal_code.as_ref().to_owned()),
            city: body.localidade,
            state_code: body.uf,
            found: true,
        })
    }
}
