pub mod address_client;
pub mod configuration;
pub mod customer_store;
pub mod domain;
pub mod form;
pub mod routes;
pub mod startup;
pub mod storage;
pub mod telemetry;
pub mod utils;
pub mod views;
